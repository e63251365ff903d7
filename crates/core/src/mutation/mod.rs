pub mod types;

pub use types::{CreateMutation, DeleteMutation, Mutation, MutationResult, Operation, PatchMutation};
