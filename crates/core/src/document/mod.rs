pub mod id;
pub mod model;
pub mod normalize;
pub mod timestamp;
pub mod validate;

pub use id::DocumentPath;
pub use model::{NewVideo, RawDocument, VideoPatch, VideoRecord};
pub use normalize::normalize;
pub use timestamp::{StoreTimestamp, TimestampLike};
