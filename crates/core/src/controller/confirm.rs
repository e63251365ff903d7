use async_trait::async_trait;

/// External yes/no confirmation, e.g. a dialog. Deletion only proceeds on `true`.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation with a fixed answer, for callers that collected it up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticConfirm(pub bool);

#[async_trait]
impl Confirm for StaticConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
