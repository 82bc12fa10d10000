//! Request Context
//!
//! Cancellable execution handle passed explicitly through every layer call.

use tokio_util::sync::{CancellationToken, DropGuard};
use uuid::Uuid;

/// Context for a single request, used for cancellation and tracing.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation ID for request tracing
    pub correlation_id: Option<Uuid>,

    cancel: CancellationToken,
}

impl RequestContext {
    /// Create a new root context
    pub fn new() -> Self {
        Self {
            correlation_id: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Create a context that is cancelled whenever `parent` is
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            correlation_id: None,
            cancel: parent.child_token(),
        }
    }

    /// Create context with correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Derive a sub-scope for one store call. Cancelling the sub-scope never
    /// affects `self`.
    pub fn scope(&self) -> RequestContext {
        Self {
            correlation_id: self.correlation_id,
            cancel: self.cancel.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once the context is cancelled
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    /// Guard that cancels this context when dropped
    pub fn cancel_on_drop(&self) -> DropGuard {
        self.cancel.clone().drop_guard()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
