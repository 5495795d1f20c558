//! Post-commit side effects for mutation handlers.
//!
//! A mutation first performs its durable write, then runs a `PostCommit` list
//! of named side effects (live emissions, notification records). Each step is
//! individually failable: a failed step is logged with its name and skipped,
//! the remaining steps still run, and the caller's response is unaffected.

use futures::future::BoxFuture;
use std::future::Future;

use crate::domain::foundation::DomainError;

/// An ordered list of best-effort side effects, run after a durable write.
pub struct PostCommit {
    operation: &'static str,
    steps: Vec<(&'static str, BoxFuture<'static, Result<(), DomainError>>)>,
}

impl PostCommit {
    /// Starts an empty list for the named mutation.
    pub fn after(operation: &'static str) -> Self {
        Self {
            operation,
            steps: Vec::new(),
        }
    }

    /// Appends a named step. Steps run in append order.
    pub fn step<F>(mut self, name: &'static str, future: F) -> Self
    where
        F: Future<Output = Result<(), DomainError>> + Send + 'static,
    {
        self.steps.push((name, Box::pin(future)));
        self
    }

    /// Runs every step, logging failures instead of propagating them.
    pub async fn run(self) {
        for (name, future) in self.steps {
            if let Err(error) = future.await {
                tracing::warn!(
                    operation = self.operation,
                    step = name,
                    %error,
                    "post-commit side effect failed"
                );
            }
        }
    }
}
