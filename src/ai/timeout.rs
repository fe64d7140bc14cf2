//! Bounded waiting for async operations
//!
//! ```ignore
//! use crate::ai::timeout::with_timeout;
//!
//! let response = with_timeout(
//!     config.llm.timeout(),
//!     provider.generate(&prompt),
//!     "collaborator request",
//! ).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::types::{QuizError, Result};

/// Execute an async operation with a timeout
///
/// Returns `QuizError::Timeout` if the operation doesn't complete within
/// `timeout`.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(QuizError::timeout(operation_name, timeout)),
    }
}
