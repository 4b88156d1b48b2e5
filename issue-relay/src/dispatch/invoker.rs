//! Remote invocation abstraction.

use super::{Destination, InvokeError};
use async_trait::async_trait;

/// Invokes the downstream card-creation function.
#[async_trait]
pub trait RemoteInvoker: Send + Sync {
    /// Invokes the function at `destination` with `payload` and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError`] if the request fails or the function reports an error.
    async fn invoke(
        &self,
        destination: &Destination,
        payload: &serde_json::Value,
    ) -> Result<(), InvokeError>;
}
