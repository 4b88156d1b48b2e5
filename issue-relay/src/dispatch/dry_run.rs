//! Invoker that previews envelopes instead of sending them.

use super::{Destination, InvokeError, RemoteInvoker};
use async_trait::async_trait;
use tracing::info;

/// Prints each payload to stdout and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunInvoker;

#[async_trait]
impl RemoteInvoker for DryRunInvoker {
    async fn invoke(
        &self,
        destination: &Destination,
        payload: &serde_json::Value,
    ) -> Result<(), InvokeError> {
        let rendered = serde_json::to_string_pretty(payload).map_err(InvokeError::request)?;
        info!(destination = %destination, "[DRY RUN] Would invoke function");
        println!("{rendered}");
        Ok(())
    }
}
