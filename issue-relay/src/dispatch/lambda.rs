//! AWS Lambda invoker.

use super::{Destination, InvokeError, RemoteInvoker};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_lambda::config::Region;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use aws_sdk_lambda::Client;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Invokes Lambda functions synchronously (`RequestResponse`).
///
/// Clients are built lazily per destination region from a shared SDK config.
#[derive(Debug)]
pub struct LambdaInvoker {
    sdk_config: SdkConfig,
    clients: Mutex<HashMap<String, Client>>,
}

impl LambdaInvoker {
    /// Creates an invoker using credentials and settings from `sdk_config`.
    #[must_use]
    pub fn new(sdk_config: SdkConfig) -> Self {
        Self {
            sdk_config,
            clients: Mutex::new(HashMap::new()),
        }
    }

    fn client_for(&self, region: &str) -> Client {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        clients
            .entry(region.to_string())
            .or_insert_with(|| {
                let config = aws_sdk_lambda::config::Builder::from(&self.sdk_config)
                    .region(Region::new(region.to_string()))
                    .build();
                Client::from_conf(config)
            })
            .clone()
    }
}

#[async_trait]
impl RemoteInvoker for LambdaInvoker {
    async fn invoke(
        &self,
        destination: &Destination,
        payload: &serde_json::Value,
    ) -> Result<(), InvokeError> {
        let body = serde_json::to_vec(payload).map_err(InvokeError::request)?;
        let client = self.client_for(destination.region());

        let output = client
            .invoke()
            .function_name(destination.address())
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(body))
            .send()
            .await
            .map_err(|e| InvokeError::request(e.into_service_error()))?;

        if let Some(kind) = output.function_error() {
            let message = output
                .payload()
                .map(|payload| String::from_utf8_lossy(payload.as_ref()).into_owned())
                .unwrap_or_default();
            return Err(InvokeError::Function {
                kind: kind.to_string(),
                message,
            });
        }

        debug!(status = output.status_code(), "Invocation completed");
        Ok(())
    }
}
