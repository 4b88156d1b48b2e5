use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_lambda::config::Credentials;
use issue_relay::{
    Destination, InvokeError, Issue, LambdaInvoker, NotificationEnvelope, RemoteInvoker,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INVOCATIONS_PATH: &str = "/2015-03-31/functions/cards/invocations";

async fn sdk_config(server: &MockServer) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new("us-west-2"))
        .endpoint_url(server.uri())
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
        .retry_config(RetryConfig::disabled())
        .load()
        .await
}

fn payload() -> serde_json::Value {
    let issue = Issue::new(
        "Fix login bug",
        "https://github.com/acme/widgets/issues/1",
        "https://github.com/acme/widgets",
    );
    NotificationEnvelope::for_issue(&issue).to_payload().unwrap()
}

#[tokio::test]
async fn successful_invocation_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOCATIONS_PATH))
        .and(header("x-amz-invocation-type", "RequestResponse"))
        .and(header_exists("authorization"))
        .and(body_json(payload()))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = LambdaInvoker::new(sdk_config(&server).await);
    let destination = Destination::new("cards", "us-west-2");

    invoker.invoke(&destination, &payload()).await.unwrap();
}

#[tokio::test]
async fn function_error_is_a_failed_invocation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOCATIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Amz-Function-Error", "Unhandled")
                .set_body_string(r#"{"errorMessage":"boom"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let invoker = LambdaInvoker::new(sdk_config(&server).await);
    let destination = Destination::new("cards", "us-west-2");

    let error = invoker.invoke(&destination, &payload()).await.unwrap_err();

    match error {
        InvokeError::Function { kind, message } => {
            assert_eq!(kind, "Unhandled");
            assert_eq!(message, r#"{"errorMessage":"boom"}"#);
        }
        other => panic!("expected function error, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_request_is_a_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOCATIONS_PATH))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-amzn-errortype", "ResourceNotFoundException")
                .set_body_json(json!({
                    "Type": "User",
                    "message": "Function not found: cards"
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let invoker = LambdaInvoker::new(sdk_config(&server).await);
    let destination = Destination::new("cards", "us-west-2");

    let error = invoker.invoke(&destination, &payload()).await.unwrap_err();

    assert!(
        matches!(error, InvokeError::Request { .. }),
        "expected request error, got {error:?}"
    );
}

#[tokio::test]
async fn server_error_is_a_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOCATIONS_PATH))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("x-amzn-errortype", "ServiceException")
                .set_body_json(json!({ "message": "internal failure" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let invoker = LambdaInvoker::new(sdk_config(&server).await);
    let destination = Destination::new("cards", "us-west-2");

    let error = invoker.invoke(&destination, &payload()).await.unwrap_err();

    assert!(matches!(error, InvokeError::Request { .. }));
}
