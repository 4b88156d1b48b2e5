use chrono::{TimeZone, Utc};
use issue_relay::{AccessToken, GitHubIssueSource, Issue, IssueSource};
use serde_json::json;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn issue_json(number: u32) -> serde_json::Value {
    json!({
        "number": number,
        "title": format!("Issue {number}"),
        "state": "open",
        "html_url": format!("https://github.com/acme/widgets/issues/{number}"),
        "repository": {
            "full_name": "acme/widgets",
            "html_url": "https://github.com/acme/widgets"
        }
    })
}

#[tokio::test]
async fn fetches_assigned_issues_across_pages() {
    let server = MockServer::start().await;
    let next_link = format!("<{}/user/issues?page=2>; rel=\"next\"", server.uri());

    Mock::given(method("GET"))
        .and(path("/user/issues"))
        .and(query_param("filter", "assigned"))
        .and(query_param("state", "open"))
        .and(query_param("since", "2024-05-01T11:45:00Z"))
        .and(query_param("per_page", "100"))
        .and(header_exists("authorization"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next_link.as_str())
                .set_body_json(json!([issue_json(1), issue_json(2)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/issues"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([issue_json(3)])))
        .expect(1)
        .mount(&server)
        .await;

    let source = GitHubIssueSource::with_base_uri(server.uri());
    let since = Utc.with_ymd_and_hms(2024, 5, 1, 11, 45, 0).unwrap();

    let issues = source
        .fetch_assigned_issues(&AccessToken::new("test-token"), since)
        .await
        .unwrap();

    let titles: Vec<&str> = issues.iter().map(|issue| issue.title.as_str()).collect();
    assert_eq!(titles, vec!["Issue 1", "Issue 2", "Issue 3"]);
    assert_eq!(
        issues[0],
        Issue::new(
            "Issue 1",
            "https://github.com/acme/widgets/issues/1",
            "https://github.com/acme/widgets"
        )
    );
}

#[tokio::test]
async fn empty_listing_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let source = GitHubIssueSource::with_base_uri(server.uri());
    let issues = source
        .fetch_assigned_issues(&AccessToken::new("test-token"), Utc::now())
        .await
        .unwrap();

    assert!(issues.is_empty());
}

#[tokio::test]
async fn rejected_credentials_surface_as_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/issues"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&server)
        .await;

    let source = GitHubIssueSource::with_base_uri(server.uri());
    let result = source
        .fetch_assigned_issues(&AccessToken::new("expired"), Utc::now())
        .await;

    let error = result.unwrap_err();
    assert!(error.to_string().starts_with("Failed to fetch assigned issues"));
}

#[tokio::test]
async fn malformed_response_surfaces_as_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"number": 1}])))
        .mount(&server)
        .await;

    let source = GitHubIssueSource::with_base_uri(server.uri());
    let result = source
        .fetch_assigned_issues(&AccessToken::new("test-token"), Utc::now())
        .await;

    assert!(result.is_err());
}
