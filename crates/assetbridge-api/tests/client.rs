//! DAM client behaviour against a mock API endpoint

use std::time::Duration;

use assetbridge_api::{sign, ApiError, DamClient, SearchResponse};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "s3cret";

fn client(server: &MockServer) -> DamClient {
    DamClient::new(
        format!("{}/api/?", server.uri()),
        "admin",
        SECRET,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_search_sends_signed_query() {
    let server = MockServer::start().await;

    let expected_query = "user=admin&function=search_get_previews&param1=red+car&param2=\
                          &param3=&param4=&param5=-1&param6=desc&param7=&param8=thm,scr&param9=";

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("function", "search_get_previews"))
        .and(query_param("param1", "red car"))
        .and(query_param("param8", "thm,scr"))
        .and(query_param("sign", sign(SECRET, expected_query).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"ref":"7","field8":"Red car","url_thm":"t","url_scr":"s",
                "file_extension":"png","file_modified":"2021-06-01 12:00:00"}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let items = client(&server).search("red car").await.unwrap().into_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].resource_ref, "7");
    assert_eq!(items[0].file_extension, "png");
}

#[tokio::test]
async fn test_search_error_object_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"error":"No matching resources"}"#),
        )
        .mount(&server)
        .await;

    let response = client(&server).search("nothing").await.unwrap();
    assert_eq!(response, SearchResponse::Empty);
}

#[tokio::test]
async fn test_search_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client(&server).search("cat").await;
    assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_resolve_path() {
    let server = MockServer::start().await;

    let expected_query = "user=admin&function=get_resource_path&param1=12&param2\
                          &param3=&param4=&param5=jpg&param6=&param7=&param8=";

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("function", "get_resource_path"))
        .and(query_param("param1", "12"))
        .and(query_param("param5", "jpg"))
        .and(query_param("sign", sign(SECRET, expected_query).as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#""https://files.example.com/filestore/12_abc.jpg""#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = client(&server).resolve_path("12", "jpg").await.unwrap();
    assert_eq!(url, "https://files.example.com/filestore/12_abc.jpg");
}

#[tokio::test]
async fn test_resolve_path_rejects_non_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("false"))
        .mount(&server)
        .await;

    let result = client(&server).resolve_path("12", "jpg").await;
    assert!(matches!(result, Err(ApiError::UnexpectedResponse(_))));
}
