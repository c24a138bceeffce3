use std::sync::Arc;
use std::time::Duration;

use profiledeck_client::cache::CacheStore;
use profiledeck_client::ProfileClient;
use profiledeck_core::api::ProfileService;
use profiledeck_core::profile::{ListProfilesQuery, Profile, ProfileInput};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn profile_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "fullName": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "phoneNumber": "",
        "location": "London",
        "dateOfBirth": "1990-05-01T00:00:00.000Z",
        "createdAt": "2024-01-01T10:00:00Z",
        "updatedAt": "2024-01-02T10:00:00Z"
    })
}

fn page_json(profiles: Vec<serde_json::Value>, current: u32, total: u64) -> serde_json::Value {
    json!({
        "data": profiles,
        "pagination": {
            "currentPage": current,
            "totalPages": 99,
            "totalCount": total,
            "limit": 20,
            "hasNextPage": false,
            "hasPrevPage": false
        }
    })
}

fn cached_client(server: &MockServer) -> (ProfileClient, Arc<CacheStore>) {
    let cache = Arc::new(CacheStore::in_memory(100, Duration::from_secs(300)));
    (ProfileClient::with_cache(server.uri(), cache.clone()), cache)
}

#[tokio::test]
async fn test_list_profiles_rebuilds_descriptor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "20"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![profile_json(21, "Ada")], 2, 21)),
        )
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let result = client.list_profiles(&ListProfilesQuery::new(2, 20)).await;

    assert!(result.success);
    let page = result.data;
    assert_eq!(page.profiles.len(), 1);
    assert_eq!(page.profiles[0].id, "21");
    assert_eq!(page.profiles[0].phone_number, None);
    assert_eq!(page.page.total_pages(), 2);
    assert!(!page.page.has_next());
    assert!(page.page.has_previous());
}

#[tokio::test]
async fn test_list_profiles_sends_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("search", "ada"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 1, 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let result = client
        .list_profiles(&ListProfilesQuery::new(1, 20).with_search(" ada "))
        .await;

    assert!(result.success);
    assert_eq!(result.data.page.total_pages(), 1);
    assert_eq!(result.data.page.total_count(), 0);
}

#[tokio::test]
async fn test_server_error_message_is_used() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Database unavailable"})))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let result = client.list_profiles(&ListProfilesQuery::new(1, 20)).await;

    assert!(!result.success);
    assert_eq!(result.message, "Database unavailable");
    assert!(result.data.profiles.is_empty());
    assert_eq!(result.data.page.current_page(), 1);
}

#[tokio::test]
async fn test_generic_http_status_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let result = client.list_all_profiles().await;

    assert!(!result.success);
    assert_eq!(result.message, "HTTP error! status: 502");
    assert!(result.data.is_empty());
}

#[tokio::test]
async fn test_get_profile_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "User not found"})))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let result = client.get_profile("404").await;

    assert!(!result.success);
    assert_eq!(result.message, "User not found");
    assert_eq!(result.data, None);
}

#[tokio::test]
async fn test_get_profile_stringifies_numeric_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(7, "Grace")))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let result = client.get_profile("7").await;

    assert!(result.success);
    let profile = result.data.unwrap();
    assert_eq!(profile.id, "7");
    assert_eq!(profile.full_name, "Grace");
    assert_eq!(profile.date_of_birth.map(|d| d.to_string()).as_deref(), Some("1990-05-01"));
}

#[tokio::test]
async fn test_malformed_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let result = client.get_profile("1").await;

    assert!(!result.success);
    assert_eq!(result.message, "Malformed response");
    assert_eq!(result.data, Some(Profile::default()));
}

#[tokio::test]
async fn test_get_profile_server_error_keeps_placeholder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/9"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to fetch user"})))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let result = client.get_profile("9").await;

    assert!(!result.success);
    assert_eq!(result.message, "Failed to fetch user");
    assert_eq!(result.data, Some(Profile::default()));
}

#[tokio::test]
async fn test_get_profile_unreachable_keeps_placeholder() {
    let client = ProfileClient::new("http://127.0.0.1:1");
    let result = client.get_profile("9").await;

    assert!(!result.success);
    assert_eq!(result.data, Some(Profile::default()));
}

#[tokio::test]
async fn test_list_all_accepts_bare_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([profile_json(1, "Ada"), profile_json(2, "Grace")])),
        )
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let result = client.list_all_profiles().await;

    assert!(result.success);
    assert_eq!(result.data.len(), 2);
}

#[tokio::test]
async fn test_create_profile_sends_camel_case_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({
            "fullName": "Ada",
            "email": "ada@example.com",
            "location": "London"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(profile_json(1, "Ada")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let input = ProfileInput::new("Ada", "ada@example.com").with_location("London");
    let result = client.create_profile(&input).await;

    assert!(result.success);
    assert_eq!(result.data.id, "1");
}

#[tokio::test]
async fn test_create_profile_duplicate_email() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Email already exists"})))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let result = client
        .create_profile(&ProfileInput::new("Ada", "ada@example.com"))
        .await;

    assert!(!result.success);
    assert_eq!(result.message, "Email already exists");
    assert_eq!(result.data.id, "");
}

#[tokio::test]
async fn test_blank_input_never_reaches_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());
    let result = client.create_profile(&ProfileInput::new("Ada", "  ")).await;

    assert!(!result.success);
    assert_eq!(result.message, "Email is required");
}

#[tokio::test]
async fn test_delete_profile_maps_to_bool() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "User deleted successfully"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "User not found"})))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(mock_server.uri());

    let deleted = client.delete_profile("1").await;
    assert!(deleted.success);
    assert!(deleted.data);
    assert_eq!(deleted.message, "User deleted successfully");

    let missing = client.delete_profile("2").await;
    assert!(!missing.success);
    assert!(!missing.data);
    assert_eq!(missing.message, "User not found");
}

#[tokio::test]
async fn test_transport_failure_is_a_result() {
    // Nothing listens on port 1.
    let client = ProfileClient::new("http://127.0.0.1:1");
    let result = client.list_profiles(&ListProfilesQuery::new(1, 20)).await;

    assert!(!result.success);
    assert!(!result.message.is_empty());
    assert!(result.data.profiles.is_empty());
}

#[tokio::test]
async fn test_cached_reads_skip_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![profile_json(1, "Ada")], 1, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, cache) = cached_client(&mock_server);
    let query = ListProfilesQuery::new(1, 20);

    let first = client.list_profiles(&query).await;
    let second = client.list_profiles(&query).await;

    assert_eq!(first, second);
    assert_eq!(cache.stats().entries, 1);
}

#[tokio::test]
async fn test_failed_reads_are_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/9"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;

    let (client, cache) = cached_client(&mock_server);

    client.get_profile("9").await;
    client.get_profile("9").await;

    assert_eq!(cache.stats().entries, 0);
}
