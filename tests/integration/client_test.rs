//! Integration tests for the REST client against a mock server
//!
//! These tests verify the login exchange, the headers every call carries,
//! and how responses are classified.

use crate::test_utils::constants::*;
use crate::test_utils::mocks::{authed_client, mock_login};
use abs_probe::api::{open_session, AbsClient, ApiError, Body, ItemsQuery};
use abs_probe::config::Settings;
use mockito::{Matcher, Server};
use reqwest::StatusCode;
use serde_json::json;

#[cfg(test)]
mod client_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_authenticate_stores_token() {
        let mut server = Server::new_async().await;
        let login = mock_login(&mut server).await;

        let mut client = AbsClient::new(&server.url());
        let response = client.authenticate(TEST_USERNAME, TEST_PASSWORD).await.unwrap();

        assert_eq!(response.user.token, TEST_TOKEN);
        assert_eq!(client.token(), Some(TEST_TOKEN));
        login.assert_async().await;
    }

    #[tokio::test]
    async fn test_every_verb_carries_login_token() {
        let mut server = Server::new_async().await;
        mock_login(&mut server).await;
        let bearer = format!("Bearer {}", TEST_TOKEN);

        let mut mocks = Vec::new();
        for (method, path) in [
            ("GET", "/api/libraries"),
            ("POST", "/api/collections"),
            ("PATCH", "/api/collections/c1"),
            ("DELETE", "/api/collections/c1"),
        ] {
            let mock = server
                .mock(method, path)
                .match_header("authorization", bearer.as_str())
                .match_header("content-type", "application/json")
                .with_status(200)
                .with_body("{}")
                .create_async()
                .await;
            mocks.push(mock);
        }

        let mut client = AbsClient::new(&server.url());
        client.authenticate(TEST_USERNAME, TEST_PASSWORD).await.unwrap();

        client.get("/api/libraries", None).await.unwrap();
        client.post("/api/collections", &json!({"name": "x"})).await.unwrap();
        client.patch("/api/collections/c1", &json!({"name": "y"})).await.unwrap();
        client.delete("/api/collections/c1").await.unwrap();

        for mock in mocks {
            mock.assert_async().await;
        }
    }

    #[tokio::test]
    async fn test_login_without_token_field_fails() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(200)
            .with_body(r#"{"user": {"id": "root"}}"#)
            .create_async()
            .await;

        let mut client = AbsClient::new(&server.url());
        let result = client.authenticate(TEST_USERNAME, TEST_PASSWORD).await;

        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let mut client = AbsClient::new(&server.url());
        let result = client.authenticate(TEST_USERNAME, "wrong").await;

        match result {
            Err(ApiError::Authentication(msg)) => assert!(msg.contains("Unauthorized")),
            other => panic!("expected authentication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Nothing listens on port 1.
        let mut client = AbsClient::new("http://127.0.0.1:1");
        let result = client.authenticate(TEST_USERNAME, TEST_PASSWORD).await;
        assert!(matches!(result, Err(ApiError::Network(_))));

        let client = client.with_token(TEST_TOKEN);
        let result = client.get("/api/libraries", None).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_is_not_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/libraries/no-such-library")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let client = authed_client(&server);
        let response = client.library("no-such-library").await.unwrap();

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, Body::Invalid("Not Found".to_string()));
        assert!(response.json().is_none());
    }

    #[tokio::test]
    async fn test_empty_body_is_classified() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/api/collections/c1")
            .with_status(200)
            .create_async()
            .await;

        let client = authed_client(&server);
        let response = client.delete_collection("c1").await.unwrap();

        assert!(response.is_success());
        assert_eq!(response.body, Body::Empty);
    }

    #[tokio::test]
    async fn test_no_query_string_without_params() {
        let mut server = Server::new_async().await;
        // The path matcher covers the query too, so a stray `?` would miss.
        let items = server
            .mock("GET", "/api/libraries/lib1/items")
            .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
            .with_status(200)
            .with_body(r#"{"results": []}"#)
            .expect(3)
            .create_async()
            .await;

        let client = authed_client(&server);
        let empty: Vec<(&str, String)> = Vec::new();
        client.get("/api/libraries/lib1/items", None).await.unwrap();
        client.get("/api/libraries/lib1/items", Some(&empty[..])).await.unwrap();
        client.library_items("lib1", &ItemsQuery::default()).await.unwrap();

        items.assert_async().await;
    }

    #[tokio::test]
    async fn test_item_query_is_sent() {
        let mut server = Server::new_async().await;
        let items = server
            .mock("GET", "/api/libraries/lib1/items")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "4".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"results": [{"id": "li_1"}, {"id": "li_2"}], "total": 2}"#)
            .create_async()
            .await;

        let client = authed_client(&server);
        let query = ItemsQuery { limit: Some(4), page: Some(1), ..Default::default() };
        let ids = client.library_item_ids("lib1", &query).await.unwrap();

        assert_eq!(ids, vec!["li_1", "li_2"]);
        items.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_batch_is_accepted() {
        let mut server = Server::new_async().await;
        let add = server
            .mock("POST", "/api/collections/c1/batch/add")
            .match_body(Matcher::Json(json!({"books": []})))
            .with_status(200)
            .with_body(r#"{"id": "c1", "books": []}"#)
            .create_async()
            .await;
        let remove = server
            .mock("POST", "/api/collections/c1/batch/remove")
            .match_body(Matcher::Json(json!({"books": []})))
            .with_status(200)
            .with_body(r#"{"id": "c1", "books": []}"#)
            .create_async()
            .await;

        let client = authed_client(&server);
        let added = client.collection_batch_add("c1", &[]).await.unwrap();
        let removed = client.collection_batch_remove("c1", &[]).await.unwrap();

        assert!(added.is_success() && removed.is_success());
        add.assert_async().await;
        remove.assert_async().await;
    }

    #[tokio::test]
    async fn test_ping_needs_no_token() {
        let mut server = Server::new_async().await;
        let ping = server
            .mock("GET", "/ping")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = AbsClient::new(&server.url());
        let response = client.ping().await.unwrap();

        assert_eq!(response.json(), Some(&json!({"success": true})));
        ping.assert_async().await;
    }

    #[tokio::test]
    async fn test_open_session_saves_fresh_token() {
        let mut server = Server::new_async().await;
        mock_login(&mut server).await;

        let mut settings = Settings {
            server_url: server.url(),
            username: Some(TEST_USERNAME.to_string()),
            token: Some("stale".to_string()),
            ..Settings::default()
        };
        let client = open_session(&mut settings, Some(TEST_PASSWORD)).await.unwrap();

        assert_eq!(client.token(), Some(TEST_TOKEN));
        assert_eq!(settings.token.as_deref(), Some(TEST_TOKEN));
    }

    #[tokio::test]
    async fn test_open_session_reuses_stored_token() {
        let mut settings = Settings {
            token: Some(TEST_TOKEN.to_string()),
            ..Settings::default()
        };
        let client = open_session(&mut settings, None).await.unwrap();
        assert_eq!(client.token(), Some(TEST_TOKEN));

        let mut nothing = Settings::default();
        assert!(matches!(
            open_session(&mut nothing, None).await,
            Err(ApiError::Authentication(_))
        ));
    }
}
