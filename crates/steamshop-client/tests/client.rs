//! Integration tests for `StoreClient` endpoints using wiremock HTTP mocks.

use chrono::NaiveDate;
use serde_json::json;
use steamshop_client::{ClientError, StoreClient};
use steamshop_core::{
    Credentials, GameId, NewUser, ProfileDraft, ProfileEdit, PurchaseRequest, Session,
    SessionToken,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> StoreClient {
    StoreClient::with_base_url(base_url, 5, "steamshop-test/0.1")
        .expect("client construction should not fail")
}

fn signed_in() -> Session {
    Session::authenticated(SessionToken::new("tok-123"))
}

fn game_json(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "short",
        "category": ["action"],
        "price": 100,
        "discount": 20,
        "views": 10,
        "likes": 3,
        "quantity": 4,
        "imageSrc": format!("/img/{id}.png"),
        "releaseDate": "2024-01-01",
        "developer": "Dev",
        "publisher": "Pub",
        "platform": ["PC"],
        "features": ["Co-op"],
        "longDescription": "long"
    })
}

async fn assert_no_requests(server: &MockServer) {
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty(), "expected no requests, got {}", received.len());
}

#[tokio::test]
async fn login_returns_session_with_profile_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/user/login"))
        .and(body_json(json!({"username": "player_one", "password": "Secret#123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-123"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/profile"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Ada Lovelace",
            "age": 36,
            "bio": "",
            "username": "player_one",
            "user_id": 1
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let session = client
        .login(&Credentials {
            username: "player_one".to_string(),
            password: "Secret#123".to_string(),
        })
        .await
        .expect("login should succeed");

    assert!(session.is_authenticated());
    assert_eq!(session.token().map(SessionToken::expose), Some("tok-123"));
    assert_eq!(session.user_name(), Some("Ada Lovelace"));
}

#[tokio::test]
async fn login_survives_missing_profile() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-9"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user/profile"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Profile not found"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let session = client
        .login(&Credentials {
            username: "player_two".to_string(),
            password: "Secret#123".to_string(),
        })
        .await
        .expect("profile failure must not fail login");

    assert!(session.is_authenticated());
    assert!(session.user_name().is_none());
}

#[tokio::test]
async fn login_rejection_surfaces_detail_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/user/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .login(&Credentials {
            username: "player_one".to_string(),
            password: "wrong-pass".to_string(),
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err, ClientError::Api { status: 401, ref message } if message == "Invalid credentials"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn register_posts_new_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/user/register"))
        .and(body_json(json!({
            "username": "player_one",
            "password": "Secret#123",
            "email": "player@example.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let body = client
        .register(&NewUser {
            username: "player_one".to_string(),
            password: "Secret#123".to_string(),
            email: "player@example.com".to_string(),
        })
        .await
        .expect("register should succeed");
    assert_eq!(body["id"], 5);
}

#[tokio::test]
async fn create_profile_sends_name_and_age() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/user/profile/create"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "birth_date": "2000-06-15",
            "bio": "Engines",
            "name": "Ada Lovelace",
            "age": 24
        })))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let draft = ProfileDraft {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2000, 6, 15).unwrap(),
        bio: "Engines".to_string(),
    };
    let body = client
        .create_profile(&signed_in(), &draft, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
        .await
        .expect("create profile should succeed");
    assert!(body.is_null(), "empty body becomes null");
}

#[tokio::test]
async fn edit_profile_returns_updated_profile() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/user/profile/edit"))
        .and(body_json(json!({"name": "Ada L.", "age": 25, "bio": "New bio"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Ada L.",
            "age": 25,
            "bio": "New bio",
            "username": "player_one",
            "user_id": "1"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let profile = client
        .edit_profile(
            &signed_in(),
            &ProfileEdit {
                name: "Ada L.".to_string(),
                age: 25,
                bio: "New bio".to_string(),
            },
        )
        .await
        .expect("edit should succeed");
    assert_eq!(profile.name, "Ada L.");
    assert_eq!(profile.user_id, "1");
}

#[tokio::test]
async fn list_and_get_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([game_json(1, "Skyforge"), game_json(2, "Ember Saga")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(game_json(2, "Ember Saga")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let products = client.list_products().await.expect("list should succeed");
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|g| !g.liked));

    let game = client
        .get_product(&GameId::from(2))
        .await
        .expect("detail should succeed");
    assert_eq!(game.title, "Ember Saga");
    assert_eq!(game.quantity, 4);
}

#[tokio::test]
async fn missing_product_is_api_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_product(&GameId::from(404)).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, ClientError::Api { ref message, .. } if message == "Not Found"));
}

#[tokio::test]
async fn search_passes_query_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/search"))
        .and(query_param("query", "sky forge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([game_json(1, "Skyforge")])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let hits = client
        .search_products("sky forge")
        .await
        .expect("search should succeed");
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn malformed_product_list_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_products().await.unwrap_err();
    assert!(matches!(err, ClientError::Deserialize { ref context, .. } if context == "products"));
}

#[tokio::test]
async fn toggle_like_returns_new_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/products/7/like"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"likes": 8, "liked": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let toggle = client
        .toggle_like(&signed_in(), &GameId::from(7))
        .await
        .expect("toggle should succeed");
    assert_eq!(toggle.likes, 8);
    assert!(toggle.liked);
}

#[tokio::test]
async fn protected_calls_without_token_send_nothing() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());
    let anonymous = Session::anonymous();

    let like = client.toggle_like(&anonymous, &GameId::from(1)).await;
    let likes = client.list_likes(&anonymous).await;
    let history = client.purchase_history(&anonymous).await;
    let recs = client.recommendations(&anonymous).await;
    let profile = client.fetch_profile(&anonymous).await;
    let purchase = client
        .purchase(
            &anonymous,
            &PurchaseRequest {
                product_id: GameId::from(1),
                quantity: 1,
            },
        )
        .await;

    assert!(matches!(like, Err(ClientError::NotAuthenticated)));
    assert!(matches!(likes, Err(ClientError::NotAuthenticated)));
    assert!(matches!(history, Err(ClientError::NotAuthenticated)));
    assert!(matches!(recs, Err(ClientError::NotAuthenticated)));
    assert!(matches!(profile, Err(ClientError::NotAuthenticated)));
    assert!(matches!(purchase, Err(ClientError::NotAuthenticated)));
    assert_no_requests(&server).await;
}

#[tokio::test]
async fn purchase_posts_quantity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/products/3/purchase"))
        .and(body_json(json!({"quantity": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .purchase(
            &signed_in(),
            &PurchaseRequest {
                product_id: GameId::from(3),
                quantity: 2,
            },
        )
        .await
        .expect("purchase should succeed");
}

#[tokio::test]
async fn purchase_history_parses_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"user_id": "u1", "product_id": "3", "quantity": 2, "total_price": 50, "title": "Skyforge"}
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let history = client
        .purchase_history(&signed_in())
        .await
        .expect("history should succeed");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].product_id, GameId::from(3));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // port 1 on localhost refuses connections
    let client = test_client("http://127.0.0.1:1");
    let err = client.list_products().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "got {err:?}");
}
