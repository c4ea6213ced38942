//! Request gateway against a local stub server.

mod support;

use std::sync::Arc;

use botgate::adapter::outbound::api::ApiClient;
use botgate::application::credential::CredentialStore;
use botgate::application::session::Session;
use botgate::domain::{
    BotAuthMethod, BotId, ConnectionTest, Credential, ExternalBotConnect, SubscriptionRequest,
    TerminalCommand,
};
use botgate::error::Error;
use botgate::testkit::storage::MemoryCredentialStorage;
use serde_json::{json, Value};
use support::http::StubServer;
use url::Url;

fn client(server: &StubServer, token: Option<&str>) -> ApiClient {
    let storage = match token {
        Some(token) => MemoryCredentialStorage::with_token(token),
        None => MemoryCredentialStorage::new(),
    };
    ApiClient::new(server.url(), CredentialStore::load(storage).unwrap())
}

#[tokio::test]
async fn log_tail_defaults_to_one_hundred() {
    let server = StubServer::start().await;
    server.respond(200, r#"{"logs":["a","b"]}"#);
    let api = client(&server, Some("tok"));

    let body = api.get_bot_logs(&BotId::new("7"), None).await.unwrap();

    assert_eq!(body["logs"][1], "b");
    let request = server.last_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.target, "/api/v1/bots/7/logs?tail=100");
    assert_eq!(request.header("authorization"), Some("Bearer tok"));
}

#[tokio::test]
async fn trade_limit_defaults_to_fifty() {
    let server = StubServer::start().await;
    let api = client(&server, Some("tok"));

    api.get_bot_trades(&BotId::new("7"), None).await.unwrap();
    api.get_external_bot_trades(&BotId::new("ext-1"), Some(5))
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].target, "/api/v1/bots/7/trades?limit=50");
    assert_eq!(requests[1].target, "/api/v1/external-bots/ext-1/trades?limit=5");
}

#[tokio::test]
async fn absent_credential_sends_no_authorization() {
    let server = StubServer::start().await;
    let api = client(&server, None);

    api.get_bots().await.unwrap();

    assert_eq!(server.last_request().header("authorization"), None);
}

#[tokio::test]
async fn credential_change_applies_to_later_requests() {
    let server = StubServer::start().await;
    let api = client(&server, Some("first"));

    api.get_bots().await.unwrap();
    api.set_auth_header(Some(Credential::new("second")));
    api.get_bots().await.unwrap();
    api.set_auth_header(None);
    api.get_bots().await.unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].header("authorization"), Some("Bearer first"));
    assert_eq!(requests[1].header("authorization"), Some("Bearer second"));
    assert_eq!(requests[2].header("authorization"), None);
}

#[tokio::test]
async fn rejection_carries_status_and_body() {
    let server = StubServer::start().await;
    server.respond(401, r#"{"detail":"Could not validate credentials"}"#);
    let api = client(&server, Some("stale"));

    let err = api.get_bot(&BotId::new("7")).await.unwrap_err();

    match err {
        Error::Remote { status, ref body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Could not validate credentials"));
        }
        other => panic!("expected remote rejection, got {other:?}"),
    }
    assert!(err.is_unauthorized());
    // The gateway never clears the credential on its own.
    assert_eq!(api.store().get(), Some(Credential::new("stale")));
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let server = StubServer::start().await;
    server.respond(200, "");
    let api = client(&server, Some("tok"));

    let body = api.delete_bot(&BotId::new("7")).await.unwrap();

    assert_eq!(body, Value::Null);
    assert_eq!(server.last_request().method, "DELETE");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let store = CredentialStore::load(MemoryCredentialStorage::new()).unwrap();
    let api = ApiClient::new(Url::parse(&format!("http://{addr}")).unwrap(), store);

    let err = api.get_bots().await.unwrap_err();

    assert!(matches!(err, Error::Http(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn login_is_form_encoded_and_anonymous() {
    let server = StubServer::start().await;
    server.respond(200, r#"{"access_token":"issued","token_type":"bearer"}"#);
    let api = client(&server, Some("old"));
    let session = Session::new(Arc::new(api.clone()), api.store().clone());

    session.login("me@example.com", "s3cret").await.unwrap();

    let request = server.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/api/v1/auth/token");
    assert_eq!(
        request.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.body, "username=me%40example.com&password=s3cret");
    assert_eq!(request.header("authorization"), None);

    api.get_bots().await.unwrap();
    assert_eq!(
        server.last_request().header("authorization"),
        Some("Bearer issued")
    );
}

#[tokio::test]
async fn register_posts_json_then_signs_in() {
    let server = StubServer::start().await;
    server.respond(200, r#"{"id":1,"email":"new@example.com"}"#);
    server.respond(200, r#"{"access_token":"issued"}"#);
    let api = client(&server, None);
    let session = Session::new(Arc::new(api.clone()), api.store().clone());

    session
        .register(&botgate::domain::RegisterRequest {
            email: "new@example.com".into(),
            password: "pw".into(),
            full_name: Some("New User".into()),
        })
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].target, "/api/v1/auth/register");
    let body: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(
        body,
        json!({"email": "new@example.com", "password": "pw", "full_name": "New User"})
    );
    assert_eq!(requests[1].target, "/api/v1/auth/token");
    assert_eq!(api.store().get(), Some(Credential::new("issued")));
}

#[tokio::test]
async fn terminal_command_body() {
    let server = StubServer::start().await;
    let api = client(&server, Some("tok"));

    api.execute_terminal_command(
        &BotId::new("ext-1"),
        &TerminalCommand::new("forcesell").with_args(["3"]),
    )
    .await
    .unwrap();
    api.execute_terminal_command(&BotId::new("ext-1"), &TerminalCommand::new("status"))
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].target, "/api/v1/external-bots/ext-1/terminal/command");
    let first: Value = serde_json::from_str(&requests[0].body).unwrap();
    let second: Value = serde_json::from_str(&requests[1].body).unwrap();
    assert_eq!(first, json!({"command": "forcesell", "args": ["3"]}));
    assert_eq!(second, json!({"command": "status", "args": []}));
}

#[tokio::test]
async fn bot_config_update_uses_put() {
    let server = StubServer::start().await;
    let api = client(&server, Some("tok"));

    api.update_bot_config(&BotId::new("7"), &json!({"stake_amount": 10}))
        .await
        .unwrap();

    let request = server.last_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.target, "/api/v1/bots/7/config");
    assert_eq!(request.body, r#"{"stake_amount":10}"#);
}

#[tokio::test]
async fn external_bot_lifecycle_paths() {
    let server = StubServer::start().await;
    let api = client(&server, Some("tok"));
    let id = BotId::new("ext-1");
    let connection = ConnectionTest {
        api_url: "http://10.0.0.2:8080".into(),
        auth_method: BotAuthMethod::Token,
        api_token: Some("bot-token".into()),
        username: None,
        password: None,
    };

    api.test_bot_connection(&connection).await.unwrap();
    api.connect_external_bot(&ExternalBotConnect {
        name: "home".into(),
        description: None,
        connection,
    })
    .await
    .unwrap();
    api.ping_bot(&id).await.unwrap();
    api.reload_bot_config(&id).await.unwrap();
    api.disconnect_external_bot(&id).await.unwrap();

    let requests = server.requests();
    let seen: Vec<(&str, &str)> = requests
        .iter()
        .map(|r| (r.method.as_str(), r.target.as_str()))
        .collect();
    assert_eq!(
        seen,
        vec![
            ("POST", "/api/v1/external-bots/test-connection"),
            ("POST", "/api/v1/external-bots/connect"),
            ("GET", "/api/v1/external-bots/ext-1/ping"),
            ("POST", "/api/v1/external-bots/ext-1/reload"),
            ("DELETE", "/api/v1/external-bots/ext-1"),
        ]
    );
    let connect: Value = serde_json::from_str(&requests[1].body).unwrap();
    assert_eq!(connect["name"], "home");
    assert_eq!(connect["auth_method"], "token");
    assert_eq!(connect["api_token"], "bot-token");
}

#[tokio::test]
async fn subscription_body() {
    let server = StubServer::start().await;
    let api = client(&server, Some("tok"));

    api.subscribe_to_shared_bot(&SubscriptionRequest {
        shared_bot_id: "shared-9".into(),
        allocation_amount: 250.0,
    })
    .await
    .unwrap();

    let request = server.last_request();
    assert_eq!(request.target, "/api/v1/shared-bots/subscribe");
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, json!({"shared_bot_id": "shared-9", "allocation_amount": 250.0}));
}
