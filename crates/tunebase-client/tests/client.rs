//! Client tests against a mocked service.

use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tunebase_client::{ClientError, ListQuery, RegisterRequest, Resource, TunebaseClient};

fn failure(code: &str, error: &str) -> Value {
    json!({"status": "FAILED", "data": {"code": code, "error": error}})
}

fn document(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("not an object"),
    }
}

#[tokio::test]
async fn register_returns_user_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .and(body_json(json!({
            "nombre": "Ana",
            "email": "ana@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "OK",
            "data": {
                "user": {
                    "id_usuario": "u-1",
                    "nombre": "Ana",
                    "email": "ana@example.com",
                    "suscripcion": "free",
                    "playlists_ids": [],
                    "isAdmin": false
                },
                "token": "tok-1"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap();
    let auth = client
        .register(&RegisterRequest::new("Ana", "ana@example.com", "secret"))
        .await
        .unwrap();

    assert_eq!(auth.user.id, "u-1");
    assert_eq!(auth.user.subscription.as_deref(), Some("free"));
    assert_eq!(auth.token, "tok-1");
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(failure("conflict", "email already taken")),
        )
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap();
    let err = client
        .register(&RegisterRequest::new("Ana", "ana@example.com", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Conflict(ref msg) if msg == "email already taken"));
    assert_eq!(err.status(), Some(409));
}

#[tokio::test]
async fn wrong_password_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(failure("bad_request", "incorrect password")),
        )
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap();
    let err = client.login("ana@example.com", "nope").await.unwrap_err();

    match err {
        ClientError::Api {
            code,
            message,
            status,
        } => {
            assert_eq!(code, "bad_request");
            assert_eq!(message, "incorrect password");
            assert_eq!(status, 400);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn renew_sends_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/renew"))
        .and(header("x-token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "data": {"uid": "u-1", "name": "Ana", "email": "ana@example.com", "token": "tok-2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap().with_token("tok-1");
    let renewed = client.renew().await.unwrap();

    assert_eq!(renewed.uid, "u-1");
    assert_eq!(renewed.token, "tok-2");
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/renew"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(failure("unauthorized", "missing token")),
        )
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap();
    let err = client.renew().await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized(_)));
}

#[tokio::test]
async fn list_passes_filters_and_reads_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/music/songs"))
        .and(query_param("artista", "Queen"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "total": 3,
            "data": [{"id_cancion": "s-2", "titulo": "Bohemian Rhapsody", "artista": "Queen"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap();
    let query = ListQuery::new().param("artista", "Queen").page(2).limit(1);
    let page = client.list(Resource::Songs, &query).await.unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0]["id_cancion"], "s-2");
}

#[tokio::test]
async fn playlists_by_user_uses_owner_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/music/playlists/user/u-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "total": 0,
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap();
    let page = client.playlists_by_user("u-1").await.unwrap();

    assert_eq!(page.total, 0);
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn unknown_record_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/music/playlists/p-9"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(failure("not_found", "playlist 'p-9' does not exist")),
        )
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap();
    let err = client.get(Resource::Playlists, "p-9").await.unwrap_err();

    assert!(matches!(err, ClientError::NotFound(ref msg) if msg.contains("p-9")));
}

#[tokio::test]
async fn create_song_returns_stored_record() {
    let server = MockServer::start().await;
    let body = json!({"titulo": "Song", "artista": "Band", "album": "A", "duracion_segundos": 200, "genero": "Rock"});
    Mock::given(method("POST"))
        .and(path("/api/v1/music/songs"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "OK",
            "data": {"id_cancion": "s-1", "titulo": "Song", "artista": "Band"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap();
    let created = client.create_song(&document(body)).await.unwrap();

    assert_eq!(created["id_cancion"], "s-1");
}

#[tokio::test]
async fn update_patches_record() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/music/users/u-1"))
        .and(body_json(json!({"suscripcion": "premium"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "data": {"id_usuario": "u-1", "suscripcion": "premium"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap();
    let updated = client
        .update(
            Resource::Users,
            "u-1",
            &document(json!({"suscripcion": "premium"})),
        )
        .await
        .unwrap();

    assert_eq!(updated["suscripcion"], "premium");
}

#[tokio::test]
async fn delete_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/music/songs/s-1"))
        .and(header("x-token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "msg": "song deleted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap().with_token("tok-1");
    let msg = client.delete(Resource::Songs, "s-1").await.unwrap();

    assert_eq!(msg, "song deleted");
}

#[tokio::test]
async fn non_envelope_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = TunebaseClient::new(server.uri()).unwrap();
    let err = client.health().await.unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 502, ref code, .. } if code == "unknown"));
}
