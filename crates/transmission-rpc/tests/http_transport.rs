//! Session token handshake and retry behaviour of [`HttpTransport`] against a mock daemon.

#![allow(unused_crate_dependencies)]
#![allow(missing_docs)]

use transmission_rpc::{Credentials, HttpTransport, RPC_PATH, SESSION_ID_HEADER};
use transmission_types::RpcError;
use wiremock::matchers::{basic_auth, body_string, header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

fn rpc() -> MockBuilder {
    Mock::given(method("POST")).and(path(RPC_PATH))
}

fn conflict(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(409).insert_header(SESSION_ID_HEADER, token)
}

fn ok(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_owned(), "application/json")
}

fn transport(server: &MockServer) -> HttpTransport {
    HttpTransport::try_new(&server.uri(), None).unwrap()
}

mod token {
    use super::*;

    #[tokio::test]
    async fn stores_handed_out_token() {
        let server = MockServer::start().await;
        rpc()
            .and(body_string(""))
            .respond_with(conflict("test-token-123"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server);
        let token = transport.ensure_token().await.unwrap();

        assert_eq!(token, "test-token-123");
        assert_eq!(
            transport.session_token().await.as_deref(),
            Some("test-token-123")
        );
    }

    #[tokio::test]
    async fn server_error() {
        let server = MockServer::start().await;
        rpc()
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let transport = transport(&server);
        let err = transport.ensure_token().await.unwrap_err();

        assert!(err.to_string().contains("status code: 500"));
        assert_eq!(transport.session_token().await, None);
    }

    #[tokio::test]
    async fn bad_response() {
        let server = MockServer::start().await;
        rpc().respond_with(ResponseTemplate::new(200)).mount(&server).await;

        let transport = transport(&server);
        let err = transport.ensure_token().await.unwrap_err();

        assert!(
            err.to_string()
                .contains("unexpected response trying to obtain token, status code: 200")
        );
        assert_eq!(transport.session_token().await, None);
    }

    #[tokio::test]
    async fn auth_failure_keeps_previous_token() {
        let server = MockServer::start().await;
        rpc().respond_with(ResponseTemplate::new(401)).mount(&server).await;

        let transport = transport(&server).with_session_token("previous");
        let err = transport.ensure_token().await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("authorization failed"));
        assert_eq!(transport.session_token().await.as_deref(), Some("previous"));
    }

    #[tokio::test]
    async fn probe_sends_credentials() {
        let server = MockServer::start().await;
        rpc()
            .and(basic_auth("testuser", "testpass"))
            .respond_with(conflict("authed-token"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::try_new(
            &server.uri(),
            Some(Credentials::new("testuser", "testpass")),
        )
        .unwrap();

        assert_eq!(transport.ensure_token().await.unwrap(), "authed-token");
    }
}

mod execute {
    use super::*;

    #[tokio::test]
    async fn existing_token_is_sent_without_probe() {
        let server = MockServer::start().await;
        rpc()
            .and(header(SESSION_ID_HEADER, "existing-token-123"))
            .and(body_string(r#"{"method":"test"}"#))
            .respond_with(ok(r#"{"result":"success"}"#))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        rpc()
            .respond_with(conflict("unexpected"))
            .expect(0)
            .mount(&server)
            .await;

        let transport = transport(&server).with_session_token("existing-token-123");
        let body = transport.execute(br#"{"method":"test"}"#).await.unwrap();

        assert_eq!(body, br#"{"result":"success"}"#.to_vec());
    }

    #[tokio::test]
    async fn missing_token_is_probed_once() {
        let server = MockServer::start().await;
        rpc()
            .and(header(SESSION_ID_HEADER, "new-token-456"))
            .respond_with(ok(r#"{"result":"success"}"#))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        rpc()
            .and(body_string(""))
            .respond_with(conflict("new-token-456"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server);
        let body = transport.execute(br#"{"method":"test"}"#).await.unwrap();

        assert_eq!(body, br#"{"result":"success"}"#.to_vec());
        assert_eq!(
            transport.session_token().await.as_deref(),
            Some("new-token-456")
        );
    }

    #[tokio::test]
    async fn failed_probe_propagates() {
        let server = MockServer::start().await;
        rpc()
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .expect(1)
            .mount(&server)
            .await;

        let err = transport(&server)
            .execute(br#"{"test":"data"}"#)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("trying to obtain token"));
    }

    #[tokio::test]
    async fn rotated_token_is_retried_once() {
        let server = MockServer::start().await;
        rpc()
            .and(header(SESSION_ID_HEADER, "new-token-456"))
            .respond_with(ok(r#"{"result":"success"}"#))
            .expect(1)
            .mount(&server)
            .await;
        rpc()
            .and(header(SESSION_ID_HEADER, "stale-token"))
            .respond_with(conflict("new-token-456"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server).with_session_token("stale-token");
        let body = transport.execute(br#"{"method":"test"}"#).await.unwrap();

        assert_eq!(body, br#"{"result":"success"}"#.to_vec());
        assert_eq!(
            transport.session_token().await.as_deref(),
            Some("new-token-456")
        );
    }

    #[tokio::test]
    async fn second_invalidation_is_not_retried() {
        let server = MockServer::start().await;
        rpc()
            .respond_with(conflict("always-new"))
            .expect(2)
            .mount(&server)
            .await;

        let transport = transport(&server).with_session_token("stale-token");
        let err = transport.execute(br#"{"method":"test"}"#).await.unwrap_err();

        assert!(matches!(err, RpcError::Transport { status: Some(409), .. }));
    }

    #[tokio::test]
    async fn unauthorized_request() {
        let server = MockServer::start().await;
        rpc().respond_with(ResponseTemplate::new(401)).mount(&server).await;

        let transport = transport(&server).with_session_token("test-token-123");
        let err = transport.execute(br#"{"method":"test"}"#).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("request failed: authentication error"));
        assert_eq!(
            transport.session_token().await.as_deref(),
            Some("test-token-123")
        );
    }

    #[tokio::test]
    async fn error_status_carries_code_and_body() {
        let server = MockServer::start().await;
        rpc()
            .respond_with(ResponseTemplate::new(503).set_body_string("daemon is busy"))
            .mount(&server)
            .await;

        let transport = transport(&server).with_session_token("test-token-123");
        let err = transport.execute(br#"{"method":"test"}"#).await.unwrap_err();

        assert_eq!(err.status_code(), Some(503));
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("daemon is busy"));
    }

    #[tokio::test]
    async fn empty_body() {
        let server = MockServer::start().await;
        rpc().respond_with(ResponseTemplate::new(200)).mount(&server).await;

        let transport = transport(&server).with_session_token("test-token-123");
        let body = transport.execute(br#"{"method":"test"}"#).await.unwrap();

        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn credentials_are_sent() {
        let server = MockServer::start().await;
        rpc()
            .and(basic_auth("testuser", "testpass"))
            .and(header(SESSION_ID_HEADER, "test-token-123"))
            .respond_with(ok(r#"{"result":"success"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::try_new(
            &server.uri(),
            Some(Credentials::new("testuser", "testpass")),
        )
        .unwrap()
        .with_session_token("test-token-123");

        assert!(transport.execute(br#"{"method":"test"}"#).await.is_ok());
    }

    #[tokio::test]
    async fn network_failure() {
        let transport = HttpTransport::try_new("http://127.0.0.1:1", None)
            .unwrap()
            .with_session_token("test-token-123");
        let err = transport.execute(br#"{"method":"test"}"#).await.unwrap_err();

        assert!(matches!(err, RpcError::Transport { status: None, .. }));
    }

    #[tokio::test]
    async fn concurrent_requests_each_retry_once() {
        let server = MockServer::start().await;
        rpc()
            .and(header(SESSION_ID_HEADER, "fresh-token"))
            .respond_with(ok(r#"{"result":"success"}"#))
            .expect(2)
            .mount(&server)
            .await;
        rpc()
            .and(header(SESSION_ID_HEADER, "stale-token"))
            .respond_with(conflict("fresh-token"))
            .expect(2)
            .mount(&server)
            .await;

        let transport = transport(&server).with_session_token("stale-token");
        let (first, second) = tokio::join!(
            transport.execute(br#"{"method":"session-get"}"#),
            transport.execute(br#"{"method":"session-stats"}"#),
        );

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(
            transport.session_token().await.as_deref(),
            Some("fresh-token")
        );
    }
}
