use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use recall_api::{config::Environment, router, state::ApiState};
use recall_gateway::Gateway;
use serde::Deserialize;
use tower::ServiceExt;
use wiremock::MockServer;

/// A mock remote service plus application state wired to it.
pub struct TestGateway {
    pub server: MockServer,
    pub state: ApiState,
}

impl TestGateway {
    /// Start a mock service and point fresh state at it.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let gateway = Gateway::new(&server.uri(), "test-service-role-key")
            .expect("mock server URI should parse");

        let state = ApiState {
            gateway,
            environment: Environment::Development,
        };

        Self { server, state }
    }

    /// Client for the full application router over this state.
    pub fn client(&self) -> TestClient {
        TestClient::new(router::router().with_state(self.state.clone()))
    }

    /// Number of requests the mock service has received so far.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |reqs| reqs.len())
    }
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a GET request with a raw `Authorization` header value
    pub async fn get_with_header(&self, uri: &str, authorization: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", authorization)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a GET request with a bearer token
    pub async fn get_with_auth(&self, uri: &str, token: &str) -> TestResponse {
        self.get_with_header(uri, &format!("Bearer {token}")).await
    }

    /// Send a POST request with no body
    pub async fn post(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with a bearer token and no body
    pub async fn post_with_auth(&self, uri: &str, token: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body
    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body and a bearer token
    pub async fn post_json_with_auth<T: serde::Serialize>(
        &self,
        uri: &str,
        body: &T,
        token: &str,
    ) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(json_body))
            .expect("Failed to build authenticated request");

        self.request(request).await
    }

    /// Send a PUT request with JSON body and a bearer token
    pub async fn put_json_with_auth<T: serde::Serialize>(
        &self,
        uri: &str,
        body: &T,
        token: &str,
    ) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(json_body))
            .expect("Failed to build authenticated request");

        self.request(request).await
    }

    /// Send a DELETE request with a bearer token
    pub async fn delete_with_auth(&self, uri: &str, token: &str) -> TestResponse {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build authenticated request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }
}

/// Mock endpoint helpers for the remote service
pub mod gateway {
    use serde_json::{Value, json};
    use uuid::Uuid;
    use wiremock::matchers::{bearer_token, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Identity record the mock introspection endpoint hands back
    pub fn user_json(user_id: Uuid) -> Value {
        json!({
            "id": user_id,
            "aud": "authenticated",
            "role": "authenticated",
            "email": "student@example.com",
            "created_at": "2026-01-10T09:00:00Z",
            "updated_at": "2026-01-10T09:00:00Z"
        })
    }

    /// Session body the mock sign-up/sign-in endpoints hand back
    pub fn session_json(user_id: Uuid) -> Value {
        json!({
            "access_token": "jwt-abc",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-xyz",
            "user": user_json(user_id)
        })
    }

    /// Mount token introspection resolving `token` to `user_id`
    pub async fn mount_get_user(server: &MockServer, token: &str, user_id: Uuid) {
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(bearer_token(token))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(user_id)))
            .mount(server)
            .await;
    }

    /// Mount token introspection rejecting every token
    pub async fn mount_get_user_rejection(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "msg": "invalid JWT"
            })))
            .mount(server)
            .await;
    }
}
