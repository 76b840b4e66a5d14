#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    http::{HeaderMap, StatusCode, Uri, header::AUTHORIZATION},
    routing::{MethodFilter, on},
};
use axum_test::TestServer;
use party_backend::{AppState, config::Config, routes::create_router};
use serde_json::Value;

/// A request received by the stub upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// A local HTTP server standing in for every third-party API.
pub struct Stub {
    pub base_url: String,
    requests: Arc<Mutex<HashMap<String, Vec<Recorded>>>>,
}

impl Stub {
    pub fn requests(&self, path: &str) -> Vec<Recorded> {
        self.requests
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests(path).len()
    }
}

pub struct StubBuilder {
    routes: Vec<(MethodFilter, &'static str, StatusCode, Value)>,
}

pub fn stub() -> StubBuilder {
    StubBuilder { routes: Vec::new() }
}

impl StubBuilder {
    pub fn get(mut self, path: &'static str, status: StatusCode, body: Value) -> Self {
        self.routes.push((MethodFilter::GET, path, status, body));
        self
    }

    pub fn post(mut self, path: &'static str, status: StatusCode, body: Value) -> Self {
        self.routes.push((MethodFilter::POST, path, status, body));
        self
    }

    pub async fn spawn(self) -> Stub {
        let requests: Arc<Mutex<HashMap<String, Vec<Recorded>>>> = Arc::default();
        let mut router = Router::new();

        for (filter, path, status, body) in self.routes {
            let requests = requests.clone();
            router = router.route(
                path,
                on(filter, move |headers: HeaderMap, uri: Uri, payload: Bytes| {
                    let requests = requests.clone();
                    let body = body.clone();
                    async move {
                        let recorded = Recorded {
                            query: uri.query().map(String::from),
                            authorization: headers
                                .get(AUTHORIZATION)
                                .and_then(|v| v.to_str().ok())
                                .map(String::from),
                            body: String::from_utf8_lossy(&payload).into_owned(),
                        };
                        requests
                            .lock()
                            .unwrap()
                            .entry(path.to_string())
                            .or_default()
                            .push(recorded);
                        (status, Json(body))
                    }
                }),
            );
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Stub {
            base_url: format!("http://{addr}"),
            requests,
        }
    }
}

/// Configuration pointing every upstream at `stub`, with all keys present.
/// `overrides` replace or blank out individual variables.
pub fn config_for(stub: &Stub, overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("OPENAI_API_KEY", "sk-test"),
        ("SPOTIFY_CLIENT_ID", "client-id"),
        ("SPOTIFY_CLIENT_SECRET", "client-secret"),
        ("YOUTUBE_API_KEY", "yt-key"),
        ("UPSTREAM_TIMEOUT_SECS", "5"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for key in [
        "OPENAI_BASE_URL",
        "SPOTIFY_ACCOUNTS_URL",
        "SPOTIFY_API_BASE_URL",
        "YOUTUBE_API_BASE_URL",
    ] {
        vars.insert(key.to_string(), stub.base_url.clone());
    }
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }

    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn server(config: Config) -> TestServer {
    let state = AppState::new(config).unwrap();
    TestServer::new(create_router(state)).unwrap()
}

pub fn chat_reply(content: &str) -> Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

pub fn spotify_token() -> Value {
    serde_json::json!({
        "access_token": "stub-token",
        "token_type": "Bearer",
        "expires_in": 3600
    })
}
