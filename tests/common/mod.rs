//! Integration test common infrastructure.
//!
//! Builds an in-process router with a recording notifier so tests can drive
//! the HTTP surface with `tower::ServiceExt::oneshot` and observe chat output.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use mikrodeny::config::Config;
use mikrodeny::error::NotifyError;
use mikrodeny::http::{USER_ID_HEADER, router};
use mikrodeny::notify::{Notification, NotificationQueue, Notifier};
use mikrodeny::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower::ServiceExt;

pub const KEY: &str = "test-router-key";

pub const CONFIG: &str = r#"
[[users]]
name = "router"
key = "test-router-key"

[allow_list]
addresses = ["127.0.0.1", "192.168.7.100"]
"#;

/// Notifier that forwards every message to a channel.
pub struct RecordingNotifier {
    tx: mpsc::UnboundedSender<Notification>,
    fail: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        let _ = self.tx.send(Notification {
            chat_id,
            text: text.to_string(),
        });
        if self.fail {
            Err(NotifyError::Status(reqwest::StatusCode::BAD_GATEWAY))
        } else {
            Ok(())
        }
    }
}

pub struct TestApp {
    pub app: Router,
    pub state: Arc<AppState>,
    sent: mpsc::UnboundedReceiver<Notification>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(CONFIG, false)
    }

    pub fn with_config(toml: &str, failing_notifier: bool) -> Self {
        let config: Config = toml::from_str(toml).expect("test config parses");
        let (tx, sent) = mpsc::unbounded_channel();
        let notifier = RecordingNotifier {
            tx,
            fail: failing_notifier,
        };
        let (queue, _) = NotificationQueue::spawn(Arc::new(notifier), 16);
        let state = Arc::new(AppState::new(&config, queue));
        Self {
            app: router(Arc::clone(&state)),
            state,
            sent,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.expect("router is infallible")
    }

    pub async fn ingest(&self, key: Option<&str>, body: &str) -> Response<Body> {
        let mut builder = Request::post("/ipaddress").header("content-type", "application/json");
        if let Some(key) = key {
            builder = builder.header(USER_ID_HEADER, key);
        }
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn list(&self, key: Option<&str>) -> Response<Body> {
        let mut builder = Request::get("/ipaddress");
        if let Some(key) = key {
            builder = builder.header(USER_ID_HEADER, key);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Wait for the next outbound chat message.
    pub async fn next_notification(&mut self) -> Option<Notification> {
        tokio::time::timeout(Duration::from_secs(2), self.sent.recv())
            .await
            .ok()
            .flatten()
    }

    /// Assert nothing is sent within a short window.
    pub async fn assert_no_notification(&mut self) {
        let result = tokio::time::timeout(Duration::from_millis(100), self.sent.recv()).await;
        assert!(result.is_err(), "unexpected notification: {result:?}");
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `{"message": ...}` body with `address` repeated `n` times.
pub fn message_with(parts: &[(&str, usize)]) -> String {
    let mut text = String::from("login failure for user admin from");
    for (address, n) in parts {
        for _ in 0..*n {
            text.push(' ');
            text.push_str(address);
        }
    }
    serde_json::json!({ "message": text }).to_string()
}
