//! Shared setup for router tests: a test configuration and mailers that
//! record or reject messages instead of talking to SMTP.

#![allow(dead_code)]

use std::{
    io,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use portfolio::{
    AppState, Config,
    config::{LoggingConfig, ServerConfig, SiteConfig},
};
use portfolio_notification::{EmailConfig, Mailer, OutgoingEmail};
use tower::ServiceExt;

pub const CONTACT_ADDRESS: &str = "owner@portfolio.localhost";

#[derive(Clone, Default)]
pub struct RecordingMailer(Arc<Mutex<Vec<OutgoingEmail>>>);

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.0.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()> {
        self.0.lock().unwrap().push(email);

        Ok(())
    }
}

/// Counts attempts and fails every one of them like an unreachable relay.
#[derive(Clone, Default)]
pub struct FailingMailer(Arc<Mutex<usize>>);

impl FailingMailer {
    pub fn attempts(&self) -> usize {
        *self.0.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: OutgoingEmail) -> anyhow::Result<()> {
        *self.0.lock().unwrap() += 1;

        anyhow::bail!("Connection refused (os error 111)")
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        site: SiteConfig {
            owner_name: "Jo Doe".to_owned(),
            title: "Jo Doe - Portfolio".to_owned(),
        },
        email: EmailConfig {
            smtp_host: "localhost".to_owned(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "Portfolio <noreply@portfolio.localhost>".to_owned(),
            contact_address: CONTACT_ADDRESS.to_owned(),
        },
        logging: LoggingConfig {
            level: "debug".to_owned(),
            format: "pretty".to_owned(),
        },
    }
}

pub fn test_state(mailer: impl Mailer + 'static) -> AppState {
    AppState::new(test_config(), Arc::new(mailer))
}

pub fn create_test_app(mailer: impl Mailer + 'static) -> Router {
    portfolio::server::app(test_state(mailer))
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Plain-text subscriber writing every event into this buffer.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let buffer = self.clone();

        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || buffer.clone())
            .finish()
    }

    pub fn lines_containing(&self, needle: &str) -> usize {
        let bytes = self.0.lock().unwrap();

        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn contact_request(fields: &[(&str, &str)], cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder
        .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
        .unwrap()
}

pub fn home_request(cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/");

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder.body(Body::empty()).unwrap()
}

/// `name=value` pair of the session cookie set by a response, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_owned)
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Renders the home page for `cookie` and returns its HTML.
pub async fn home_page(app: &Router, cookie: &str) -> String {
    let response = app.clone().oneshot(home_request(Some(cookie))).await.unwrap();
    body_string(response).await
}

pub fn alerts(html: &str) -> usize {
    html.matches(r#"role="alert""#).count()
}
