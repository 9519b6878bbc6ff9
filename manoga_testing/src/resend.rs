use std::{
    net::{IpAddr, Ipv4Addr},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info};
use url::Url;
use uuid::Uuid;

const EMAILS_ROUTE: &str = "/emails";

/// In-memory stand-in for the Resend `POST /emails` endpoint.
#[derive(Debug, Clone)]
pub struct FakeResend {
    api_key: Arc<str>,
    outbox: Arc<Mutex<Vec<ReceivedEmail>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedEmail {
    pub from: String,
    pub to: Vec<String>,
    #[serde(default)]
    pub reply_to: Option<String>,
    pub subject: String,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl FakeResend {
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self {
            api_key: api_key.into(),
            outbox: Default::default(),
        }
    }

    /// Returns all emails accepted so far, oldest first.
    pub fn outbox(&self) -> Vec<ReceivedEmail> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn router(&self) -> Router<()> {
        Router::new()
            .route(EMAILS_ROUTE, routing::post(send_email))
            .with_state(self.clone())
    }

    /// Serve the fake api on a random local port in the background and return
    /// its base url.
    pub async fn spawn(&self) -> anyhow::Result<Url> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .context("Failed to bind to a local port")?;
        let addr = listener.local_addr()?;

        let router = self.router();
        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router).await {
                error!("fake resend server failed: {err}");
            }
        });

        format!("http://{addr}/").parse().map_err(Into::into)
    }
}

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting resend testing server on {host}:{port}");
    info!("Resend endpoint: http://{host}:{port}/");
    info!("API key: {api_key:?}");

    let router = FakeResend::new(api_key).router();

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

async fn send_email(
    State(state): State<FakeResend>,
    headers: HeaderMap,
    Json(email): Json<ReceivedEmail>,
) -> Response {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|x| x.to_str().ok())
        .and_then(|x| x.strip_prefix("Bearer "));
    if token != Some(&*state.api_key) {
        return api_error(StatusCode::UNAUTHORIZED, "validation_error", "API key is invalid");
    }

    if email.html.is_none() && email.text.is_none() {
        return api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "missing_required_field",
            "Missing `html` or `text` field.",
        );
    }

    let id = Uuid::now_v7();
    info!(%id, from = %email.from, to = ?email.to, subject = %email.subject, "received email");

    state
        .outbox
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(email);

    Json(json!({ "id": id })).into_response()
}

fn api_error(status: StatusCode, name: &str, message: &str) -> Response {
    let body = json!({
        "statusCode": status.as_u16(),
        "name": name,
        "message": message,
    });
    (status, Json(body)).into_response()
}
