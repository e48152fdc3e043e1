use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use portfolio_notification::Mailer;

use crate::{
    session::SessionCache,
    template::{NotFoundTemplate, Template},
};

mod contact;
mod health;
mod index;

pub use contact::{FAILURE_MESSAGE, SUCCESS_MESSAGE};

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mailer: Arc<dyn Mailer>,
    pub sessions: SessionCache,
}

impl AppState {
    pub fn new(config: crate::config::Config, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            config,
            mailer,
            sessions: SessionCache::default(),
        }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        template.render(NotFoundTemplate {
            site: template.site(),
        }),
    )
}

pub fn router(app_state: AppState) -> Router {
    let session_layer = app_state.sessions.layer();

    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route("/contact", post(contact::action))
        .nest_service("/static", crate::assets::AssetsService)
        .fallback(fallback)
        .with_state(app_state)
        .layer(session_layer)
}
