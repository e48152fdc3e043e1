use axum::response::IntoResponse;
use portfolio_contact::ContactForm;
use tower_sessions::Session;

use crate::{
    config::SiteConfig,
    flash::{self, Flash},
    template::Template,
};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub site: &'a SiteConfig,
    pub form: ContactForm,
    pub flashes: Vec<Flash>,
}

/// GET / - Home page with an empty contact form and any pending flashes.
pub async fn page(template: Template, session: Session) -> impl IntoResponse {
    let flashes = flash::take(&session).await.unwrap_or_else(|err| {
        tracing::error!(err = %err, "failed to read pending flashes");
        Vec::new()
    });

    template.render(IndexTemplate {
        site: template.site(),
        form: ContactForm::default(),
        flashes,
    })
}
