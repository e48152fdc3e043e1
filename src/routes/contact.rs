use axum::{
    extract::{Form, State, rejection::FormRejection},
    response::{IntoResponse, Redirect},
};
use portfolio_contact::ContactForm;
use tower_sessions::Session;

use crate::{
    flash::{self, Flash},
    routes::AppState,
};

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";
pub const FAILURE_MESSAGE: &str =
    "There was an error sending your message. Please try again or contact me directly.";

/// POST /contact - Always redirects back to the contact section.
pub async fn action(
    session: Session,
    State(app): State<AppState>,
    input: Result<Form<ContactForm>, FormRejection>,
) -> impl IntoResponse {
    let input = match input {
        Ok(Form(input)) => input,
        Err(err) => {
            tracing::warn!(err = %err, "unreadable contact form body");
            ContactForm::default()
        }
    };

    let flashes = submit(&app, &input).await;
    if let Err(err) = flash::push(&session, flashes).await {
        tracing::error!(err = %err, "failed to queue flashes");
    }

    Redirect::to("/#contact")
}

async fn submit(app: &AppState, input: &ContactForm) -> Vec<Flash> {
    let submission = match input.validate_submission() {
        Ok(submission) => submission,
        Err(errors) => return errors.messages().into_iter().map(Flash::error).collect(),
    };

    let delivery = match portfolio_notification::contact::compose(
        &submission,
        &app.config.email.contact_address,
    ) {
        Ok(email) => app.mailer.send(email).await,
        Err(err) => Err(err),
    };

    match delivery {
        Ok(()) => vec![Flash::success(SUCCESS_MESSAGE)],
        Err(err) => {
            tracing::error!("Failed to send email: {err}");
            vec![Flash::error(FAILURE_MESSAGE)]
        }
    }
}
