use askama::Template;
use portfolio_contact::ContactSubmission;

use crate::OutgoingEmail;

pub const SUBJECT_PREFIX: &str = "Portfolio Contact: ";

#[derive(Template)]
#[template(path = "contact.txt")]
struct ContactTemplate<'a> {
    submission: &'a ContactSubmission,
}

/// Builds the notification sent to the site owner for a contact submission.
pub fn compose(submission: &ContactSubmission, to: &str) -> anyhow::Result<OutgoingEmail> {
    let body = ContactTemplate { submission }.render()?;

    Ok(OutgoingEmail {
        subject: format!("{SUBJECT_PREFIX}{}", submission.subject),
        recipients: vec![to.to_owned()],
        reply_to: submission.email.to_owned(),
        body,
    })
}
