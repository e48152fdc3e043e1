use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::{FieldError, FormErrors};

/// Raw values posted by the contact form. Missing fields deserialize as empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(custom(function = "required"))]
    pub name: String,
    #[validate(custom(function = "email_address"))]
    pub email: String,
    #[validate(custom(function = "required"))]
    pub subject: String,
    #[validate(custom(function = "required"))]
    pub message: String,
}

/// A contact form that passed validation, with trimmed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate_submission(&self) -> Result<ContactSubmission, FormErrors> {
        if let Err(errors) = self.validate() {
            return Err(FormErrors::from_validation(&errors));
        }

        Ok(ContactSubmission {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            subject: self.subject.trim().to_owned(),
            message: self.message.trim().to_owned(),
        })
    }
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(FieldError::REQUIRED));
    }

    Ok(())
}

fn email_address(value: &str) -> Result<(), ValidationError> {
    required(value)?;

    let value = value.trim();
    let dotted_domain = value
        .rsplit_once('@')
        .map(|(_, domain)| domain.split('.').count() > 1 && !domain.split('.').any(str::is_empty))
        .unwrap_or(false);

    if !value.validate_email() || !dotted_domain {
        return Err(ValidationError::new(FieldError::INVALID_FORMAT));
    }

    Ok(())
}
