use strum::{AsRefStr, VariantArray};

/// Contact form fields, declared in the order they are displayed and reported.
#[derive(AsRefStr, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("Invalid email address.")]
    InvalidFormat,
}

impl FieldError {
    pub(crate) const REQUIRED: &'static str = "required";
    pub(crate) const INVALID_FORMAT: &'static str = "invalid_format";

    pub(crate) fn from_code(code: &str) -> Self {
        match code {
            Self::REQUIRED => FieldError::Required,
            Self::INVALID_FORMAT => FieldError::InvalidFormat,
            code => unreachable!("contact form rules only emit known codes, got {code:?}"),
        }
    }
}

/// Validation failures grouped per field, in [`Field`] declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<(Field, Vec<FieldError>)>);

impl FormErrors {
    pub(crate) fn from_validation(errors: &validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        let grouped = Field::VARIANTS
            .iter()
            .filter_map(|field| {
                let key: &str = field.as_ref();
                let errors = field_errors.get(key)?;
                let errors = errors
                    .iter()
                    .map(|error| FieldError::from_code(&error.code))
                    .collect::<Vec<_>>();

                Some((*field, errors))
            })
            .collect();

        Self(grouped)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> &[FieldError] {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, errors)| errors.as_slice())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Field, Vec<FieldError>)> {
        self.0.iter()
    }

    /// One `"<Label>: <error>"` line per field error.
    pub fn messages(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|(field, errors)| {
                errors
                    .iter()
                    .map(move |error| format!("{}: {error}", field.label()))
            })
            .collect()
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join(", "))
    }
}

impl std::error::Error for FormErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_map_to_their_errors() {
        assert_eq!(FieldError::from_code(FieldError::REQUIRED), FieldError::Required);
        assert_eq!(
            FieldError::from_code(FieldError::INVALID_FORMAT),
            FieldError::InvalidFormat
        );
    }

    #[test]
    #[should_panic(expected = "known codes")]
    fn test_unknown_code_is_a_bug() {
        FieldError::from_code("length");
    }
}
