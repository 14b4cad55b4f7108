//! Form validation mapping for HTTP handlers.
//!
//! Converts domain validation errors into `invalid_request` payloads with a
//! `details.fields` object, so clients can attach messages to the offending
//! form field.

use serde_json::{json, Map, Value};

use crate::domain::{
    ArticleValidationError, Error, LoginValidationError, RegistrationValidationError,
};

/// Build an `invalid_request` error carrying per-field messages.
pub fn invalid_fields<I, F, M>(message: impl Into<String>, fields: I) -> Error
where
    I: IntoIterator<Item = (F, M)>,
    F: Into<String>,
    M: Into<String>,
{
    let fields: Map<String, Value> = fields
        .into_iter()
        .map(|(field, message)| (field.into(), Value::String(message.into())))
        .collect();
    Error::invalid_request(message).with_details(json!({ "fields": fields }))
}

/// Map login form validation failures onto their form fields.
pub fn map_login_error(err: &LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyUsername => "username",
        LoginValidationError::EmptyPassword => "password",
    };
    invalid_fields("login form is invalid", [(field, err.to_string())])
}

/// Map registration form validation failures onto their form fields.
pub fn map_registration_error(err: &RegistrationValidationError) -> Error {
    let field = match err {
        RegistrationValidationError::Username(_) => "username",
        RegistrationValidationError::EmptyPassword
        | RegistrationValidationError::PasswordTooShort { .. } => "password",
        RegistrationValidationError::PasswordMismatch => "password_confirm",
    };
    invalid_fields("registration form is invalid", [(field, err.to_string())])
}

/// Map article form validation failures onto their form fields.
///
/// Identifier failures are not form errors: ids come from the path, so
/// an invalid one reads as an unknown article.
pub fn map_article_error(err: &ArticleValidationError) -> Error {
    let field = match err {
        ArticleValidationError::EmptyTitle | ArticleValidationError::TitleTooLong { .. } => {
            "title"
        }
        ArticleValidationError::EmptyBody => "body",
        ArticleValidationError::InvalidId => return Error::not_found("article not found"),
    };
    invalid_fields("article form is invalid", [(field, err.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[test]
    fn invalid_fields_builds_a_fields_object() {
        let err = invalid_fields(
            "form is invalid",
            [("title", "must not be empty"), ("body", "must not be empty")],
        );
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["fields"]["title"], "must not be empty");
        assert_eq!(details["fields"]["body"], "must not be empty");
    }

    #[rstest]
    #[case(LoginValidationError::EmptyUsername, "username")]
    #[case(LoginValidationError::EmptyPassword, "password")]
    fn login_errors_name_their_field(
        #[case] err: LoginValidationError,
        #[case] field: &str,
    ) {
        let mapped = map_login_error(&err);
        let details = mapped.details().expect("details present");
        assert!(details["fields"][field].is_string());
    }

    #[rstest]
    #[case(RegistrationValidationError::EmptyPassword, "password")]
    #[case(RegistrationValidationError::PasswordMismatch, "password_confirm")]
    fn registration_errors_name_their_field(
        #[case] err: RegistrationValidationError,
        #[case] field: &str,
    ) {
        let mapped = map_registration_error(&err);
        let details = mapped.details().expect("details present");
        assert!(details["fields"][field].is_string());
    }

    #[test]
    fn article_errors_name_their_field() {
        let mapped = map_article_error(&ArticleValidationError::EmptyTitle);
        let details = mapped.details().expect("details present");
        assert!(details["fields"]["title"].is_string());
    }

    #[test]
    fn invalid_article_id_is_not_a_form_error() {
        let mapped = map_article_error(&ArticleValidationError::InvalidId);
        assert_eq!(mapped.code(), ErrorCode::NotFound);
        assert!(mapped.details().is_none());
    }
}
