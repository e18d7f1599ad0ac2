//! Login form input checked into credentials.
//!
//! A `Credentials` value exists for one submit only. The email is normalised
//! and shape-checked; the password is copied into a zeroizing buffer and never
//! shows up in `Debug` output.

use std::fmt;

use zeroize::Zeroizing;

/// Why a login form was refused before any request was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// The email field was blank.
    #[error("email must not be empty")]
    MissingEmail,
    /// The email field is not shaped like `local@domain.tld`.
    #[error("'{email}' is not a valid email address")]
    InvalidEmail {
        /// Trimmed value as entered.
        email: String,
    },
    /// The password field was empty.
    #[error("password must not be empty")]
    MissingPassword,
}

/// Email and password ready to be sent to the login endpoint.
///
/// ```
/// use registry_client::domain::Credentials;
///
/// let creds = Credentials::from_form(" ada@example.com ", "hunter2").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Check raw form fields. Surrounding whitespace is dropped from the email
    /// only; the password is taken as typed.
    ///
    /// # Errors
    ///
    /// Returns the first [`CredentialsValidationError`] found, email first.
    pub fn from_form(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = checked_email(email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::MissingPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        &self.password
    }
}

fn checked_email(raw: &str) -> Result<String, CredentialsValidationError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(CredentialsValidationError::MissingEmail);
    }
    if has_email_shape(email) {
        Ok(email.to_owned())
    } else {
        Err(CredentialsValidationError::InvalidEmail {
            email: email.to_owned(),
        })
    }
}

/// One `@`, a non-empty local part, and a dotted domain with no empty labels.
fn has_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::MissingEmail)]
    #[case(" \t ", "pw", CredentialsValidationError::MissingEmail)]
    #[case("ada@example.com", "", CredentialsValidationError::MissingPassword)]
    #[case("", "", CredentialsValidationError::MissingEmail)]
    fn blank_fields_are_refused(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        assert_eq!(Credentials::from_form(email, password), Err(expected));
    }

    #[rstest]
    #[case("ada")]
    #[case("@example.com")]
    #[case("ada@")]
    #[case("ada@localhost")]
    #[case("ada@@example.com")]
    #[case("ada@example..com")]
    #[case("ada@.example.com")]
    #[case("ada lovelace@example.com")]
    fn malformed_emails_are_refused(#[case] email: &str) {
        assert_eq!(
            Credentials::from_form(email, "pw"),
            Err(CredentialsValidationError::InvalidEmail {
                email: email.to_owned()
            })
        );
    }

    #[test]
    fn invalid_email_message_names_the_value() {
        let err = Credentials::from_form(" ada ", "pw").expect_err("no domain");
        assert_eq!(err.to_string(), "'ada' is not a valid email address");
    }

    #[rstest]
    #[case("  ada@example.com  ", "secret", "ada@example.com")]
    #[case("grace.hopper@navy.mil", " padded ", "grace.hopper@navy.mil")]
    #[case("x+tag@sub.example.org", "pw", "x+tag@sub.example.org")]
    fn accepted_forms_keep_the_password_verbatim(
        #[case] email: &str,
        #[case] password: &str,
        #[case] normalised: &str,
    ) {
        let creds = Credentials::from_form(email, password).expect("well-formed input");
        assert_eq!(creds.email(), normalised);
        assert_eq!(creds.password(), password);
    }

    #[test]
    fn debug_hides_the_password() {
        let creds = Credentials::from_form("ada@example.com", "hunter2").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("ada@example.com"));
    }
}
