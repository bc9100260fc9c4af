use tracing::debug;

use crate::{
    error::ValidationError,
    http::{ApiError, MediaApi},
    model::Credentials,
};

pub const MIN_PASSWORD_LEN: usize = 6;

const REGISTER_FAILED: &str = "Failed to register";
const LOGIN_FAILED: &str = "Failed to login";

/// In-flight flag and inline error shared by both forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStatus {
    loading: bool,
    error: Option<String>,
}

impl FormStatus {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
    }

    fn finish(&mut self, result: Result<String, ApiError>, fallback: &str) -> Option<String> {
        self.loading = false;
        match result {
            Ok(token) => Some(token),
            Err(e) => {
                debug!("Auth request failed: {}", e);
                self.error = Some(e.detail_or(fallback));
                None
            }
        }
    }
}

pub fn validate_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub confirmation: String,
    status: FormStatus,
}

impl RegistrationForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirmation: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirmation: confirmation.into(),
            status: FormStatus::default(),
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Validates locally and marks the form as submitting. `None` means no
    /// request may be sent: either one is already in flight or validation
    /// failed (the error is then set on the form).
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.status.is_loading() {
            return None;
        }
        if let Err(e) = validate_password(&self.password, &self.confirmation) {
            self.status.fail(e.to_string());
            return None;
        }
        self.status.begin();
        Some(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<String, ApiError>) -> Option<String> {
        self.status.finish(result, REGISTER_FAILED)
    }

    pub async fn submit(&mut self, api: &dyn MediaApi) -> Option<String> {
        let credentials = self.begin_submit()?;
        let result = api.register(&credentials).await;
        self.finish_submit(result)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    status: FormStatus,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            status: FormStatus::default(),
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if !self.status.begin() {
            return None;
        }
        Some(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<String, ApiError>) -> Option<String> {
        self.status.finish(result, LOGIN_FAILED)
    }

    pub async fn submit(&mut self, api: &dyn MediaApi) -> Option<String> {
        let credentials = self.begin_submit()?;
        let result = api.login(&credentials).await;
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_rules() {
        assert_eq!(validate_password("secret1", "secret1"), Ok(()));
        assert_eq!(validate_password("sixsix", "sixsix"), Ok(()));
        assert_eq!(
            validate_password("abcde", "abcde"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_password("secret1", "secret2"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn begin_blocks_reentrant_submit() {
        let mut form = LoginForm {
            email: "a@b.com".into(),
            password: "secret1".into(),
            ..Default::default()
        };
        assert!(form.begin_submit().is_some());
        assert!(form.status().is_loading());
        assert!(form.begin_submit().is_none());

        assert_eq!(form.finish_submit(Ok("tok".into())).as_deref(), Some("tok"));
        assert!(!form.status().is_loading());
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn failure_shows_detail() {
        let mut form = RegistrationForm {
            email: "a@b.com".into(),
            password: "secret1".into(),
            confirmation: "secret1".into(),
            ..Default::default()
        };
        form.begin_submit().unwrap();
        let err = ApiError::Status {
            status: 400,
            detail: Some("User with that email already exists".into()),
        };
        assert_eq!(form.finish_submit(Err(err)), None);
        assert_eq!(form.status().error(), Some("User with that email already exists"));
    }
}
