use std::sync::Arc;

use regex::Regex;
use tracing::{debug, warn};

use shared_models::auth::User;
use shared_utils::ids::{IdGenerator, UuidIds};

use crate::models::{AuthError, LoginForm, RegisterForm};

/// Id and name every login-form user gets.
pub const MOCK_LOGIN_ID: &str = "1";
pub const MOCK_LOGIN_NAME: &str = "Usuário Teste";

// local@domain.tld, as an <input type="email"> would accept
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

pub struct MockAuthService {
    ids: Arc<dyn IdGenerator>,
    email_pattern: Option<Regex>,
}

impl MockAuthService {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_email_pattern(ids, EMAIL_PATTERN)
    }

    /// A pattern that fails to compile leaves only the required-field check.
    pub fn with_email_pattern(ids: Arc<dyn IdGenerator>, pattern: &str) -> Self {
        let email_pattern = Regex::new(pattern).ok();
        if email_pattern.is_none() {
            warn!("Email pattern {:?} does not compile, format check disabled", pattern);
        }

        Self { ids, email_pattern }
    }

    /// Accepts any credentials and returns the shared mock user.
    pub fn login(&self, form: LoginForm) -> Result<User, AuthError> {
        let email = self.validate_email(&form.email)?;
        require("password", &form.password)?;
        debug!("Mock login for {} as {}", email, form.user_type);

        Ok(User {
            id: MOCK_LOGIN_ID.to_string(),
            name: MOCK_LOGIN_NAME.to_string(),
            email,
            user_type: form.user_type,
        })
    }

    /// Creates a fresh user from the form; nothing is stored.
    pub fn register(&self, form: RegisterForm) -> Result<User, AuthError> {
        let name = require("name", &form.name)?;
        let email = self.validate_email(&form.email)?;
        require("password", &form.password)?;

        let user = User {
            id: self.ids.next_id(),
            name,
            email,
            user_type: form.user_type,
        };
        debug!("Mock registration of {} as {}", user.id, user.user_type);

        Ok(user)
    }

    fn validate_email(&self, raw: &str) -> Result<String, AuthError> {
        let email = require("email", raw)?;
        let well_formed = self
            .email_pattern
            .as_ref()
            .map_or(true, |pattern| pattern.is_match(&email));

        if well_formed {
            Ok(email)
        } else {
            Err(AuthError::InvalidEmail(email))
        }
    }
}

impl Default for MockAuthService {
    fn default() -> Self {
        Self::new(Arc::new(UuidIds))
    }
}

fn require(field: &'static str, value: &str) -> Result<String, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
