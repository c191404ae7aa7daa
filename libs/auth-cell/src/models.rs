use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::auth::UserType;
use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default = "default_user_type")]
    pub user_type: UserType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_user_type")]
    pub user_type: UserType,
}

// the forms open on "patient"
fn default_user_type() -> UserType {
    UserType::Patient
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Field is required: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
