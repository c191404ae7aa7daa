// Mock login and registration. Any well-formed form is accepted; no
// credential is ever checked.

pub mod models;
pub mod services;

pub use models::{AuthError, LoginForm, RegisterForm};
pub use services::MockAuthService;
