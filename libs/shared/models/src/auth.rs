use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Patient,
    Doctor,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Patient => write!(f, "patient"),
            UserType::Doctor => write!(f, "doctor"),
        }
    }
}

/// The person driving a session. Lives as long as the session's login does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl User {
    pub fn is_patient(&self) -> bool {
        self.user_type == UserType::Patient
    }

    pub fn is_doctor(&self) -> bool {
        self.user_type == UserType::Doctor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_type_serializes_under_type_key() {
        let user = User {
            id: "1".to_string(),
            name: "Usuário Teste".to_string(),
            email: "teste@clinica.com".to_string(),
            user_type: UserType::Doctor,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["type"], json!("doctor"));
        assert!(user.is_doctor());
        assert!(!user.is_patient());
    }
}
