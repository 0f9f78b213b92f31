//! Portal user type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Kind of account a session belongs to.
///
/// The user type decides which login surface a torn-down session is sent
/// back to: admins land on the admin login, everyone else on the home route.
///
/// Parsing is case-insensitive. Roles the client has no special handling
/// for are kept verbatim as [`UserType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UserType {
    /// Platform administrator using the admin portal.
    Admin,
    /// Mentor using the mentor portal.
    Mentor,
    /// Mentee account.
    Mentee,
    /// Any other role reported by the API.
    Other(String),
}

impl UserType {
    /// Check if this user type is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the user type as stored in the session store.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "Admin",
            Self::Mentor => "Mentor",
            Self::Mentee => "Mentee",
            Self::Other(role) => role,
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "" => Err(AppError::validation("User type must not be empty")),
            "admin" => Ok(Self::Admin),
            "mentor" => Ok(Self::Mentor),
            "mentee" => Ok(Self::Mentee),
            _ => Ok(Self::Other(s.to_string())),
        }
    }
}

impl TryFrom<String> for UserType {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UserType> for String {
    fn from(user_type: UserType) -> Self {
        match user_type {
            UserType::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("Admin".parse::<UserType>().unwrap(), UserType::Admin);
        assert_eq!("MENTOR".parse::<UserType>().unwrap(), UserType::Mentor);
        assert_eq!("mentee".parse::<UserType>().unwrap(), UserType::Mentee);
        assert_eq!(
            "Owner".parse::<UserType>().unwrap(),
            UserType::Other("Owner".to_string())
        );
        assert!("  ".parse::<UserType>().is_err());
    }

    #[test]
    fn test_serde_uses_stored_spelling() {
        let json = serde_json::to_string(&UserType::Admin).unwrap();
        assert_eq!(json, "\"Admin\"");
        let parsed: UserType = serde_json::from_str("\"Mentor\"").unwrap();
        assert_eq!(parsed, UserType::Mentor);
    }

    #[test]
    fn test_deserialize_is_case_insensitive_and_open() {
        let parsed: UserType = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, UserType::Admin);
        assert!(parsed.is_admin());

        let parsed: UserType = serde_json::from_str("\"Moderator\"").unwrap();
        assert_eq!(parsed, UserType::Other("Moderator".to_string()));
        assert!(!parsed.is_admin());
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"Moderator\"");

        assert!(serde_json::from_str::<UserType>("\"\"").is_err());
    }
}
