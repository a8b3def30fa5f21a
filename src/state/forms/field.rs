//! Form field value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender choice offered by the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }

    /// Value sent over the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Identifies one input of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    FirstName,
    LastName,
    Email,
    Password,
    Gender,
}

impl FieldName {
    /// Inputs in on-screen order
    pub const ALL: [FieldName; 5] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Email,
        FieldName::Password,
        FieldName::Gender,
    ];

    /// Key used in the request body and in validation messages
    pub fn key(&self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Gender => "gender",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Gender => "Gender",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "user@mail.com",
            Self::Password => "***********",
            Self::Gender => "",
        }
    }

    /// Whether the value must be masked when rendered
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password)
    }

    /// Whether the field is a fixed choice rather than free text
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Gender)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_defaults_to_male() {
        assert_eq!(Gender::default(), Gender::Male);
    }

    #[test]
    fn test_gender_toggle() {
        assert_eq!(Gender::Male.toggle(), Gender::Female);
        assert_eq!(Gender::Female.toggle(), Gender::Male);
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("Female"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn test_gender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
    }

    #[test]
    fn test_field_keys_match_wire_names() {
        let keys: Vec<&str> = FieldName::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(
            keys,
            vec!["first_name", "last_name", "email", "password", "gender"]
        );
    }

    #[test]
    fn test_only_password_is_secret() {
        let secret: Vec<FieldName> = FieldName::ALL
            .into_iter()
            .filter(|f| f.is_secret())
            .collect();
        assert_eq!(secret, vec![FieldName::Password]);
    }

    #[test]
    fn test_display_uses_key() {
        assert_eq!(FieldName::LastName.to_string(), "last_name");
    }
}
