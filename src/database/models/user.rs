use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::api::validate::{check_length, into_result, FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}

/// Properties returned via API; never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            full_name: user.full_name,
            address: user.address,
            phone: user.phone,
        }
    }
}

/// Operator-side user creation. The hash is produced elsewhere and stored as given.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub hashed_password: String,
}

fn default_true() -> bool {
    true
}

impl UserCreate {
    pub fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            email: self.email,
            is_active: self.is_active,
            is_superuser: self.is_superuser,
            full_name: self.full_name,
            address: self.address,
            phone: self.phone,
            hashed_password: self.hashed_password,
        }
    }
}

impl Validate for UserCreate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        check_length(&mut errors, "email", Some(&self.email), 3, 255);
        if !errors.contains_key("email") && !looks_like_email(&self.email) {
            errors.insert("email".to_string(), "value is not a valid email address".to_string());
        }
        check_length(&mut errors, "full_name", self.full_name.as_deref(), 0, 255);
        check_length(&mut errors, "address", self.address.as_deref(), 0, 255);
        check_length(&mut errors, "phone", self.phone.as_deref(), 0, 50);
        if self.hashed_password.is_empty() {
            errors.insert("hashed_password".to_string(), "Field required".to_string());
        }

        into_result(errors)
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(email: &str) -> UserCreate {
        UserCreate {
            email: email.to_string(),
            is_active: true,
            is_superuser: false,
            full_name: Some("Maria Lopez".to_string()),
            address: None,
            phone: None,
            hashed_password: "$argon2id$opaque".to_string(),
        }
    }

    #[test]
    fn public_projection_drops_password_hash() {
        let user = create("maria@example.com").into_user();
        let value = serde_json::to_value(UserPublic::from(user.clone())).unwrap();
        assert_eq!(value["email"], "maria@example.com");
        assert!(value.get("hashed_password").is_none());

        // The stored shape never serializes the hash either
        let raw = serde_json::to_value(&user).unwrap();
        assert!(raw.get("hashed_password").is_none());
    }

    #[test]
    fn rejects_malformed_email() {
        let errors = create("not-an-email").validate().unwrap_err();
        assert!(errors.contains_key("email"));
        assert!(create("maria@example.com").validate().is_ok());
    }
}
