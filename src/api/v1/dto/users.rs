/*
 * Responsibility
 * - Users の request/response DTO
 * - validation (形式チェック) 用の validate() を持つ
 * - UpdateUserRequest は更新可能なフィールドだけを受け取る (username / id は無視)
 */
use serde::{Deserialize, Serialize};

use crate::api::v1::dto::rules;
use crate::repos::{NewUser, UserChanges, UserRow};

// Missing fields bind as empty strings and are rejected by validate() (406), not by serde (415).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !rules::is_present(&self.username) {
            return Err("username is required");
        }
        if !rules::is_present(&self.name) {
            return Err("name is required");
        }
        if !rules::is_email(&self.email) {
            return Err("email is invalid");
        }
        if !rules::is_password(&self.password) {
            return Err("password must be 6..=128 chars");
        }
        if !rules::is_phone(&self.phone) {
            return Err("phone is invalid");
        }
        Ok(())
    }

    pub fn into_new_user(self) -> NewUser {
        NewUser {
            username: self.username,
            name: self.name,
            email: self.email,
            password: self.password,
            phone: self.phone,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

// Blank means "leave unchanged".
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(email) = provided(&self.email)
            && !rules::is_email(email)
        {
            return Err("email is invalid");
        }
        if let Some(name) = provided(&self.name)
            && !rules::is_present(name)
        {
            return Err("name is too long");
        }
        if let Some(password) = provided(&self.password)
            && !rules::is_password(password)
        {
            return Err("password must be 6..=128 chars");
        }
        if let Some(phone) = provided(&self.phone)
            && !rules::is_phone(phone)
        {
            return Err("phone is invalid");
        }
        Ok(())
    }

    pub fn into_changes(self) -> UserChanges {
        UserChanges {
            email: non_blank(self.email),
            name: non_blank(self.name),
            password: non_blank(self.password),
            phone: non_blank(self.phone),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl UserResponse {
    /// Public shape without optional profile fields.
    pub fn from_row(row: UserRow) -> Self {
        Self {
            gender: None,
            ..Self::with_profile(row)
        }
    }

    /// Public shape including optional profile fields (gender) when stored.
    pub fn with_profile(row: UserRow) -> Self {
        Self {
            user_id: row.id,
            username: row.username,
            name: row.name,
            email: row.email,
            phone: row.phone,
            gender: row.gender,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateUserRequest {
        CreateUserRequest {
            username: "alice".into(),
            name: "Alice".into(),
            email: "a@x.com".into(),
            password: "hunter22".into(),
            phone: "081234567".into(),
        }
    }

    #[test]
    fn create_request_validation() {
        assert!(create_request().validate().is_ok());

        let mut req = create_request();
        req.username = "  ".into();
        assert!(req.validate().is_err());

        let mut req = create_request();
        req.email = "nope".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_request_with_missing_field_binds_then_fails_validation() {
        let req: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "username": "alice",
            "name": "Alice",
            "email": "a@x.com",
            "password": "hunter22",
        }))
        .unwrap();

        assert_eq!(req.phone, "");
        assert_eq!(req.validate(), Err("phone is invalid"));
    }

    #[test]
    fn update_ignores_username_and_id_in_body() {
        let req: UpdateUserRequest = serde_json::from_value(serde_json::json!({
            "id": 99,
            "userID": 99,
            "username": "mallory",
            "name": "Alicia",
        }))
        .unwrap();

        assert_eq!(
            req.into_changes(),
            UserChanges {
                name: Some("Alicia".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn update_blank_fields_mean_unchanged() {
        let req = UpdateUserRequest {
            email: Some("".into()),
            phone: Some("  ".into()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
        assert_eq!(req.into_changes(), UserChanges::default());
    }

    #[test]
    fn update_rejects_bad_values() {
        let req = UpdateUserRequest {
            email: Some("nope".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn user_response_uses_public_field_names() {
        let row = UserRow {
            id: 3,
            username: "alice".into(),
            name: "Alice".into(),
            email: "a@x.com".into(),
            phone: "081234567".into(),
            gender: Some("f".into()),
        };
        let plain = serde_json::to_value(UserResponse::from_row(row.clone())).unwrap();
        assert_eq!(plain["userID"], 3);
        assert!(plain.get("gender").is_none());
        assert!(plain.get("password").is_none());

        let full = serde_json::to_value(UserResponse::with_profile(row)).unwrap();
        assert_eq!(full["gender"], "f");
    }
}
