use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use shopdash_core::{Document, DocumentId, DomainError, DomainResult};

use crate::PasswordDigest;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 20;

/// A stored user as returned by the listing query.
///
/// The listing never projects `password`, so it is not part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Document for User {
    const DOC_TYPE: &'static str = "user";

    type Draft = UserDraft;

    fn list_query() -> String {
        format!("*[_type == \"{}\"]{{ _id, email, username }}", Self::DOC_TYPE)
    }
}

/// Outward view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: DocumentId,
    pub email: Option<String>,
    pub username: Option<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
        }
    }
}

/// Sign-up form as submitted by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn validate(&self) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::validation("Name is required"));
        }
        if !EMAIL_PATTERN.is_match(self.email.trim()) {
            return Err(DomainError::validation("invalid email"));
        }
        let len = self.password.chars().count();
        if len < PASSWORD_MIN {
            return Err(DomainError::validation(format!(
                "Password must be at least {PASSWORD_MIN}"
            )));
        }
        if len > PASSWORD_MAX {
            return Err(DomainError::validation(format!(
                "Password must be less than {PASSWORD_MAX}"
            )));
        }
        Ok(())
    }

    /// Validate and turn the form into what gets stored.
    pub fn into_draft(self) -> DomainResult<UserDraft> {
        self.validate()?;
        Ok(UserDraft {
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
            password: PasswordDigest::derive(&self.password),
        })
    }
}

/// A user about to be created. The password is only ever a digest here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    pub email: String,
    pub username: String,
    pub password: PasswordDigest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: usize,
}

pub fn user_stats(users: &[User]) -> UserStats {
    UserStats {
        total_users: users.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(email: &str, username: &str, password: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_form_becomes_draft_with_digest() {
        let draft = form(" ada@example.com ", "ada", "secret1").into_draft().unwrap();
        assert_eq!(draft.email, "ada@example.com");
        assert!(draft.password.verify("secret1"));

        let body = serde_json::to_value(&draft).unwrap();
        let stored = body["password"].as_str().unwrap();
        assert!(stored.starts_with("sha256$"));
        assert_ne!(stored, "secret1");
    }

    #[test]
    fn email_must_look_like_an_address() {
        assert_eq!(
            form("not-an-email", "ada", "secret1").validate(),
            Err(DomainError::validation("invalid email"))
        );
    }

    #[test]
    fn password_length_is_bounded() {
        assert_eq!(
            form("a@b.co", "ada", "12345").validate(),
            Err(DomainError::validation("Password must be at least 6"))
        );
        assert_eq!(
            form("a@b.co", "ada", &"x".repeat(21)).validate(),
            Err(DomainError::validation("Password must be less than 20"))
        );
        assert!(form("a@b.co", "ada", &"x".repeat(20)).validate().is_ok());
    }

    #[test]
    fn username_is_required() {
        assert!(form("a@b.co", " ", "secret1").validate().is_err());
    }

    #[test]
    fn stored_plaintext_password_never_reaches_the_view() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "email": "a@b.co",
            "username": "ada",
            "password": "legacy-plaintext"
        }))
        .unwrap();

        let view = serde_json::to_value(UserView::from(user)).unwrap();
        assert_eq!(view, json!({"id": "u1", "email": "a@b.co", "username": "ada"}));
    }

    #[test]
    fn stats_count_users() {
        let users: Vec<User> = (0..3)
            .map(|i| serde_json::from_value(json!({"_id": format!("u{i}")})).unwrap())
            .collect();
        assert_eq!(user_stats(&users), UserStats { total_users: 3 });
    }

    #[test]
    fn listing_query_does_not_project_password() {
        assert!(!User::list_query().contains("password"));
    }
}
