//! Admin-area access policy.
//!
//! Access is granted when the signed-in email is on the configured allow-list,
//! or when the principal carries the configured admin role claim.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::{Principal, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessGrant {
    AllowListedEmail(String),
    RoleClaim(Role),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("access denied for '{0}'")]
    NotAllowed(String),

    #[error("access denied: no email address and no admin role")]
    NoIdentity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    allowed_emails: BTreeSet<String>,
    admin_role: Option<Role>,
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl AccessPolicy {
    pub fn new<I, S>(allowed_emails: I, admin_role: Option<Role>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_emails = allowed_emails
            .into_iter()
            .map(|e| normalize_email(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            allowed_emails,
            admin_role,
        }
    }

    pub fn allowed_emails(&self) -> impl Iterator<Item = &str> {
        self.allowed_emails.iter().map(String::as_str)
    }

    pub fn admin_role(&self) -> Option<&Role> {
        self.admin_role.as_ref()
    }

    /// Decide whether `principal` may enter the admin area.
    ///
    /// - No IO
    /// - No panics
    pub fn check(&self, principal: &Principal) -> Result<AccessGrant, AccessError> {
        if let Some(email) = principal.email.as_deref().map(normalize_email) {
            if self.allowed_emails.contains(&email) {
                return Ok(AccessGrant::AllowListedEmail(email));
            }
        }

        if let Some(role) = &self.admin_role {
            if principal.roles.contains(role) {
                return Ok(AccessGrant::RoleClaim(role.clone()));
            }
        }

        match &principal.email {
            Some(email) => Err(AccessError::NotAllowed(email.clone())),
            None => Err(AccessError::NoIdentity),
        }
    }
}
