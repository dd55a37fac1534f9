use serde::{Deserialize, Serialize};

use crate::{IdentityClaims, Role};

/// Subject identifier assigned by the identity provider (opaque).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The signed-in identity as seen by the access policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub principal_id: PrincipalId,
    /// Primary email address, if the provider shared one.
    pub email: Option<String>,
    pub roles: Vec<Role>,
}

impl From<&IdentityClaims> for Principal {
    fn from(claims: &IdentityClaims) -> Self {
        Self {
            principal_id: claims.sub.clone(),
            email: claims.email.clone(),
            roles: claims.roles.clone(),
        }
    }
}
