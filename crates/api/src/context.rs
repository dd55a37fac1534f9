use shopdash_auth::{AccessGrant, Principal, PrincipalId, Role};

/// Principal context for a request (authenticated identity + how access was granted).
///
/// Inserted by the auth middleware; only present on requests that passed the
/// access policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
    grant: AccessGrant,
}

impl PrincipalContext {
    pub fn new(principal: Principal, grant: AccessGrant) -> Self {
        Self { principal, grant }
    }

    pub fn principal_id(&self) -> &PrincipalId {
        &self.principal.principal_id
    }

    pub fn email(&self) -> Option<&str> {
        self.principal.email.as_deref()
    }

    pub fn roles(&self) -> &[Role] {
        &self.principal.roles
    }

    pub fn grant(&self) -> &AccessGrant {
        &self.grant
    }
}
