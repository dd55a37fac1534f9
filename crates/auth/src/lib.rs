//! `shopdash-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. The identity
//! provider signs tokens; this crate verifies them and decides whether the
//! signed-in principal may enter the admin area.

pub mod claims;
pub mod jwt;
pub mod policy;
pub mod principal;
pub mod roles;

pub use claims::{IdentityClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtError, JwtValidator};
pub use policy::{AccessError, AccessGrant, AccessPolicy};
pub use principal::{Principal, PrincipalId};
pub use roles::Role;
