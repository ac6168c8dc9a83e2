//! Authentication & authorization
//!
//! - [`gate`] - credential → [`Principal`] resolution and role checks
//! - [`middleware`] - axum middleware applying a [`RequiredRole`] to a router
//! - [`credentials`] - argon2 hashing, token / API key generation

pub mod credentials;
pub mod gate;
pub mod middleware;

pub use credentials::{generate_secret, hash_password, verify_password};
pub use gate::{
    AccessGate, IdentityStore, Principal, PrincipalKind, RequiredRole, extract_credential,
};
pub use middleware::{RoleGate, require_role};
