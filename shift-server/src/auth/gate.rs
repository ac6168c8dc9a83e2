//! Access Gate
//!
//! Resolves a presented credential to a tenant-scoped [`Principal`].
//! Three credential shapes are tried in order, each a single equality lookup:
//!
//! 1. organization API key → organization principal
//! 2. manager token → manager principal
//! 3. employee token → employee principal
//!
//! Nothing is cached, so a deleted token or rotated API key is rejected on
//! the next request.

use std::future::Future;

use shared::{AppError, AppResult};

use crate::db::DbService;
use crate::db::repository::{organization, token};
use crate::security_log;

/// Who is calling, always scoped to one organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub organization_id: i64,
    pub kind: PrincipalKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalKind {
    /// Authenticated with the organization API key (devices, integrations)
    Organization,
    Manager { manager_id: i64 },
    Employee { employee_id: i64 },
}

impl Principal {
    pub fn manager_id(&self) -> Option<i64> {
        match self.kind {
            PrincipalKind::Manager { manager_id } => Some(manager_id),
            _ => None,
        }
    }

    pub fn employee_id(&self) -> Option<i64> {
        match self.kind {
            PrincipalKind::Employee { employee_id } => Some(employee_id),
            _ => None,
        }
    }
}

/// Role an operation requires, checked before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    Manager,
    Employee,
    ApiKey,
    /// Any resolved principal
    Any,
}

impl RequiredRole {
    pub fn permits(self, kind: &PrincipalKind) -> bool {
        match self {
            RequiredRole::Any => true,
            RequiredRole::Manager => matches!(kind, PrincipalKind::Manager { .. }),
            RequiredRole::Employee => matches!(kind, PrincipalKind::Employee { .. }),
            RequiredRole::ApiKey => matches!(kind, PrincipalKind::Organization),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RequiredRole::Manager => "manager",
            RequiredRole::Employee => "employee",
            RequiredRole::ApiKey => "api_key",
            RequiredRole::Any => "any",
        }
    }
}

/// Credential lookups the gate needs from the identity store
pub trait IdentityStore: Send + Sync {
    /// Organization id owning the API key
    fn organization_by_api_key(
        &self,
        api_key: &str,
    ) -> impl Future<Output = AppResult<Option<i64>>> + Send;

    /// `(organization_id, manager_id)` for a manager token
    fn manager_by_token(
        &self,
        token: &str,
    ) -> impl Future<Output = AppResult<Option<(i64, i64)>>> + Send;

    /// `(organization_id, employee_id)` for an employee token
    fn employee_by_token(
        &self,
        token: &str,
    ) -> impl Future<Output = AppResult<Option<(i64, i64)>>> + Send;
}

impl IdentityStore for DbService {
    async fn organization_by_api_key(&self, api_key: &str) -> AppResult<Option<i64>> {
        let mut conn = self.acquire().await?;
        Ok(organization::find_id_by_api_key(&mut conn, api_key).await?)
    }

    async fn manager_by_token(&self, token: &str) -> AppResult<Option<(i64, i64)>> {
        let mut conn = self.acquire().await?;
        let owner = token::find_manager(&mut conn, token).await?;
        Ok(owner.map(|o| (o.organization_id, o.owner_id)))
    }

    async fn employee_by_token(&self, token: &str) -> AppResult<Option<(i64, i64)>> {
        let mut conn = self.acquire().await?;
        let owner = token::find_employee(&mut conn, token).await?;
        Ok(owner.map(|o| (o.organization_id, o.owner_id)))
    }
}

/// Strip an optional `Bearer ` prefix from an Authorization header value
pub fn extract_credential(header: &str) -> Option<&str> {
    let value = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    (!value.is_empty()).then_some(value)
}

#[derive(Clone)]
pub struct AccessGate<S> {
    store: S,
}

impl<S: IdentityStore> AccessGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Credential → principal, or `Unauthorized`. Read-only.
    pub async fn resolve_principal(&self, credential: &str) -> AppResult<Principal> {
        if let Some(organization_id) = self.store.organization_by_api_key(credential).await? {
            return Ok(Principal {
                organization_id,
                kind: PrincipalKind::Organization,
            });
        }

        if let Some((organization_id, manager_id)) = self.store.manager_by_token(credential).await?
        {
            return Ok(Principal {
                organization_id,
                kind: PrincipalKind::Manager { manager_id },
            });
        }

        if let Some((organization_id, employee_id)) =
            self.store.employee_by_token(credential).await?
        {
            return Ok(Principal {
                organization_id,
                kind: PrincipalKind::Employee { employee_id },
            });
        }

        security_log!("WARN", "credential_rejected", reason = "no_match");
        Err(AppError::unauthorized())
    }

    /// Resolve and check the required role. A resolved principal of the
    /// wrong kind is `RoleRequired`, not `Unauthorized`.
    pub async fn authorize(&self, credential: &str, required: RequiredRole) -> AppResult<Principal> {
        let principal = self.resolve_principal(credential).await?;
        if !required.permits(&principal.kind) {
            security_log!(
                "WARN",
                "role_denied",
                organization_id = principal.organization_id,
                required = required.name()
            );
            return Err(AppError::role_required(required.name()));
        }
        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory identity store keyed by credential
    #[derive(Default)]
    struct FakeStore {
        api_keys: HashMap<String, i64>,
        managers: HashMap<String, (i64, i64)>,
        employees: HashMap<String, (i64, i64)>,
    }

    impl IdentityStore for FakeStore {
        async fn organization_by_api_key(&self, api_key: &str) -> AppResult<Option<i64>> {
            Ok(self.api_keys.get(api_key).copied())
        }

        async fn manager_by_token(&self, token: &str) -> AppResult<Option<(i64, i64)>> {
            Ok(self.managers.get(token).copied())
        }

        async fn employee_by_token(&self, token: &str) -> AppResult<Option<(i64, i64)>> {
            Ok(self.employees.get(token).copied())
        }
    }

    fn gate() -> AccessGate<FakeStore> {
        let mut store = FakeStore::default();
        store.api_keys.insert("org-key".into(), 1);
        store.managers.insert("mgr-token".into(), (1, 10));
        store.employees.insert("emp-token".into(), (2, 20));
        AccessGate::new(store)
    }

    #[tokio::test]
    async fn test_resolves_each_credential_shape() {
        let gate = gate();

        let p = gate.resolve_principal("org-key").await.unwrap();
        assert_eq!(p.organization_id, 1);
        assert_eq!(p.kind, PrincipalKind::Organization);

        let p = gate.resolve_principal("mgr-token").await.unwrap();
        assert_eq!(p.kind, PrincipalKind::Manager { manager_id: 10 });
        assert_eq!(p.manager_id(), Some(10));

        let p = gate.resolve_principal("emp-token").await.unwrap();
        assert_eq!(p.organization_id, 2);
        assert_eq!(p.employee_id(), Some(20));
    }

    #[tokio::test]
    async fn test_unknown_credential_is_unauthorized() {
        let err = gate().resolve_principal("nope").await.unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_role_mismatch_is_role_required() {
        let gate = gate();
        let err = gate
            .authorize("emp-token", RequiredRole::Manager)
            .await
            .unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::RoleRequired);

        let err = gate
            .authorize("mgr-token", RequiredRole::ApiKey)
            .await
            .unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::RoleRequired);
    }

    #[tokio::test]
    async fn test_any_accepts_every_principal() {
        let gate = gate();
        for credential in ["org-key", "mgr-token", "emp-token"] {
            assert!(gate.authorize(credential, RequiredRole::Any).await.is_ok());
        }
        assert!(gate.authorize("missing", RequiredRole::Any).await.is_err());
    }

    #[test]
    fn test_extract_credential() {
        assert_eq!(extract_credential("Bearer abc"), Some("abc"));
        assert_eq!(extract_credential("abc"), Some("abc"));
        assert_eq!(extract_credential("Bearer "), None);
        assert_eq!(extract_credential(""), None);
    }
}
