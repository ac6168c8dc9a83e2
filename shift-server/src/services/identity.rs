//! Identity Service - organizations, managers, employees, tokens
//!
//! Login creates a token; the access gate only ever reads them.

use shared::models::{
    Employee, EmployeeCreate, LoginResponse, Manager, ManagerCreate, Organization,
    OrganizationCreate, Role,
};
use shared::{AppError, AppResult, ErrorCode};
use validator::ValidateEmail;

use crate::auth::{generate_secret, hash_password, verify_password};
use crate::db::DbService;
use crate::db::repository::{RepoError, employee, manager, organization, role, token};
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN,
    validate_optional_text, validate_required_text,
};

#[derive(Clone)]
pub struct IdentityService {
    db: DbService,
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password).map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

fn employee_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::EmployeeNotFound, format!("Employee {id} not found"))
}

impl IdentityService {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    // ── Organizations ──────────────────────────────────────────────

    pub async fn create_organization(&self, data: OrganizationCreate) -> AppResult<Organization> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&data.short_key, "short_key", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(data.default_photo.as_deref(), "default_photo", MAX_URL_LEN)?;

        let api_key = generate_secret();
        let mut conn = self.db.acquire().await?;
        let id = organization::insert(
            &mut conn,
            data.name.trim(),
            data.short_key.trim(),
            &api_key,
            data.default_photo.as_deref(),
        )
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::ShortKeyExists)
                .with_detail("short_key", data.short_key.clone()),
            other => other.into(),
        })?;

        tracing::info!(organization_id = id, short_key = %data.short_key, "Organization created");
        Ok(Organization {
            id,
            name: data.name.trim().to_string(),
            short_key: data.short_key.trim().to_string(),
            api_key,
            default_photo: data.default_photo,
        })
    }

    /// Replace the API key; the old key stops resolving immediately
    pub async fn rotate_api_key(&self, organization_id: i64) -> AppResult<Organization> {
        let api_key = generate_secret();
        let mut tx = self.db.begin().await?;
        if !organization::update_api_key(&mut tx, organization_id, &api_key).await? {
            return Err(AppError::new(ErrorCode::OrganizationNotFound));
        }
        let org = organization::find_by_id(&mut tx, organization_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OrganizationNotFound))?;
        tx.commit().await.map_err(RepoError::from)?;

        security_log!("INFO", "api_key_rotated", organization_id = organization_id);
        Ok(org)
    }

    pub async fn find_by_short_key(&self, short_key: &str) -> AppResult<Organization> {
        let mut conn = self.db.acquire().await?;
        organization::find_by_short_key(&mut conn, short_key)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::OrganizationNotFound).with_detail("short_key", short_key)
            })
    }

    // ── Managers ───────────────────────────────────────────────────

    pub async fn create_manager(
        &self,
        organization_id: i64,
        data: ManagerCreate,
    ) -> AppResult<Manager> {
        validate_required_text(&data.username, "username", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&data.password, "password", MAX_PASSWORD_LEN)?;

        let hash_pass = hash(&data.password)?;
        let mut conn = self.db.acquire().await?;
        if organization::find_by_id(&mut conn, organization_id)
            .await?
            .is_none()
        {
            return Err(AppError::new(ErrorCode::OrganizationNotFound));
        }

        let username = data.username.trim();
        let id = manager::insert(&mut conn, organization_id, username, &hash_pass)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => AppError::new(ErrorCode::ManagerUsernameExists)
                    .with_detail("username", username),
                other => other.into(),
            })?;

        tracing::info!(organization_id, manager_id = id, "Manager created");
        Ok(Manager {
            id,
            organization_id,
            username: username.to_string(),
        })
    }

    pub async fn login_manager(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        let mut conn = self.db.acquire().await?;
        let Some(creds) = manager::find_credentials(&mut conn, username.trim()).await? else {
            security_log!("WARN", "login_failed", kind = "manager", reason = "unknown_user");
            return Err(AppError::invalid_credentials());
        };
        if !verify_password(password, &creds.hash_pass) {
            security_log!("WARN", "login_failed", kind = "manager", reason = "bad_password");
            return Err(AppError::invalid_credentials());
        }

        let token = generate_secret();
        token::insert_for_manager(&mut conn, &token, creds.id, shared::util::now_millis()).await?;

        security_log!("INFO", "login", kind = "manager", manager_id = creds.id);
        Ok(LoginResponse {
            token,
            organization_id: creds.organization_id,
        })
    }

    // ── Employees ──────────────────────────────────────────────────

    pub async fn create_employee(
        &self,
        organization_id: i64,
        data: EmployeeCreate,
    ) -> AppResult<Employee> {
        validate_required_text(&data.first_name, "first_name", MAX_NAME_LEN)?;
        validate_required_text(&data.last_name, "last_name", MAX_NAME_LEN)?;
        validate_required_text(&data.email, "email", MAX_EMAIL_LEN)?;
        validate_required_text(&data.password, "password", MAX_PASSWORD_LEN)?;
        validate_optional_text(data.title.as_deref(), "title", MAX_SHORT_TEXT_LEN)?;
        let email = data.email.trim().to_string();
        if !email.validate_email() {
            return Err(AppError::validation(format!("Invalid email: {email}")));
        }

        let hash_pass = hash(&data.password)?;
        let mut conn = self.db.acquire().await?;
        let new = employee::NewEmployee {
            first_name: data.first_name.trim(),
            last_name: data.last_name.trim(),
            email: &email,
            hash_pass: &hash_pass,
            title: data.title.as_deref(),
        };
        let id = employee::insert(&mut conn, organization_id, new)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => {
                    AppError::new(ErrorCode::EmployeeEmailExists).with_detail("email", email.clone())
                }
                other => other.into(),
            })?;

        tracing::info!(organization_id, employee_id = id, "Employee created");
        employee::find_by_id(&mut conn, id, organization_id)
            .await?
            .ok_or_else(|| employee_not_found(id))
    }

    pub async fn list_employees(&self, organization_id: i64) -> AppResult<Vec<Employee>> {
        let mut conn = self.db.acquire().await?;
        Ok(employee::find_all(&mut conn, organization_id).await?)
    }

    pub async fn read_employee(&self, id: i64, organization_id: i64) -> AppResult<Employee> {
        let mut conn = self.db.acquire().await?;
        employee::find_by_id(&mut conn, id, organization_id)
            .await?
            .ok_or_else(|| employee_not_found(id))
    }

    pub async fn update_employee_title(
        &self,
        id: i64,
        organization_id: i64,
        title: Option<String>,
    ) -> AppResult<Employee> {
        validate_optional_text(title.as_deref(), "title", MAX_SHORT_TEXT_LEN)?;
        let mut conn = self.db.acquire().await?;
        if !employee::update_title(&mut conn, id, organization_id, title.as_deref()).await? {
            return Err(employee_not_found(id));
        }
        employee::find_by_id(&mut conn, id, organization_id)
            .await?
            .ok_or_else(|| employee_not_found(id))
    }

    /// Inactive employees keep their data and tokens, but cannot log in and
    /// their tokens stop resolving until reactivated
    pub async fn set_employee_active(
        &self,
        id: i64,
        organization_id: i64,
        active: bool,
    ) -> AppResult<Employee> {
        let mut conn = self.db.acquire().await?;
        if !employee::update_active(&mut conn, id, organization_id, active).await? {
            return Err(employee_not_found(id));
        }
        tracing::info!(organization_id, employee_id = id, active, "Employee active flag changed");
        employee::find_by_id(&mut conn, id, organization_id)
            .await?
            .ok_or_else(|| employee_not_found(id))
    }

    pub async fn login_employee(
        &self,
        short_key: &str,
        email: &str,
        password: &str,
    ) -> AppResult<LoginResponse> {
        let mut conn = self.db.acquire().await?;
        let Some(creds) = employee::find_credentials(&mut conn, short_key.trim(), email.trim()).await?
        else {
            security_log!("WARN", "login_failed", kind = "employee", reason = "unknown_user");
            return Err(AppError::invalid_credentials());
        };
        if !verify_password(password, &creds.hash_pass) {
            security_log!("WARN", "login_failed", kind = "employee", reason = "bad_password");
            return Err(AppError::invalid_credentials());
        }
        if !creds.active {
            security_log!("WARN", "login_failed", kind = "employee", reason = "inactive");
            return Err(AppError::new(ErrorCode::AccountDisabled));
        }

        let token = generate_secret();
        token::insert_for_employee(&mut conn, &token, creds.id, shared::util::now_millis()).await?;

        security_log!("INFO", "login", kind = "employee", employee_id = creds.id);
        Ok(LoginResponse {
            token,
            organization_id: creds.organization_id,
        })
    }

    /// Revoke a manager or employee token
    pub async fn logout(&self, token_value: &str) -> AppResult<()> {
        let mut conn = self.db.acquire().await?;
        if !token::delete(&mut conn, token_value).await? {
            return Err(AppError::invalid_token("Token not found"));
        }
        security_log!("INFO", "logout", outcome = "revoked");
        Ok(())
    }

    /// Link a role (created on first use); returns the employee's roles
    pub async fn assign_role(
        &self,
        id: i64,
        organization_id: i64,
        role_name: &str,
    ) -> AppResult<Vec<Role>> {
        validate_required_text(role_name, "role", MAX_NAME_LEN)?;
        let mut tx = self.db.begin().await?;
        if employee::find_by_id(&mut tx, id, organization_id)
            .await?
            .is_none()
        {
            return Err(employee_not_found(id));
        }
        let role = role::find_or_create(&mut tx, role_name.trim()).await?;
        role::link_employee(&mut tx, id, role.id).await?;
        let roles = role::find_for_employee(&mut tx, id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(organization_id, employee_id = id, role = %role.name, "Role assigned");
        Ok(roles)
    }

    /// Mutual friendship between two employees of the same organization
    pub async fn add_friendship(
        &self,
        organization_id: i64,
        employee_id: i64,
        friend_id: i64,
    ) -> AppResult<Vec<i64>> {
        if employee_id == friend_id {
            return Err(AppError::validation("An employee cannot befriend themselves"));
        }
        let mut tx = self.db.begin().await?;
        let found =
            employee::filter_in_organization(&mut tx, organization_id, &[employee_id, friend_id])
                .await?;
        if !found.contains(&employee_id) {
            return Err(employee_not_found(employee_id));
        }
        if !found.contains(&friend_id) {
            return Err(employee_not_found(friend_id));
        }
        employee::add_friendship(&mut tx, employee_id, friend_id).await?;
        let friends = employee::find_friend_ids(&mut tx, employee_id).await?;
        tx.commit().await.map_err(RepoError::from)?;
        Ok(friends)
    }

    /// Delete an employee and every reference to them in one transaction
    pub async fn delete_employee(&self, id: i64, organization_id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        if employee::find_by_id(&mut tx, id, organization_id)
            .await?
            .is_none()
        {
            return Err(employee_not_found(id));
        }
        employee::delete_cascade(&mut tx, id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(organization_id, employee_id = id, "Employee deleted");
        Ok(())
    }
}
