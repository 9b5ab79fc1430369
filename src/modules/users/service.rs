use anyhow::anyhow;
use chrono::Utc;
use tracing::{info, instrument, warn};

use supportportal_core::{AppError, Role, RoleAuthorityRegistry};

use crate::directory::DirectoryError;
use crate::modules::users::model::{
    Account, AddUserRequest, LoginError, LoginRequest, RegisterRequest, UpdateUserRequest,
};
use crate::state::AppState;
use crate::utils::password::{generate_password, generate_user_id, hash_password, verify_password};

fn login_error(err: LoginError) -> AppError {
    AppError::new(err.status(), err)
}

/// Uniqueness conflicts and missing accounts are the caller's fault.
fn directory_error(err: DirectoryError) -> AppError {
    match err {
        DirectoryError::UsernameTaken
        | DirectoryError::EmailTaken
        | DirectoryError::NotFound(_) => AppError::bad_request(err),
        DirectoryError::Unavailable(_) => AppError::internal(err),
    }
}

fn parse_role(name: &str) -> Result<Role, AppError> {
    name.parse::<Role>().map_err(AppError::bad_request)
}

/// Fields shared by account creation paths.
struct NewAccount<'a> {
    first_name: &'a str,
    last_name: &'a str,
    username: &'a str,
    email: &'a str,
    role: Role,
    active: bool,
    non_locked: bool,
}

pub struct UserService;

impl UserService {
    /// Checks credentials and issues a token for the account.
    ///
    /// Failed attempts are counted per username; once the threshold is
    /// reached the next attempt locks the account.
    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<(Account, String), AppError> {
        let Some(mut account) = state.directory.find_by_username(&dto.username).await? else {
            state.login_attempts.record_failure(&dto.username);
            warn!("Login failed: unknown username");
            return Err(login_error(LoginError::BadCredentials));
        };

        Self::validate_login_attempt(state, &mut account).await?;

        if !account.non_locked {
            warn!("Login refused: account locked");
            return Err(login_error(LoginError::AccountLocked));
        }
        if !account.active {
            warn!("Login refused: account disabled");
            return Err(login_error(LoginError::AccountDisabled));
        }

        if !verify_password(&dto.password, &account.password_hash)? {
            let failures = state.login_attempts.record_failure(&account.username);
            warn!(login.failures = failures, "Login failed: bad password");
            return Err(login_error(LoginError::BadCredentials));
        }

        state.login_attempts.evict(&account.username);
        // Only the login dates change; flags set concurrently must survive.
        let account = state
            .directory
            .record_login(&account.username, Utc::now())
            .await?
            .ok_or_else(|| login_error(LoginError::BadCredentials))?;

        let token = state
            .token_codec
            .issue(&account.principal())
            .map_err(AppError::internal)?;

        info!("Login succeeded");
        Ok((account, token))
    }

    /// Locks an unlocked account that exceeded the failure threshold. For an
    /// already locked account the lock lives on the account, so its counter
    /// is dropped.
    async fn validate_login_attempt(state: &AppState, account: &mut Account) -> Result<(), AppError> {
        if account.non_locked {
            if state.login_attempts.exceeded_max(&account.username) {
                if let Some(locked) = state.directory.lock(&account.username).await? {
                    *account = locked;
                } else {
                    account.non_locked = false;
                }
                warn!("Account locked after repeated login failures");
            }
        } else {
            state.login_attempts.evict(&account.username);
        }
        Ok(())
    }

    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn register(state: &AppState, dto: RegisterRequest) -> Result<Account, AppError> {
        Self::validate_new_username_and_email(state, None, &dto.username, &dto.email).await?;

        let account = Self::create_account(
            state,
            NewAccount {
                first_name: &dto.first_name,
                last_name: &dto.last_name,
                username: &dto.username,
                email: &dto.email,
                role: Role::User,
                active: true,
                non_locked: true,
            },
        )
        .await?;

        info!("User registered");
        Ok(account)
    }

    #[instrument(skip_all, fields(username = %dto.username, role = %dto.role))]
    pub async fn add_user(state: &AppState, dto: AddUserRequest) -> Result<Account, AppError> {
        let role = parse_role(&dto.role)?;
        Self::validate_new_username_and_email(state, None, &dto.username, &dto.email).await?;

        let account = Self::create_account(
            state,
            NewAccount {
                first_name: &dto.first_name,
                last_name: &dto.last_name,
                username: &dto.username,
                email: &dto.email,
                role,
                active: dto.active,
                non_locked: dto.non_locked,
            },
        )
        .await?;

        info!("User added");
        Ok(account)
    }

    /// Updates profile, role and flags. The authority snapshot follows the new
    /// role but tokens already issued keep the old one until they expire.
    #[instrument(skip_all, fields(current_username = %dto.current_username))]
    pub async fn update_user(state: &AppState, dto: UpdateUserRequest) -> Result<Account, AppError> {
        let role = parse_role(&dto.role)?;
        let mut account = Self::validate_new_username_and_email(
            state,
            Some(&dto.current_username),
            &dto.username,
            &dto.email,
        )
        .await?
        .ok_or_else(|| {
            AppError::bad_request(anyhow!("No user found by username: {}", dto.current_username))
        })?;

        account.first_name = dto.first_name;
        account.last_name = dto.last_name;
        account.username = dto.username;
        account.email = dto.email;
        account.role = role;
        account.authorities = RoleAuthorityRegistry::global().snapshot(role);
        account.active = dto.active;
        account.non_locked = dto.non_locked;

        let account = state
            .directory
            .persist(&dto.current_username, account)
            .await
            .map_err(directory_error)?;

        info!(username = %account.username, "User updated");
        Ok(account)
    }

    #[instrument(skip_all, fields(email = %email))]
    pub async fn reset_password(state: &AppState, email: &str) -> Result<(), AppError> {
        let no_user = || AppError::bad_request(anyhow!("No user found for email: {email}"));
        let account = state.directory.find_by_email(email).await?.ok_or_else(no_user)?;

        let password = generate_password(state.password_config.generated_length);
        let password_hash = hash_password(&password, state.password_config.bcrypt_cost)?;
        let account = state
            .directory
            .set_password_hash(&account.username, password_hash)
            .await?
            .ok_or_else(no_user)?;

        state
            .notifier
            .send_generated_password(&account.first_name, &password, &account.email)
            .await?;

        info!(username = %account.username, "Password reset");
        Ok(())
    }

    pub async fn find_user(state: &AppState, username: &str) -> Result<Account, AppError> {
        state
            .directory
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("No user found by username: {username}")))
    }

    pub async fn list_users(state: &AppState) -> Result<Vec<Account>, AppError> {
        Ok(state.directory.list().await?)
    }

    #[instrument(skip(state))]
    pub async fn delete_user(state: &AppState, username: &str) -> Result<(), AppError> {
        if !state.directory.delete(username).await? {
            return Err(AppError::not_found(anyhow!(
                "No user found by username: {username}"
            )));
        }
        state.login_attempts.evict(username);

        info!("User deleted");
        Ok(())
    }

    /// Creates a super admin with a generated password unless `username`
    /// already exists.
    #[instrument(skip(state))]
    pub async fn bootstrap_super_admin(
        state: &AppState,
        username: &str,
        email: &str,
    ) -> Result<Option<Account>, AppError> {
        if state.directory.find_by_username(username).await?.is_some() {
            return Ok(None);
        }
        Self::validate_new_username_and_email(state, None, username, email).await?;

        let account = Self::create_account(
            state,
            NewAccount {
                first_name: "Super",
                last_name: "Admin",
                username,
                email,
                role: Role::SuperAdmin,
                active: true,
                non_locked: true,
            },
        )
        .await?;

        info!("Super admin created");
        Ok(Some(account))
    }

    /// Rejects a username or email held by an account other than the one
    /// being edited. Returns the edited account when `current_username` is set.
    async fn validate_new_username_and_email(
        state: &AppState,
        current_username: Option<&str>,
        new_username: &str,
        new_email: &str,
    ) -> Result<Option<Account>, AppError> {
        let by_username = state.directory.find_by_username(new_username).await?;
        let by_email = state.directory.find_by_email(new_email).await?;

        let current = match current_username {
            Some(current_username) => {
                let current = state
                    .directory
                    .find_by_username(current_username)
                    .await?
                    .ok_or_else(|| {
                        AppError::bad_request(anyhow!(
                            "No user found by username: {current_username}"
                        ))
                    })?;
                Some(current)
            }
            None => None,
        };

        let is_other = |account: &Account| {
            current
                .as_ref()
                .is_none_or(|current| current.user_id != account.user_id)
        };

        if by_username.as_ref().is_some_and(is_other) {
            return Err(AppError::bad_request(anyhow!("Username already exists")));
        }
        if by_email.as_ref().is_some_and(is_other) {
            return Err(AppError::bad_request(anyhow!("Email already exists")));
        }

        Ok(current)
    }

    async fn create_account(state: &AppState, new: NewAccount<'_>) -> Result<Account, AppError> {
        let password = generate_password(state.password_config.generated_length);

        let account = Account {
            user_id: generate_user_id(),
            first_name: new.first_name.to_string(),
            last_name: new.last_name.to_string(),
            username: new.username.to_string(),
            email: new.email.to_string(),
            password_hash: hash_password(&password, state.password_config.bcrypt_cost)?,
            role: new.role,
            authorities: RoleAuthorityRegistry::global().snapshot(new.role),
            active: new.active,
            non_locked: new.non_locked,
            join_date: Utc::now(),
            last_login_date: None,
            last_login_date_display: None,
        };
        // Uniqueness is enforced by `create`; the earlier checks can race.
        let account = state.directory.create(account).await.map_err(directory_error)?;

        state
            .notifier
            .send_generated_password(&account.first_name, &password, &account.email)
            .await?;

        Ok(account)
    }
}
