//! User actions - registration, profile lookup

use tracing::{debug, info};

use crate::common::validation::{check_max_chars, check_max_chars_opt, MAX_NAME_LEN};
use crate::common::{ApiError, ApiResult, Caller, UserId};
use crate::domains::users::data::CreateUserInput;
use crate::domains::users::models::{CreateUser, DuplicateUser, User};
use crate::kernel::ServerDeps;

const MAX_USERNAME_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 254;

fn duplicate_message(field: &str) -> String {
    format!("A user with that {} already exists", field)
}

fn validate(input: &CreateUserInput) -> ApiResult<()> {
    if input.username.trim().is_empty() {
        return Err(ApiError::validation("Username must not be empty"));
    }
    check_max_chars("Username", &input.username, MAX_USERNAME_LEN)?;
    if !input.email.contains('@') || input.email.chars().count() > MAX_EMAIL_LEN {
        return Err(ApiError::validation("Enter a valid email address"));
    }
    if input.password.is_empty() {
        return Err(ApiError::validation("Password must not be empty"));
    }
    check_max_chars_opt("First name", input.first_name.as_deref(), MAX_NAME_LEN)?;
    check_max_chars_opt("Last name", input.last_name.as_deref(), MAX_NAME_LEN)
}

/// Register a new user. Open to anonymous callers.
pub async fn create_user(input: CreateUserInput, deps: &ServerDeps) -> ApiResult<User> {
    validate(&input)?;

    let repo = deps.repo();
    if repo.find_user_by_username(&input.username).await?.is_some() {
        return Err(ApiError::Validation(duplicate_message("username")));
    }
    if repo.find_user_by_email(&input.email).await?.is_some() {
        return Err(ApiError::Validation(duplicate_message("email")));
    }

    let password_hash = deps.password_hasher.hash_password(&input.password)?;

    // The pre-checks can race a concurrent registration; the store's unique
    // constraints have the last word.
    let user = repo
        .create_user(CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            gender: input.gender,
        })
        .await
        .map_err(|e| match e.downcast_ref::<DuplicateUser>() {
            Some(dup) => ApiError::Validation(duplicate_message(dup.field)),
            None => ApiError::Internal(e),
        })?;

    info!(user_id = %user.id, username = %user.username, "User created");
    Ok(user)
}

/// The signed-in caller's own profile.
pub async fn me(caller: &Caller, deps: &ServerDeps) -> ApiResult<User> {
    let user_id = caller.require_user()?;

    match deps.repo().find_user(user_id).await? {
        Some(user) => Ok(user),
        None => {
            // Token outlived its user.
            debug!(%user_id, "Token subject no longer exists");
            Err(ApiError::Unauthenticated)
        }
    }
}

/// Resolve a user reference held by another entity.
pub async fn get_user(id: UserId, deps: &ServerDeps) -> ApiResult<User> {
    deps.repo()
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Invalid user ID!"))
}
