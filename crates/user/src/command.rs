use crate::password::{DUMMY_PASSWORD_HASH, hash_password_blocking, verify_password_blocking};
use crate::{NewUser, User, UserError, UserResult, UserStore};

pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub password: String,
}

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Register a new user
///
/// Email is checked before username. Nothing is written when either is
/// already taken.
#[tracing::instrument(skip_all, fields(username = %input.username))]
pub async fn register<S: UserStore + ?Sized>(store: &S, input: RegisterInput) -> UserResult<User> {
    if store.find_by_email(&input.email).await?.is_some() {
        tracing::info!("Registration rejected: email already registered");
        return Err(UserError::EmailAlreadyExists);
    }

    if store.find_by_username(&input.username).await?.is_some() {
        tracing::info!("Registration rejected: username already taken");
        return Err(UserError::UsernameTaken);
    }

    let hashed_password = hash_password_blocking(input.password).await?;

    let user = store
        .insert(NewUser {
            email: input.email,
            username: input.username,
            hashed_password,
        })
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(user)
}

/// Check a username/password pair
///
/// An unknown username and a wrong password produce the same error and
/// both pay for one password verification.
#[tracing::instrument(skip_all, fields(username = %input.username))]
pub async fn login<S: UserStore + ?Sized>(store: &S, input: LoginInput) -> UserResult<User> {
    let Some(user) = store.find_by_username(&input.username).await? else {
        verify_password_blocking(input.password, DUMMY_PASSWORD_HASH.to_owned()).await?;
        tracing::warn!("Failed login attempt: unknown username");
        return Err(UserError::InvalidCredentials);
    };

    if !verify_password_blocking(input.password, user.hashed_password.clone()).await? {
        tracing::warn!("Failed login attempt: incorrect password");
        return Err(UserError::InvalidCredentials);
    }

    Ok(user)
}
