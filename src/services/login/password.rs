use std::sync::Arc;
use std::time::Instant;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::entities::{logins, users};
use crate::errors::Error;
use crate::metrics::{AppMetrics, LoginOutcome};
use crate::requests::login::PasswordLoginRequest;
use crate::security::PasswordHasher;
use crate::session::{Session, SessionStore};

/// A successful password login
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordLogin {
    pub user_id: i32,
    pub session: Session,
}

/// Authenticate `request` and open a session for the matching user
///
/// Unknown usernames and wrong passwords both end in
/// [`Error::InvalidCredentials`]. `previous` is the session the client
/// already held, it is destroyed once the new credentials check out.
#[::tracing::instrument(
    skip(db, hasher, sessions, request, metrics),
    fields(username = %request.username)
)]
pub async fn login(
    db: &DatabaseConnection,
    hasher: &Arc<PasswordHasher>,
    sessions: &dyn SessionStore,
    previous: Option<Uuid>,
    request: PasswordLoginRequest,
    metrics: &AppMetrics,
) -> Result<PasswordLogin, Error> {
    let start = Instant::now();
    let result = authenticate(db, hasher, sessions, previous, request, metrics).await;

    let outcome = match &result {
        Ok(_) => LoginOutcome::Success,
        Err(Error::InvalidCredentials) => LoginOutcome::InvalidCredentials,
        Err(_) => LoginOutcome::Error,
    };
    metrics.record_login_attempt(outcome, start.elapsed().as_secs_f64());

    match &result {
        Ok(login) => ::tracing::info!(user_id = login.user_id, "Password login succeeded"),
        Err(Error::InvalidCredentials) => ::tracing::info!("Password login rejected"),
        Err(_) => {}
    }

    result
}

async fn authenticate(
    db: &DatabaseConnection,
    hasher: &Arc<PasswordHasher>,
    sessions: &dyn SessionStore,
    previous: Option<Uuid>,
    request: PasswordLoginRequest,
    metrics: &AppMetrics,
) -> Result<PasswordLogin, Error> {
    let PasswordLoginRequest { username, password } = request;

    let Some(login) = logins::Model::find_by_username(db, &username).await? else {
        equalize(hasher, password).await?;

        return Err(Error::InvalidCredentials);
    };

    if !verify(hasher, password, login.password).await? {
        return Err(Error::InvalidCredentials);
    }

    let Some(user) = users::Model::find_by_username(db, &username).await? else {
        ::tracing::warn!("Login record has no matching user");

        return Err(Error::InvalidCredentials);
    };

    if let Some(previous) = previous {
        rotate(sessions, previous, metrics).await?;
    }

    let session = sessions.create(user.id).await.map_err(Error::Session)?;
    metrics.record_session_created();

    Ok(PasswordLogin {
        user_id: user.id,
        session,
    })
}

async fn rotate(
    sessions: &dyn SessionStore,
    previous: Uuid,
    metrics: &AppMetrics,
) -> Result<(), Error> {
    if sessions.find(previous).await.map_err(Error::Session)?.is_none() {
        return Ok(());
    }

    sessions.destroy(previous).await.map_err(Error::Session)?;
    metrics.record_session_rotated();

    ::tracing::debug!(session_id = %previous, "Previous session destroyed");

    Ok(())
}

async fn verify(hasher: &Arc<PasswordHasher>, password: String, stored: String) -> Result<bool, Error> {
    let hasher = Arc::clone(hasher);

    tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
        .await
        .map_err(Error::internal)?
        .map_err(Error::from)
}

async fn equalize(hasher: &Arc<PasswordHasher>, password: String) -> Result<(), Error> {
    let hasher = Arc::clone(hasher);

    tokio::task::spawn_blocking(move || hasher.equalize(&password))
        .await
        .map_err(Error::internal)
}
