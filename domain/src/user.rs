use crate::error::Error;
use crate::{jwt, users, Id};
use entity_api::user;
use log::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use service::config::Config;
use utoipa::ToSchema;

pub use entity_api::user::find_by_id;

#[derive(Clone, Deserialize, ToSchema)]
#[schema(as = domain::user::Credentials)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// What a successful login hands back to the client.
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = domain::user::Session)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[schema(as = domain::user::SessionUser)]
pub struct SessionUser {
    pub id: Id,
    pub email: String,
    pub name: String,
}

impl From<&users::Model> for SessionUser {
    fn from(user: &users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Checks the credentials and issues a token for the user.
pub async fn login(
    db: &DatabaseConnection,
    config: &Config,
    email: &str,
    password: &str,
) -> Result<Session, Error> {
    let user = user::authenticate(db, email, password).await?;
    let token = jwt::issue_token(config, &user)?;
    info!("User {} logged in", user.id);

    Ok(Session {
        token,
        user: SessionUser::from(&user),
    })
}

/// Creates the configured default user if both its email and password are
/// set and no user with that email exists yet.
pub async fn seed_default_user(db: &DatabaseConnection, config: &Config) -> Result<(), Error> {
    let Some((email, password)) = config.default_user_credentials() else {
        debug!("No default user configured");
        return Ok(());
    };

    user::seed_default_user(db, email, password, config.default_user_name()).await?;
    Ok(())
}
