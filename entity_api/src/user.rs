use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::users::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};

/// Inserts a new user, storing a hash of `password` rather than the password.
pub async fn create(
    db: &impl ConnectionTrait,
    email: &str,
    password: &str,
    name: &str,
) -> Result<Model, Error> {
    debug!("New user to be inserted: {email}");

    let now = Utc::now();
    let user_active_model = ActiveModel {
        email: Set(email.to_owned()),
        password: Set(generate_hash(password)),
        name: Set(name.to_owned()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(user_active_model.insert(db).await?)
}

pub async fn find_by_email(db: &impl ConnectionTrait, email: &str) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::new(EntityApiErrorKind::RecordNotFound))
}

pub fn verify_password(password_to_verify: &str, password_hash: &str) -> Result<(), Error> {
    password_auth::verify_password(password_to_verify, password_hash)
        .map_err(|_| Error::new(EntityApiErrorKind::RecordUnauthenticated))
}

pub fn generate_hash(password: &str) -> String {
    password_auth::generate_hash(password)
}

/// Looks up `email` and checks `password` against the stored hash.
///
/// An unknown email and a wrong password fail the same way so callers cannot
/// tell them apart.
pub async fn authenticate(
    db: &impl ConnectionTrait,
    email: &str,
    password: &str,
) -> Result<Model, Error> {
    match find_by_email(db, email).await? {
        Some(user) => {
            verify_password(password, &user.password)?;
            Ok(user)
        }
        None => {
            debug!("Login attempt for unknown email {email}");
            Err(Error::new(EntityApiErrorKind::RecordUnauthenticated))
        }
    }
}

/// Creates the configured default user unless a user with that email exists.
/// Returns the newly created user, or `None` when nothing was inserted.
pub async fn seed_default_user(
    db: &impl ConnectionTrait,
    email: &str,
    password: &str,
    name: &str,
) -> Result<Option<Model>, Error> {
    if find_by_email(db, email).await?.is_some() {
        debug!("Default user {email} already exists");
        return Ok(None);
    }

    let user = create(db, email, password, name).await?;
    info!("Created default user {email}");
    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_password_accepts_the_hashed_password() {
        let hash = generate_hash("correct horse");
        assert!(verify_password("correct horse", &hash).is_ok());
    }

    #[test]
    fn verify_password_rejects_a_wrong_password() {
        let hash = generate_hash("correct horse");
        let result = verify_password("battery staple", &hash);
        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordUnauthenticated
        );
    }
}
