use entity::user;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::error::{Error, Result};
use crate::models::{ProfileUpdate, SignupForm};
use crate::password;

/// Picture assigned to users who sign up without one.
pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";

/// Validate a signup and stage a new user with a hashed password.
///
/// The returned active model has not been inserted; add it to a
/// [`crate::session::Session`] and commit. A missing or empty password is
/// rejected here. Username and email are passed through as given, so
/// missing or duplicate values are reported by the database on commit.
pub fn signup(form: &SignupForm, hash_cost: u32) -> Result<user::ActiveModel> {
    let plaintext = match form.password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(Error::validation("password", "must be a non-empty string")),
    };

    let password_hash = password::hash_password(plaintext, hash_cost).map_err(Error::hashing)?;

    let image_url = form
        .image_url
        .clone()
        .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

    let mut staged = user::ActiveModel {
        password: Set(password_hash),
        image_url: Set(Some(image_url)),
        ..Default::default()
    };
    if let Some(username) = &form.username {
        staged.username = Set(username.clone());
    }
    if let Some(email) = &form.email {
        staged.email = Set(email.clone());
    }

    log::info!(
        "Signup staged for user: {}",
        form.username.as_deref().unwrap_or("<missing>")
    );

    Ok(staged)
}

/// Look up `username` and check `password` against the stored hash.
///
/// Unknown usernames and wrong passwords both yield `Ok(None)`.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<Option<user::Model>> {
    let user = match user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?
    {
        Some(u) => u,
        None => {
            log::warn!("Authentication failed, unknown user: {}", username);
            return Ok(None);
        }
    };

    match password::verify_password(password, &user.password) {
        Ok(true) => {
            log::info!("User authenticated: {} (ID: {})", user.username, user.id);
            Ok(Some(user))
        }
        Ok(false) => {
            log::warn!("Authentication failed, wrong password for: {}", username);
            Ok(None)
        }
        Err(e) => {
            log::warn!("Stored password for {} is not a bcrypt hash: {}", username, e);
            Ok(None)
        }
    }
}

/// Apply `update` to `user` after re-checking their password.
///
/// Returns `Ok(None)` when the password does not match.
pub async fn update_profile(
    db: &DatabaseConnection,
    user: &user::Model,
    update: ProfileUpdate,
    password: &str,
) -> Result<Option<user::Model>> {
    if is_blank(update.username.as_deref()) {
        return Err(Error::validation("username", "must not be blank"));
    }
    if is_blank(update.email.as_deref()) {
        return Err(Error::validation("email", "must not be blank"));
    }

    let current = match authenticate(db, &user.username, password).await? {
        Some(u) if u.id == user.id => u,
        _ => return Ok(None),
    };

    if update.is_empty() {
        return Ok(Some(current));
    }

    let mut active: user::ActiveModel = current.into();
    if let Some(username) = update.username {
        active.username = Set(username);
    }
    if let Some(email) = update.email {
        active.email = Set(email);
    }
    if let Some(image_url) = update.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(header_image_url) = update.header_image_url {
        active.header_image_url = Set(Some(header_image_url));
    }
    if let Some(bio) = update.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(location) = update.location {
        active.location = Set(Some(location));
    }

    let updated = active.update(db).await.map_err(Error::from_write)?;
    log::info!("Profile updated for user ID: {}", updated.id);

    Ok(Some(updated))
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().is_empty())
}

/// Replace the password of `user`. Returns `Ok(false)` if `current` is wrong.
pub async fn change_password(
    db: &DatabaseConnection,
    user: &user::Model,
    current: &str,
    new: &str,
    hash_cost: u32,
) -> Result<bool> {
    if new.is_empty() {
        return Err(Error::validation("password", "must be a non-empty string"));
    }

    let stored = match user::Entity::find_by_id(user.id).one(db).await? {
        Some(u) => u,
        None => return Ok(false),
    };

    // A malformed stored hash counts as a mismatch.
    if !password::verify_password(current, &stored.password).unwrap_or(false) {
        log::warn!("Password change rejected for user ID: {}", user.id);
        return Ok(false);
    }

    let password_hash = password::hash_password(new, hash_cost).map_err(Error::hashing)?;

    user::ActiveModel {
        id: Set(stored.id),
        password: Set(password_hash),
        ..Default::default()
    }
    .update(db)
    .await?;

    log::info!("Password changed for user ID: {}", user.id);
    Ok(true)
}

/// Delete a user. Their follow edges and messages go with them.
pub async fn delete_account(db: &DatabaseConnection, user_id: i32) -> Result<bool> {
    let result = user::Entity::delete_by_id(user_id).exec(db).await?;

    if result.rows_affected > 0 {
        log::info!("User deleted (ID: {})", user_id);
    }

    Ok(result.rows_affected > 0)
}
