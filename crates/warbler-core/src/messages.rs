use chrono::Utc;
use entity::{message, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::error::{Error, Result};

/// Message text must be 1..=140 characters.
pub fn validate_text(text: &str) -> Result<()> {
    let len = text.chars().count();
    if len == 0 {
        return Err(Error::validation("text", "must not be empty"));
    }
    if len > message::MAX_TEXT_LEN {
        return Err(Error::validation(
            "text",
            format!("must be at most {} characters", message::MAX_TEXT_LEN),
        ));
    }
    Ok(())
}

/// Validate `text` and build an unsaved message by `author_id`, timestamped now.
pub(crate) fn new_message(author_id: i32, text: &str) -> Result<message::ActiveModel> {
    validate_text(text)?;

    Ok(message::ActiveModel {
        text: Set(text.to_string()),
        timestamp: Set(Utc::now()),
        user_id: Set(author_id),
        ..Default::default()
    })
}

/// Store a new message written by `author`, timestamped now.
pub async fn post_message(
    db: &DatabaseConnection,
    author: &user::Model,
    text: &str,
) -> Result<message::Model> {
    let saved = new_message(author.id, text)?
        .insert(db)
    .await
    .map_err(Error::from_write)?;

    log::debug!("Message {} posted by user {}", saved.id, author.id);
    Ok(saved)
}

/// Messages written by `author`, newest first.
pub async fn messages(
    db: &DatabaseConnection,
    author: &user::Model,
) -> Result<Vec<message::Model>> {
    Ok(message::Entity::find()
        .filter(message::Column::UserId.eq(author.id))
        .order_by_desc(message::Column::Timestamp)
        .order_by_desc(message::Column::Id)
        .all(db)
        .await?)
}

pub async fn message_count(db: &DatabaseConnection, author: &user::Model) -> Result<u64> {
    Ok(message::Entity::find()
        .filter(message::Column::UserId.eq(author.id))
        .count(db)
        .await?)
}
