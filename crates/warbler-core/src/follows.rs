//! The directed "follows" graph between users.
//!
//! Edges live in the `follows` table; the `following` and `followers` views
//! are always computed from it.
use entity::{follows, user};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::error::{Error, Result};

/// Record that `follower` follows `followed`.
///
/// Following twice, or following a user that does not exist, is an integrity
/// error. Self-follow is allowed.
pub async fn follow(
    db: &DatabaseConnection,
    follower: &user::Model,
    followed: &user::Model,
) -> Result<()> {
    insert_edge(db, follower.id, followed.id).await
}

/// Record that `follower` follows `user`.
pub async fn add_follower(
    db: &DatabaseConnection,
    user: &user::Model,
    follower: &user::Model,
) -> Result<()> {
    insert_edge(db, follower.id, user.id).await
}

async fn insert_edge(db: &DatabaseConnection, follower_id: i32, followed_id: i32) -> Result<()> {
    let edge = follows::ActiveModel {
        follower_id: Set(follower_id),
        followed_id: Set(followed_id),
    };

    follows::Entity::insert(edge)
        .exec_without_returning(db)
        .await
        .map_err(Error::from_write)?;

    log::info!("User {} now follows user {}", follower_id, followed_id);
    Ok(())
}

/// Remove the edge `follower` -> `followed`. Returns whether it existed.
pub async fn unfollow(
    db: &DatabaseConnection,
    follower: &user::Model,
    followed: &user::Model,
) -> Result<bool> {
    let result = follows::Entity::delete_by_id((follower.id, followed.id))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        log::info!("User {} stopped following user {}", follower.id, followed.id);
    }

    Ok(result.rows_affected > 0)
}

/// Is `user` following `other`?
pub async fn is_following(
    db: &DatabaseConnection,
    user: &user::Model,
    other: &user::Model,
) -> Result<bool> {
    edge_exists(db, user.id, other.id).await
}

/// Is `user` followed by `other`?
pub async fn is_followed_by(
    db: &DatabaseConnection,
    user: &user::Model,
    other: &user::Model,
) -> Result<bool> {
    edge_exists(db, other.id, user.id).await
}

async fn edge_exists(db: &DatabaseConnection, follower_id: i32, followed_id: i32) -> Result<bool> {
    Ok(follows::Entity::find_by_id((follower_id, followed_id))
        .one(db)
        .await?
        .is_some())
}

/// Users that `user` follows, ordered by id.
pub async fn following(db: &DatabaseConnection, user: &user::Model) -> Result<Vec<user::Model>> {
    Ok(user::Entity::find()
        .join(JoinType::InnerJoin, follows::Relation::Followed.def().rev())
        .filter(follows::Column::FollowerId.eq(user.id))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?)
}

/// Users following `user`, ordered by id.
pub async fn followers(db: &DatabaseConnection, user: &user::Model) -> Result<Vec<user::Model>> {
    Ok(user::Entity::find()
        .join(JoinType::InnerJoin, follows::Relation::Follower.def().rev())
        .filter(follows::Column::FollowedId.eq(user.id))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?)
}

pub async fn following_count(db: &DatabaseConnection, user: &user::Model) -> Result<u64> {
    Ok(follows::Entity::find()
        .filter(follows::Column::FollowerId.eq(user.id))
        .count(db)
        .await?)
}

pub async fn followers_count(db: &DatabaseConnection, user: &user::Model) -> Result<u64> {
    Ok(follows::Entity::find()
        .filter(follows::Column::FollowedId.eq(user.id))
        .count(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_users, setup_db};

    #[tokio::test]
    async fn test_is_following() {
        let db = setup_db().await;
        let (user1, user2) = seed_users(&db).await;

        follow(&db, &user1, &user2).await.unwrap();

        let user1_following = following(&db, &user1).await.unwrap();
        assert_eq!(user1_following.len(), 1);
        assert_eq!(followers(&db, &user1).await.unwrap().len(), 0);
        assert_eq!(user1_following[0].id, user2.id);

        assert!(is_following(&db, &user1, &user2).await.unwrap());
        assert!(!is_following(&db, &user2, &user1).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_followed_by() {
        let db = setup_db().await;
        let (user1, user2) = seed_users(&db).await;

        add_follower(&db, &user1, &user2).await.unwrap();

        assert_eq!(following(&db, &user2).await.unwrap().len(), 1);
        assert_eq!(followers(&db, &user2).await.unwrap().len(), 0);
        assert_eq!(followers(&db, &user1).await.unwrap()[0].id, user2.id);

        assert!(is_followed_by(&db, &user1, &user2).await.unwrap());
        assert!(!is_followed_by(&db, &user2, &user1).await.unwrap());
    }

    #[tokio::test]
    async fn test_counts() {
        let db = setup_db().await;
        let (user1, user2) = seed_users(&db).await;

        follow(&db, &user1, &user2).await.unwrap();
        follow(&db, &user2, &user1).await.unwrap();

        assert_eq!(following_count(&db, &user1).await.unwrap(), 1);
        assert_eq!(followers_count(&db, &user1).await.unwrap(), 1);
        assert_eq!(following_count(&db, &user2).await.unwrap(), 1);
        assert_eq!(followers_count(&db, &user2).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_follow_is_integrity_error() {
        let db = setup_db().await;
        let (user1, user2) = seed_users(&db).await;

        follow(&db, &user1, &user2).await.unwrap();
        let err = follow(&db, &user1, &user2).await.unwrap_err();
        assert!(err.is_integrity(), "unexpected error: {err}");
        assert_eq!(following_count(&db, &user1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_self_follow_is_allowed() {
        let db = setup_db().await;
        let (user1, _) = seed_users(&db).await;

        follow(&db, &user1, &user1).await.unwrap();
        assert!(is_following(&db, &user1, &user1).await.unwrap());
        assert!(is_followed_by(&db, &user1, &user1).await.unwrap());
    }

    #[tokio::test]
    async fn test_unfollow() {
        let db = setup_db().await;
        let (user1, user2) = seed_users(&db).await;

        follow(&db, &user1, &user2).await.unwrap();
        assert!(unfollow(&db, &user1, &user2).await.unwrap());
        assert!(!unfollow(&db, &user1, &user2).await.unwrap());

        assert!(!is_following(&db, &user1, &user2).await.unwrap());
        assert!(following(&db, &user1).await.unwrap().is_empty());
    }
}
