//! Unit of work: stage new rows, then write them all in one transaction.
use entity::{follows, message, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};

use crate::error::{Error, Result};
use crate::messages;

enum Staged {
    User(user::ActiveModel),
    Follow(follows::ActiveModel),
    Message(message::ActiveModel),
}

/// Records staged for insertion against one connection.
///
/// Nothing touches the database until [`Session::commit`]. Constraint
/// violations (duplicate username/email, missing required columns, duplicate
/// follow edges) therefore surface on commit, not when a record is staged.
pub struct Session<'a> {
    db: &'a DatabaseConnection,
    staged: Vec<Staged>,
}

impl<'a> Session<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            staged: Vec::new(),
        }
    }

    pub fn add_user(&mut self, user: user::ActiveModel) {
        self.staged.push(Staged::User(user));
    }

    pub fn add_follow(&mut self, follower_id: i32, followed_id: i32) {
        self.staged.push(Staged::Follow(follows::ActiveModel {
            follower_id: Set(follower_id),
            followed_id: Set(followed_id),
        }));
    }

    /// Stage a message by `author_id`. Text outside 1..=140 characters is
    /// rejected here and nothing is staged.
    pub fn add_message(&mut self, author_id: i32, text: &str) -> Result<()> {
        let message = messages::new_message(author_id, text)?;
        self.staged.push(Staged::Message(message));
        Ok(())
    }

    /// Number of records waiting for commit.
    pub fn pending(&self) -> usize {
        self.staged.len()
    }

    /// Drop everything staged so far.
    pub fn rollback(&mut self) {
        if !self.staged.is_empty() {
            log::debug!("Discarding {} staged records", self.staged.len());
        }
        self.staged.clear();
    }

    /// Insert all staged records, in staging order, inside one transaction.
    ///
    /// Returns the inserted users in the order they were staged. On failure the
    /// transaction is rolled back and the staged records are discarded.
    pub async fn commit(&mut self) -> Result<Vec<user::Model>> {
        let staged = std::mem::take(&mut self.staged);
        if staged.is_empty() {
            return Ok(Vec::new());
        }

        let count = staged.len();
        let txn = self.db.begin().await?;
        let mut users = Vec::new();

        for record in staged {
            let outcome = match record {
                Staged::User(am) => am.insert(&txn).await.map(|u| users.push(u)),
                Staged::Follow(am) => follows::Entity::insert(am)
                    .exec_without_returning(&txn)
                    .await
                    .map(|_| ()),
                Staged::Message(am) => am.insert(&txn).await.map(|_| ()),
            };

            if let Err(e) = outcome {
                let _ = txn.rollback().await;
                log::warn!("Commit failed, transaction rolled back: {}", e);
                return Err(Error::from_write(e));
            }
        }

        txn.commit().await?;
        log::debug!("Committed {} staged records", count);

        Ok(users)
    }
}
