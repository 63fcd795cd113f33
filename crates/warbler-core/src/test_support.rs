use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::account;
use crate::models::SignupForm;
use crate::session::Session;

pub const TEST_COST: u32 = crate::password::MIN_COST;

/// Fresh in-memory SQLite database with the schema applied.
pub async fn setup_db() -> DatabaseConnection {
    let _ = env_logger::builder().is_test(true).try_init();

    // Every pooled connection to `sqlite::memory:` is its own database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

/// testuser1 (#1111, password1) and testuser2 (#2222, password2).
pub async fn seed_users(db: &DatabaseConnection) -> (entity::user::Model, entity::user::Model) {
    let mut session = Session::new(db);

    let mut user1 = account::signup(
        &SignupForm::new("testuser1", "test1@test.com", "password1"),
        TEST_COST,
    )
    .unwrap();
    user1.id = sea_orm::Set(1111);

    let mut user2 = account::signup(
        &SignupForm::new("testuser2", "test2@test.com", "password2"),
        TEST_COST,
    )
    .unwrap();
    user2.id = sea_orm::Set(2222);

    session.add_user(user1);
    session.add_user(user2);

    let mut users = session.commit().await.unwrap().into_iter();
    (users.next().unwrap(), users.next().unwrap())
}
