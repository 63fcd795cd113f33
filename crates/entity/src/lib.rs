pub mod follows;
pub mod message;
pub mod user;

pub use follows::Entity as Follows;
pub use message::Entity as Message;
pub use user::Entity as User;
