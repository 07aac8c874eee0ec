pub use super::logins::Entity as Logins;
pub use super::users::Entity as Users;
