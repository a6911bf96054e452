pub use super::games::Entity as Games;
pub use super::rankings::Entity as Rankings;
pub use super::series::Entity as Series;
pub use super::users::Entity as Users;
