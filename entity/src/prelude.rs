pub use super::notebooks::Entity as Notebooks;
pub use super::pages::Entity as Pages;
pub use super::tasks::Entity as Tasks;
pub use super::users::Entity as Users;
