pub use entity::{notebooks, pages, priority, task_status, tasks, users, Id};
pub use mutate::{IntoUpdateMap, UpdateMap};

pub mod error;
pub mod mutate;
pub mod notebook;
pub mod page;
pub mod task;
pub mod user;
