pub mod add;
pub mod categories;
pub mod delete;
pub mod list;
pub mod play;
