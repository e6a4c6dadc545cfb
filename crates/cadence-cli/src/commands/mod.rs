pub mod add;
pub mod delete;
pub mod exclude;
pub mod generate;
pub mod list;
pub mod preview;
