pub mod news;
pub mod podcast;
