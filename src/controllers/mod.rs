pub mod audio;
pub mod health;
pub mod news;
pub mod podcast;
