pub mod entries;
pub mod health;
pub mod labels;
pub mod summary;
