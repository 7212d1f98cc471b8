//! Categories domain - user-owned groupings of recipes

pub mod actions;
pub mod data;
pub mod models;

pub use data::{CategoryData, CreateCategoryPayload, DeleteCategoryPayload, UpdateCategoryPayload};
pub use models::{Category, CreateCategory, UpdateCategory};
