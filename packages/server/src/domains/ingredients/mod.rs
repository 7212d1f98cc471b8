//! Ingredients domain - measured line items attached to a recipe

pub mod actions;
pub mod data;
pub mod models;

pub use data::{CreateIngredientPayload, IngredientData};
pub use models::{CreateIngredient, Ingredient};
