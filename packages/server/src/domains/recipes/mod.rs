//! Recipes domain - recipes, their visibility and ownership rules

pub mod actions;
pub mod data;
pub mod models;

pub use data::{CreateRecipePayload, DeleteRecipePayload, RecipeData, UpdateRecipePayload};
pub use models::{CreateRecipe, Recipe, RecipeFilter, UpdateRecipe};
