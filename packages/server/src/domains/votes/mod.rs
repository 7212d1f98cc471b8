//! Votes domain - users endorsing recipes

pub mod actions;
pub mod data;
pub mod models;

pub use data::{CreateRecipeVotePayload, RecipeVoteData};
pub use models::RecipeVote;
