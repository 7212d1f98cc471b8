// Business domains
pub mod auth;
pub mod categories;
pub mod ingredients;
pub mod recipes;
pub mod users;
pub mod votes;
