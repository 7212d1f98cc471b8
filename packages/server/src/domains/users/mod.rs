//! Users domain - registration and the current caller's profile

pub mod actions;
pub mod data;
pub mod models;

pub use data::{CreateUserInput, CreateUserPayload, UserData};
pub use models::{CreateUser, Gender, User};
