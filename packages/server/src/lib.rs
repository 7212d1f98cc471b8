// Recipe API - Core
//
// Backend for a recipe-management app: users own categories and recipes,
// recipes carry ingredients and collect votes. Everything is exposed through
// a single GraphQL schema.
//
// Each domain under domains/ owns its models (rows + SQL), its GraphQL data
// types and its actions. Actions are where ownership and referential checks
// happen; storage is reached only through kernel::BaseRepository.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
