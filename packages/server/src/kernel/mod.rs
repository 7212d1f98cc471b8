//! Kernel module - server infrastructure and dependencies.

pub mod cascade;
pub mod deps;
pub mod postgres;
pub mod test_dependencies;
pub mod traits;

pub use cascade::{CascadePlan, CascadeSummary};
pub use deps::ServerDeps;
pub use postgres::PgRepository;
pub use test_dependencies::{
    InMemoryRepository, TestDependencies, TEST_JWT_ISSUER, TEST_JWT_SECRET,
};
pub use traits::*;
