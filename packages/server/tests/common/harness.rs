//! Test harnesses for integration testing.
//!
//! `TestApp` runs the full schema against the in-memory repository and needs
//! nothing external. `TestHarness` wires the same schema to a real Postgres
//! started with testcontainers; the container and migrations are shared by
//! every test in the binary.

use anyhow::{Context, Result};
use recipe_core::common::UserId;
use recipe_core::domains::auth::{JwtService, PasswordHasher};
use recipe_core::kernel::{
    InMemoryRepository, PgRepository, ServerDeps, TestDependencies, TEST_JWT_ISSUER,
    TEST_JWT_SECRET,
};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use super::GraphQLClient;

/// Route test logs through the test writer. Run with
/// `RUST_LOG=debug cargo test -- --nocapture` to see them.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// In-memory application
// =============================================================================

/// Schema plus in-memory store, one per test.
pub struct TestApp {
    pub deps: Arc<ServerDeps>,
    /// Direct handle on the store for row-count assertions.
    pub repository: Arc<InMemoryRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::from_test_dependencies(TestDependencies::new())
    }

    pub fn from_test_dependencies(test_deps: TestDependencies) -> Self {
        init_test_tracing();
        let repository = test_deps.repository.clone();
        Self {
            deps: Arc::new(test_deps.into_server_deps()),
            repository,
        }
    }

    /// Client without a token.
    pub fn anonymous(&self) -> GraphQLClient {
        GraphQLClient::new(self.deps.clone())
    }

    /// Client carrying the given user's identity.
    pub fn client_for(&self, user_id: UserId) -> GraphQLClient {
        GraphQLClient::with_auth_user(self.deps.clone(), user_id)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Postgres harness
// =============================================================================

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        init_test_tracing();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Postgres-backed harness.
///
/// Tests share one database, so they must not assume it starts empty; use
/// unique names (see [`unique_name`](super::unique_name)).
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let client = ctx.graphql();
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let deps = Arc::new(ServerDeps::new(
            Arc::new(PgRepository::new(db_pool.clone())),
            Arc::new(JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string())),
            Arc::new(PasswordHasher::for_tests()),
        ));

        Ok(Self { db_pool, deps })
    }

    pub fn graphql(&self) -> GraphQLClient {
        GraphQLClient::new(self.deps.clone())
    }

    pub fn graphql_as(&self, user_id: UserId) -> GraphQLClient {
        GraphQLClient::with_auth_user(self.deps.clone(), user_id)
    }
}
