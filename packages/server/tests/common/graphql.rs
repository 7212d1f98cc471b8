//! GraphQL client for integration testing.
//!
//! Executes GraphQL queries directly against the schema without HTTP overhead.

use juniper::Variables;
use recipe_core::common::{Caller, UserId};
use recipe_core::kernel::ServerDeps;
use recipe_core::server::graphql::{create_schema, GraphQLContext, Schema};
use serde_json::Value;
use std::sync::Arc;

/// GraphQL client for executing queries and mutations in tests.
pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

/// A field error as the client sees it.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    pub message: String,
    /// `extensions.code`, when present.
    pub code: Option<String>,
}

/// Result of a GraphQL execution.
#[derive(Debug)]
pub struct GraphQLResult {
    pub data: Option<Value>,
    pub errors: Vec<GraphQLError>,
}

impl GraphQLResult {
    /// Returns true if the execution had no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Unwraps the data, panicking if there were errors.
    pub fn unwrap(self) -> Value {
        if !self.errors.is_empty() {
            panic!("GraphQL errors: {:?}", self.errors);
        }
        self.data.expect("No data returned")
    }

    /// Gets a value at the given JSON path.
    ///
    /// # Example
    /// ```ignore
    /// let title = result.get("recipe.title");
    /// ```
    pub fn get(&self, path: &str) -> Value {
        let data = self.data.as_ref().expect("No data returned");
        let mut current = data;
        for key in path.split('.') {
            current = &current[key];
        }
        current.clone()
    }

    /// Code of the first error, panicking if the call succeeded.
    pub fn error_code(&self) -> &str {
        let error = self.errors.first().expect("Expected a GraphQL error");
        error.code.as_deref().expect("Error has no extensions.code")
    }

    pub fn error_message(&self) -> &str {
        &self.errors.first().expect("Expected a GraphQL error").message
    }
}

impl GraphQLClient {
    /// Creates a client that calls as an anonymous visitor.
    pub fn new(deps: Arc<ServerDeps>) -> Self {
        Self::with_context(GraphQLContext::anonymous(deps))
    }

    /// Creates a client authenticated as the given user.
    pub fn with_auth_user(deps: Arc<ServerDeps>, user_id: UserId) -> Self {
        Self::with_context(GraphQLContext::new(deps, Caller::user(user_id)))
    }

    /// Creates a new GraphQL client with a custom context (for auth testing).
    pub fn with_context(context: GraphQLContext) -> Self {
        Self {
            schema: create_schema(),
            context,
        }
    }

    /// Execute a GraphQL query/mutation.
    pub async fn execute(&self, query: &str) -> GraphQLResult {
        self.execute_with_vars(query, Variables::new()).await
    }

    /// Execute a GraphQL query/mutation with variables.
    pub async fn execute_with_vars(&self, query: &str, variables: Variables) -> GraphQLResult {
        let (result, errors) =
            juniper::execute(query, None, &self.schema, &variables, &self.context)
                .await
                .expect("GraphQL execution failed");

        // Convert juniper::Value to serde_json::Value
        let data = Some(serde_json::to_value(&result).expect("Failed to serialize GraphQL result"));

        let errors = errors
            .iter()
            .map(|e| GraphQLError {
                message: e.error().message().to_string(),
                code: e
                    .error()
                    .extensions()
                    .as_object_value()
                    .and_then(|o| o.get_field_value("code"))
                    .and_then(|v| v.as_string_value())
                    .map(str::to_string),
            })
            .collect();

        GraphQLResult { data, errors }
    }

    /// Execute a query and expect success, returning the data.
    pub async fn query(&self, query: &str) -> Value {
        self.execute(query).await.unwrap()
    }

    /// Execute a query with variables and expect success.
    pub async fn query_with_vars(&self, query: &str, variables: Variables) -> Value {
        self.execute_with_vars(query, variables).await.unwrap()
    }
}
