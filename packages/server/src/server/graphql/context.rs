use std::sync::Arc;

use crate::common::Caller;
use crate::kernel::ServerDeps;

/// GraphQL request context
///
/// Carries the shared dependencies and the caller resolved from the
/// request's token. Resolvers pass `caller` explicitly into every action.
#[derive(Clone)]
pub struct GraphQLContext {
    pub deps: Arc<ServerDeps>,
    pub caller: Caller,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(deps: Arc<ServerDeps>, caller: Caller) -> Self {
        Self { deps, caller }
    }

    pub fn anonymous(deps: Arc<ServerDeps>) -> Self {
        Self::new(deps, Caller::Anonymous)
    }

    pub fn deps(&self) -> &ServerDeps {
        &self.deps
    }
}
