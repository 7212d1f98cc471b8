use tracing::info;

use crate::common::{ApiError, ApiResult, Caller, RecipeId};
use crate::domains::recipes::actions::INVALID_RECIPE_ID;
use crate::domains::recipes::models::Recipe;
use crate::domains::users::models::User;
use crate::domains::votes::models::RecipeVote;
use crate::kernel::ServerDeps;

/// Result of casting a vote: the stored vote plus the pair it links.
#[derive(Debug, Clone)]
pub struct CastVote {
    pub vote: RecipeVote,
    pub user: User,
    pub recipe: Recipe,
}

/// Record a vote by the caller for a recipe.
///
/// Repeat votes and votes on one's own recipe are both accepted.
pub async fn create_recipe_vote(
    recipe_id: RecipeId,
    caller: &Caller,
    deps: &ServerDeps,
) -> ApiResult<CastVote> {
    let user_id = caller.require_user()?;

    let recipe = deps
        .repo()
        .find_recipe(recipe_id)
        .await?
        .ok_or_else(|| ApiError::not_found(INVALID_RECIPE_ID))?;

    let user = deps
        .repo()
        .find_user(user_id)
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    let vote = deps.repo().create_vote(user_id, recipe_id).await?;

    info!(vote_id = %vote.id, recipe_id = %recipe_id, user_id = %user_id, "Recipe vote created");
    Ok(CastVote { vote, user, recipe })
}
