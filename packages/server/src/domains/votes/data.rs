use juniper::ID;

use crate::common::{ApiResult, RecipeId, RecipeVoteId, UserId};
use crate::domains::recipes::actions as recipe_actions;
use crate::domains::recipes::data::RecipeData;
use crate::domains::users::actions as user_actions;
use crate::domains::users::data::UserData;
use crate::domains::votes::models::RecipeVote;
use crate::server::graphql::context::GraphQLContext;

#[derive(Debug, Clone)]
pub struct RecipeVoteData {
    pub id: RecipeVoteId,
    pub user_id: UserId,
    pub recipe_id: RecipeId,
}

impl From<RecipeVote> for RecipeVoteData {
    fn from(vote: RecipeVote) -> Self {
        Self {
            id: vote.id,
            user_id: vote.user_id,
            recipe_id: vote.recipe_id,
        }
    }
}

#[juniper::graphql_object(name = "RecipeVote", Context = GraphQLContext)]
impl RecipeVoteData {
    fn id(&self) -> ID {
        ID::new(self.id.to_string())
    }

    async fn user(&self, ctx: &GraphQLContext) -> ApiResult<UserData> {
        let user = user_actions::get_user(self.user_id, ctx.deps()).await?;
        Ok(user.into())
    }

    async fn recipe(&self, ctx: &GraphQLContext) -> ApiResult<RecipeData> {
        let recipe = recipe_actions::get_recipe(self.recipe_id, ctx.deps()).await?;
        Ok(recipe.into())
    }
}

#[derive(Debug, Clone, juniper::GraphQLObject)]
#[graphql(context = GraphQLContext)]
pub struct CreateRecipeVotePayload {
    pub user: UserData,
    pub recipe: RecipeData,
    pub vote: RecipeVoteData,
}
