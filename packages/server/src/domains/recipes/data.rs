use chrono::{DateTime, Utc};
use juniper::ID;

use crate::common::{ApiResult, CategoryId, RecipeId, UserId};
use crate::domains::categories::actions as category_actions;
use crate::domains::categories::data::CategoryData;
use crate::domains::ingredients::actions as ingredient_actions;
use crate::domains::ingredients::data::IngredientData;
use crate::domains::recipes::actions;
use crate::domains::recipes::models::Recipe;
use crate::domains::users::actions as user_actions;
use crate::domains::users::data::UserData;
use crate::server::graphql::context::GraphQLContext;

/// GraphQL-facing recipe
#[derive(Debug, Clone)]
pub struct RecipeData {
    pub id: RecipeId,
    pub title: String,
    pub description: String,
    pub is_public: bool,
    pub owner_id: UserId,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeData {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            is_public: recipe.is_public,
            owner_id: recipe.owner_id,
            category_id: recipe.category_id,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

#[juniper::graphql_object(name = "Recipe", Context = GraphQLContext)]
impl RecipeData {
    fn id(&self) -> ID {
        ID::new(self.id.to_string())
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn is_public(&self) -> bool {
        self.is_public
    }

    async fn owner(&self, ctx: &GraphQLContext) -> ApiResult<UserData> {
        let user = user_actions::get_user(self.owner_id, ctx.deps()).await?;
        Ok(user.into())
    }

    async fn category(&self, ctx: &GraphQLContext) -> ApiResult<CategoryData> {
        let category = category_actions::get_category(Some(self.category_id), None, ctx.deps()).await?;
        Ok(category.into())
    }

    async fn ingredients(&self, ctx: &GraphQLContext) -> ApiResult<Vec<IngredientData>> {
        let ingredients = ingredient_actions::list_recipe_ingredients(self.id, ctx.deps()).await?;
        Ok(ingredients.into_iter().map(IngredientData::from).collect())
    }

    async fn vote_count(&self, ctx: &GraphQLContext) -> ApiResult<i32> {
        actions::vote_count(self.id, ctx.deps()).await
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(Debug, Clone, juniper::GraphQLObject)]
#[graphql(context = GraphQLContext)]
pub struct CreateRecipePayload {
    pub recipe: RecipeData,
}

#[derive(Debug, Clone, juniper::GraphQLObject)]
#[graphql(context = GraphQLContext)]
pub struct UpdateRecipePayload {
    pub recipe: RecipeData,
}

#[derive(Debug, Clone, juniper::GraphQLObject)]
#[graphql(context = GraphQLContext)]
pub struct DeleteRecipePayload {
    pub recipe_id: ID,
}
