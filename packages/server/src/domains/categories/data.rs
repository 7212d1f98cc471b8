use chrono::{DateTime, Utc};
use juniper::ID;

use crate::common::{ApiResult, CategoryId, UserId};
use crate::domains::categories::models::Category;
use crate::domains::recipes::actions as recipe_actions;
use crate::domains::recipes::data::RecipeData;
use crate::domains::users::actions as user_actions;
use crate::domains::users::data::UserData;
use crate::server::graphql::context::GraphQLContext;

/// GraphQL-facing category
#[derive(Debug, Clone)]
pub struct CategoryData {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryData {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            owner_id: category.owner_id,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[juniper::graphql_object(name = "Category", Context = GraphQLContext)]
impl CategoryData {
    fn id(&self) -> ID {
        ID::new(self.id.to_string())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn owner(&self, ctx: &GraphQLContext) -> ApiResult<UserData> {
        let user = user_actions::get_user(self.owner_id, ctx.deps()).await?;
        Ok(user.into())
    }

    /// Every recipe filed under this category, whoever owns it.
    async fn recipes(&self, ctx: &GraphQLContext) -> ApiResult<Vec<RecipeData>> {
        let recipes = recipe_actions::list_category_recipes(self.id, ctx.deps()).await?;
        Ok(recipes.into_iter().map(RecipeData::from).collect())
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
pub struct CreateCategoryPayload {
    pub category: CategoryData,
}

#[derive(Debug, Clone, juniper::GraphQLObject)]
#[graphql(context = GraphQLContext)]
pub struct UpdateCategoryPayload {
    pub category: CategoryData,
}

#[derive(Debug, Clone, juniper::GraphQLObject)]
#[graphql(context = GraphQLContext)]
pub struct DeleteCategoryPayload {
    pub cat_id: ID,
}
