use juniper::ID;

use crate::common::{ApiResult, IngredientId, RecipeId};
use crate::domains::ingredients::models::Ingredient;
use crate::domains::recipes::actions as recipe_actions;
use crate::domains::recipes::data::RecipeData;
use crate::server::graphql::context::GraphQLContext;

#[derive(Debug, Clone)]
pub struct IngredientData {
    pub id: IngredientId,
    pub name: String,
    pub amount: f64,
    pub instruction_notes: String,
    pub recipe_id: RecipeId,
}

impl From<Ingredient> for IngredientData {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            amount: ingredient.amount,
            instruction_notes: ingredient.instruction_notes,
            recipe_id: ingredient.recipe_id,
        }
    }
}

#[juniper::graphql_object(name = "Ingredient", Context = GraphQLContext)]
impl IngredientData {
    fn id(&self) -> ID {
        ID::new(self.id.to_string())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn instruction_notes(&self) -> &str {
        &self.instruction_notes
    }

    async fn recipe(&self, ctx: &GraphQLContext) -> ApiResult<RecipeData> {
        let recipe = recipe_actions::get_recipe(self.recipe_id, ctx.deps()).await?;
        Ok(recipe.into())
    }
}

#[derive(Debug, Clone, juniper::GraphQLObject)]
#[graphql(context = GraphQLContext)]
pub struct CreateIngredientPayload {
    pub ingredient: IngredientData,
}
