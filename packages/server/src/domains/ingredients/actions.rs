use tracing::info;

use crate::common::validation::{check_max_chars, MAX_NAME_LEN};
use crate::common::{ApiError, ApiResult, Caller, RecipeId};
use crate::domains::ingredients::models::{CreateIngredient, Ingredient};
use crate::kernel::ServerDeps;

pub const INVALID_RECIPE_REF: &str = "Invalid recipe ID!";

/// Arguments for adding an ingredient
#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub recipe_id: RecipeId,
    pub name: String,
    pub amount: f64,
    pub instruction_notes: Option<String>,
}

/// Add an ingredient to an existing recipe.
///
/// Any signed-in caller may do this; ownership of the recipe is not checked.
pub async fn create_ingredient(
    input: NewIngredient,
    caller: &Caller,
    deps: &ServerDeps,
) -> ApiResult<Ingredient> {
    let user_id = caller.require_user()?;
    check_max_chars("name", &input.name, MAX_NAME_LEN)?;
    if !input.amount.is_finite() || input.amount < 0.0 {
        return Err(ApiError::validation("amount must be a non-negative number"));
    }

    if deps.repo().find_recipe(input.recipe_id).await?.is_none() {
        return Err(ApiError::not_found(INVALID_RECIPE_REF));
    }

    let ingredient = deps
        .repo()
        .create_ingredient(CreateIngredient {
            recipe_id: input.recipe_id,
            name: input.name,
            amount: input.amount,
            instruction_notes: input.instruction_notes.unwrap_or_default(),
        })
        .await?;

    info!(
        ingredient_id = %ingredient.id,
        recipe_id = %ingredient.recipe_id,
        user_id = %user_id,
        "Ingredient created"
    );
    Ok(ingredient)
}

pub async fn list_recipe_ingredients(
    recipe_id: RecipeId,
    deps: &ServerDeps,
) -> ApiResult<Vec<Ingredient>> {
    Ok(deps.repo().list_ingredients(recipe_id).await?)
}
