//! Recipe actions
//!
//! Visibility is deliberately uneven: a single recipe is readable by anyone
//! who knows its id, while the collection only ever lists the caller's own
//! recipes. `is_public` is stored and returned but not consulted.

use tracing::{debug, info};

use crate::common::validation::{check_max_chars, check_max_chars_opt, MAX_NAME_LEN};
use crate::common::{
    ApiError, ApiResult, Caller, CategoryId, OffsetArgs, PageWindow, RecipeId, SearchTerm,
};
use crate::domains::recipes::models::{CreateRecipe, Recipe, RecipeFilter, UpdateRecipe};
use crate::kernel::{CascadePlan, ServerDeps};

pub const INVALID_RECIPE_ID: &str = "Invalid Recipe ID!";
pub const INVALID_CATEGORY_REF: &str = "Invalid category id";

/// Arguments for creating a recipe
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub category_id: CategoryId,
    pub title: String,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

/// Fetch one recipe by id, for any caller.
///
/// NOTE: no ownership or `is_public` check happens here. A deployment that
/// keeps private recipes private must gate this on
/// `recipe.is_public || caller == recipe.owner_id`.
pub async fn get_recipe(id: RecipeId, deps: &ServerDeps) -> ApiResult<Recipe> {
    deps.repo()
        .find_recipe(id)
        .await?
        .ok_or_else(|| ApiError::not_found(INVALID_RECIPE_ID))
}

/// The caller's own recipes, optionally searched and paginated.
pub async fn list_recipes(
    search: Option<&str>,
    page: OffsetArgs,
    caller: &Caller,
    deps: &ServerDeps,
) -> ApiResult<Vec<Recipe>> {
    let owner_id = caller.require_user()?;
    let window = page.validate()?;

    let filter = RecipeFilter::owned_by(owner_id).with_search(SearchTerm::parse(search));
    let recipes = deps.repo().list_recipes(&filter, window).await?;
    Ok(recipes)
}

/// All recipes filed under a category, regardless of owner.
pub async fn list_category_recipes(
    category_id: CategoryId,
    deps: &ServerDeps,
) -> ApiResult<Vec<Recipe>> {
    let recipes = deps
        .repo()
        .list_recipes(&RecipeFilter::in_category(category_id), PageWindow::ALL)
        .await?;
    Ok(recipes)
}

/// Create a recipe owned by the caller. The category may belong to anyone.
pub async fn create_recipe(input: NewRecipe, caller: &Caller, deps: &ServerDeps) -> ApiResult<Recipe> {
    let owner_id = caller.require_user()?;
    check_max_chars("title", &input.title, MAX_NAME_LEN)?;

    if deps.repo().find_category(input.category_id).await?.is_none() {
        return Err(ApiError::not_found(INVALID_CATEGORY_REF));
    }

    let recipe = deps
        .repo()
        .create_recipe(CreateRecipe {
            owner_id,
            category_id: input.category_id,
            title: input.title,
            description: input.description.unwrap_or_default(),
            is_public: input.is_public.unwrap_or(false),
        })
        .await?;

    info!(
        recipe_id = %recipe.id,
        category_id = %recipe.category_id,
        owner_id = %owner_id,
        "Recipe created"
    );
    Ok(recipe)
}

async fn owned_recipe(
    id: RecipeId,
    caller: &Caller,
    denial: &str,
    deps: &ServerDeps,
) -> ApiResult<Recipe> {
    caller.require_user()?;
    let recipe = get_recipe(id, deps).await?;
    caller.require_owner(recipe.owner_id, denial)?;
    Ok(recipe)
}

pub async fn update_recipe(
    id: RecipeId,
    changes: UpdateRecipe,
    caller: &Caller,
    deps: &ServerDeps,
) -> ApiResult<Recipe> {
    owned_recipe(id, caller, "You are not permitted to update this recipe", deps).await?;
    check_max_chars_opt("title", changes.title.as_deref(), MAX_NAME_LEN)?;

    if changes.is_empty() {
        debug!(recipe_id = %id, "Recipe update with no fields supplied");
    }

    let recipe = deps
        .repo()
        .update_recipe(id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(INVALID_RECIPE_ID))?;

    info!(recipe_id = %id, "Recipe updated");
    Ok(recipe)
}

/// Delete a recipe with its ingredients and votes. Returns the recipe id.
pub async fn delete_recipe(id: RecipeId, caller: &Caller, deps: &ServerDeps) -> ApiResult<RecipeId> {
    owned_recipe(id, caller, "You are not permitted to delete this recipe", deps).await?;

    let plan = CascadePlan::for_recipe(deps.repo(), id).await?;
    let summary = deps.repo().apply_cascade(&plan).await?;

    info!(
        recipe_id = %id,
        ingredients = summary.ingredients,
        votes = summary.votes,
        "Recipe deleted"
    );
    Ok(id)
}

/// Number of votes cast for a recipe.
pub async fn vote_count(recipe_id: RecipeId, deps: &ServerDeps) -> ApiResult<i32> {
    let count = deps.repo().count_votes(recipe_id).await?;
    Ok(i32::try_from(count).unwrap_or(i32::MAX))
}
