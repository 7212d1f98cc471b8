// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Ownership checks, validation and cascade planning live in the domain
// actions that call these traits.
//
// Naming convention: Base* for trait names (e.g., BaseRepository)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{CategoryId, PageWindow, RecipeId, SearchTerm, UserId};
use crate::domains::categories::models::{Category, CreateCategory, UpdateCategory};
use crate::domains::ingredients::models::{CreateIngredient, Ingredient};
use crate::domains::recipes::models::{CreateRecipe, Recipe, RecipeFilter, UpdateRecipe};
use crate::domains::users::models::{CreateUser, User};
use crate::domains::votes::models::RecipeVote;

use super::cascade::{CascadePlan, CascadeSummary};

// =============================================================================
// Entity Repository (Infrastructure - persistence seam)
// =============================================================================

/// Persistence for every entity the API exposes.
///
/// Collections come back in store order (creation time, then id). Lookups
/// that miss return `Ok(None)`; `Err` is reserved for store failures.
#[async_trait]
pub trait BaseRepository: Send + Sync {
    // Users

    async fn find_user(&self, id: UserId) -> Result<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Fails with [`DuplicateUser`](crate::domains::users::models::DuplicateUser)
    /// when the username or email is taken.
    async fn create_user(&self, input: CreateUser) -> Result<User>;

    // Categories

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>>;

    /// First match in store order when names collide.
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>>;

    async fn list_categories(
        &self,
        search: Option<&SearchTerm>,
        window: PageWindow,
    ) -> Result<Vec<Category>>;

    async fn create_category(&self, input: CreateCategory) -> Result<Category>;

    /// Returns `None` when the category no longer exists.
    async fn update_category(
        &self,
        id: CategoryId,
        input: UpdateCategory,
    ) -> Result<Option<Category>>;

    // Recipes

    async fn find_recipe(&self, id: RecipeId) -> Result<Option<Recipe>>;

    async fn list_recipes(&self, filter: &RecipeFilter, window: PageWindow) -> Result<Vec<Recipe>>;

    async fn create_recipe(&self, input: CreateRecipe) -> Result<Recipe>;

    async fn update_recipe(&self, id: RecipeId, input: UpdateRecipe) -> Result<Option<Recipe>>;

    // Ingredients

    async fn list_ingredients(&self, recipe_id: RecipeId) -> Result<Vec<Ingredient>>;

    async fn create_ingredient(&self, input: CreateIngredient) -> Result<Ingredient>;

    // Votes

    async fn list_votes(&self, recipe_id: RecipeId) -> Result<Vec<RecipeVote>>;

    async fn count_votes(&self, recipe_id: RecipeId) -> Result<i64>;

    async fn create_vote(&self, user_id: UserId, recipe_id: RecipeId) -> Result<RecipeVote>;

    // Deletion

    /// Removes every entity named by the plan as one atomic unit, together
    /// with any child attached to a planned parent after planning.
    async fn apply_cascade(&self, plan: &CascadePlan) -> Result<CascadeSummary>;

    // Health

    /// Cheap round trip to the store.
    async fn ping(&self) -> Result<()>;
}
