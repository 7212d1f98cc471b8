// TestDependencies - in-memory implementations for testing
//
// `InMemoryRepository` mirrors the Postgres store's observable behavior
// (store order, unique users, atomic cascades) without a database, so
// actions and resolvers can be exercised in plain `#[tokio::test]`s.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::common::{CategoryId, PageWindow, RecipeId, SearchTerm, UserId};
use crate::domains::auth::{JwtService, PasswordHasher};
use crate::domains::categories::models::{Category, CreateCategory, UpdateCategory};
use crate::domains::ingredients::models::{CreateIngredient, Ingredient};
use crate::domains::recipes::models::{CreateRecipe, Recipe, RecipeFilter, UpdateRecipe};
use crate::domains::users::models::{CreateUser, DuplicateUser, User};
use crate::domains::votes::models::RecipeVote;

use super::cascade::{CascadePlan, CascadeSummary};
use super::{BaseRepository, ServerDeps};

// =============================================================================
// In-memory repository
// =============================================================================

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    categories: Vec<Category>,
    recipes: Vec<Recipe>,
    ingredients: Vec<Ingredient>,
    votes: Vec<RecipeVote>,
}

/// Vec-backed store. Rows are kept in insertion order, which is the
/// store order the Postgres adapter produces with `ORDER BY created_at, id`.
#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn category_count(&self) -> usize {
        self.state().categories.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.state().recipes.len()
    }

    pub fn ingredient_count(&self) -> usize {
        self.state().ingredients.len()
    }

    pub fn vote_count(&self) -> usize {
        self.state().votes.len()
    }
}

#[async_trait]
impl BaseRepository for InMemoryRepository {
    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.state().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.state().users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, input: CreateUser) -> Result<User> {
        let mut state = self.state();
        if state.users.iter().any(|u| u.username == input.username) {
            return Err(DuplicateUser { field: "username" }.into());
        }
        if state.users.iter().any(|u| u.email == input.email) {
            return Err(DuplicateUser { field: "email" }.into());
        }
        let user = User::from_input(input);
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.state().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self
            .state()
            .categories
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn list_categories(
        &self,
        search: Option<&SearchTerm>,
        window: PageWindow,
    ) -> Result<Vec<Category>> {
        let state = self.state();
        let matching = state.categories.iter().filter(|c| {
            search.map_or(true, |term| {
                term.matches_any(&[c.name.as_str(), c.description.as_str()])
            })
        });
        Ok(window.apply(matching.cloned()))
    }

    async fn create_category(&self, input: CreateCategory) -> Result<Category> {
        let category = Category::from_input(input);
        self.state().categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: CategoryId,
        input: UpdateCategory,
    ) -> Result<Option<Category>> {
        let mut state = self.state();
        Ok(state.categories.iter_mut().find(|c| c.id == id).map(|c| {
            input.apply_to(c);
            c.clone()
        }))
    }

    async fn find_recipe(&self, id: RecipeId) -> Result<Option<Recipe>> {
        Ok(self.state().recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_recipes(&self, filter: &RecipeFilter, window: PageWindow) -> Result<Vec<Recipe>> {
        let state = self.state();
        Ok(window.apply(state.recipes.iter().filter(|r| filter.matches(r)).cloned()))
    }

    async fn create_recipe(&self, input: CreateRecipe) -> Result<Recipe> {
        let recipe = Recipe::from_input(input);
        self.state().recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn update_recipe(&self, id: RecipeId, input: UpdateRecipe) -> Result<Option<Recipe>> {
        let mut state = self.state();
        Ok(state.recipes.iter_mut().find(|r| r.id == id).map(|r| {
            input.apply_to(r);
            r.clone()
        }))
    }

    async fn list_ingredients(&self, recipe_id: RecipeId) -> Result<Vec<Ingredient>> {
        Ok(self
            .state()
            .ingredients
            .iter()
            .filter(|i| i.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    async fn create_ingredient(&self, input: CreateIngredient) -> Result<Ingredient> {
        let ingredient = Ingredient::from_input(input);
        self.state().ingredients.push(ingredient.clone());
        Ok(ingredient)
    }

    async fn list_votes(&self, recipe_id: RecipeId) -> Result<Vec<RecipeVote>> {
        Ok(self
            .state()
            .votes
            .iter()
            .filter(|v| v.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    async fn count_votes(&self, recipe_id: RecipeId) -> Result<i64> {
        let count = self
            .state()
            .votes
            .iter()
            .filter(|v| v.recipe_id == recipe_id)
            .count();
        Ok(count as i64)
    }

    async fn create_vote(&self, user_id: UserId, recipe_id: RecipeId) -> Result<RecipeVote> {
        let vote = RecipeVote::new(user_id, recipe_id);
        self.state().votes.push(vote.clone());
        Ok(vote)
    }

    async fn apply_cascade(&self, plan: &CascadePlan) -> Result<CascadeSummary> {
        // One guard for the whole plan keeps the delete atomic.
        let mut state = self.state();

        // Planned recipes plus any filed under a planned category since.
        let recipes: Vec<RecipeId> = state
            .recipes
            .iter()
            .filter(|r| plan.recipes.contains(&r.id) || plan.categories.contains(&r.category_id))
            .map(|r| r.id)
            .collect();

        fn remove<T>(rows: &mut Vec<T>, doomed: impl Fn(&T) -> bool) -> u64 {
            let before = rows.len();
            rows.retain(|row| !doomed(row));
            (before - rows.len()) as u64
        }

        Ok(CascadeSummary {
            votes: remove(&mut state.votes, |v| {
                plan.votes.contains(&v.id) || recipes.contains(&v.recipe_id)
            }),
            ingredients: remove(&mut state.ingredients, |i| {
                plan.ingredients.contains(&i.id) || recipes.contains(&i.recipe_id)
            }),
            recipes: remove(&mut state.recipes, |r| recipes.contains(&r.id)),
            categories: remove(&mut state.categories, |c| plan.categories.contains(&c.id)),
        })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-signing";
pub const TEST_JWT_ISSUER: &str = "recipe-server-test";

/// Builder for `ServerDeps` wired to in-memory services.
pub struct TestDependencies {
    pub repository: Arc<InMemoryRepository>,
    pub jwt_service: Arc<JwtService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryRepository::new()),
            jwt_service: Arc::new(JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string())),
        }
    }

    /// Swap the JWT service, e.g. for one with a custom expiry.
    pub fn with_jwt_service(mut self, jwt_service: JwtService) -> Self {
        self.jwt_service = Arc::new(jwt_service);
        self
    }

    pub fn into_server_deps(self) -> ServerDeps {
        ServerDeps::new(
            self.repository,
            self.jwt_service,
            Arc::new(PasswordHasher::for_tests()),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
