//! Postgres-backed repository. SQL lives on the models; this adapter only
//! routes trait calls to them and owns the cascade transaction.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::common::{CategoryId, PageWindow, RecipeId, SearchTerm, UserId};
use crate::domains::categories::models::{Category, CreateCategory, UpdateCategory};
use crate::domains::ingredients::models::{CreateIngredient, Ingredient};
use crate::domains::recipes::models::{CreateRecipe, Recipe, RecipeFilter, UpdateRecipe};
use crate::domains::users::models::{CreateUser, User};
use crate::domains::votes::models::RecipeVote;

use super::cascade::{CascadePlan, CascadeSummary};
use super::BaseRepository;

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseRepository for PgRepository {
    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        User::find_by_id(id, &self.pool).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        User::find_by_username(username, &self.pool).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        User::find_by_email(email, &self.pool).await
    }

    async fn create_user(&self, input: CreateUser) -> Result<User> {
        User::create(input, &self.pool).await
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>> {
        Category::find_by_id(id, &self.pool).await
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        Category::find_by_name(name, &self.pool).await
    }

    async fn list_categories(
        &self,
        search: Option<&SearchTerm>,
        window: PageWindow,
    ) -> Result<Vec<Category>> {
        Category::find_page(search, window, &self.pool).await
    }

    async fn create_category(&self, input: CreateCategory) -> Result<Category> {
        Category::create(input, &self.pool).await
    }

    async fn update_category(
        &self,
        id: CategoryId,
        input: UpdateCategory,
    ) -> Result<Option<Category>> {
        Category::update(id, input, &self.pool).await
    }

    async fn find_recipe(&self, id: RecipeId) -> Result<Option<Recipe>> {
        Recipe::find_by_id(id, &self.pool).await
    }

    async fn list_recipes(&self, filter: &RecipeFilter, window: PageWindow) -> Result<Vec<Recipe>> {
        Recipe::find_page(filter, window, &self.pool).await
    }

    async fn create_recipe(&self, input: CreateRecipe) -> Result<Recipe> {
        Recipe::create(input, &self.pool).await
    }

    async fn update_recipe(&self, id: RecipeId, input: UpdateRecipe) -> Result<Option<Recipe>> {
        Recipe::update(id, input, &self.pool).await
    }

    async fn list_ingredients(&self, recipe_id: RecipeId) -> Result<Vec<Ingredient>> {
        Ingredient::find_by_recipe(recipe_id, &self.pool).await
    }

    async fn create_ingredient(&self, input: CreateIngredient) -> Result<Ingredient> {
        Ingredient::create(input, &self.pool).await
    }

    async fn list_votes(&self, recipe_id: RecipeId) -> Result<Vec<RecipeVote>> {
        RecipeVote::find_by_recipe(recipe_id, &self.pool).await
    }

    async fn count_votes(&self, recipe_id: RecipeId) -> Result<i64> {
        RecipeVote::count_for_recipe(recipe_id, &self.pool).await
    }

    async fn create_vote(&self, user_id: UserId, recipe_id: RecipeId) -> Result<RecipeVote> {
        RecipeVote::create(user_id, recipe_id, &self.pool).await
    }

    async fn apply_cascade(&self, plan: &CascadePlan) -> Result<CascadeSummary> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start cascade transaction")?;

        // Lock the parents so nothing new can be attached until commit.
        sqlx::query("SELECT id FROM categories WHERE id = ANY($1) FOR UPDATE")
            .bind(&plan.categories)
            .execute(&mut *tx)
            .await?;
        let recipe_ids: Vec<RecipeId> = sqlx::query_scalar(
            "SELECT id FROM recipes WHERE id = ANY($1) OR category_id = ANY($2) FOR UPDATE",
        )
        .bind(&plan.recipes)
        .bind(&plan.categories)
        .fetch_all(&mut *tx)
        .await?;

        // Leaves first so no row ever points at a deleted parent.
        let votes =
            sqlx::query("DELETE FROM recipe_votes WHERE id = ANY($1) OR recipe_id = ANY($2)")
                .bind(&plan.votes)
                .bind(&recipe_ids)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        let ingredients =
            sqlx::query("DELETE FROM ingredients WHERE id = ANY($1) OR recipe_id = ANY($2)")
                .bind(&plan.ingredients)
                .bind(&recipe_ids)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        let recipes = sqlx::query("DELETE FROM recipes WHERE id = ANY($1)")
            .bind(&recipe_ids)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let categories = sqlx::query("DELETE FROM categories WHERE id = ANY($1)")
            .bind(&plan.categories)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit()
            .await
            .context("Failed to commit cascade transaction")?;

        let summary = CascadeSummary {
            categories,
            recipes,
            ingredients,
            votes,
        };
        debug!(?summary, "Cascade applied");
        Ok(summary)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }
}
