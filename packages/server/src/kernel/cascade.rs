//! Deletion plans for the category → recipe → {ingredient, vote} tree.
//!
//! Deletes never rely on store-level cascades. The planner walks the
//! ownership tree through the repository, collects every id that has to go,
//! and hands the whole plan to [`BaseRepository::apply_cascade`], which
//! removes it in one unit.
//!
//! Planning happens before the store is locked, so a child can be attached
//! to a planned parent in between. `apply_cascade` sweeps such late children
//! by parent id under the same lock or transaction.

use anyhow::Result;

use crate::common::{CategoryId, IngredientId, PageWindow, RecipeId, RecipeVoteId};
use crate::domains::recipes::models::RecipeFilter;

use super::BaseRepository;

/// Everything a single delete operation removes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadePlan {
    pub categories: Vec<CategoryId>,
    pub recipes: Vec<RecipeId>,
    pub ingredients: Vec<IngredientId>,
    pub votes: Vec<RecipeVoteId>,
}

/// Row counts actually removed by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub categories: u64,
    pub recipes: u64,
    pub ingredients: u64,
    pub votes: u64,
}

impl CascadeSummary {
    pub fn total(&self) -> u64 {
        self.categories + self.recipes + self.ingredients + self.votes
    }
}

impl CascadePlan {
    /// Plan for a category and everything filed under it.
    pub async fn for_category(repo: &dyn BaseRepository, category_id: CategoryId) -> Result<Self> {
        let mut plan = Self {
            categories: vec![category_id],
            ..Self::default()
        };

        let recipes = repo
            .list_recipes(&RecipeFilter::in_category(category_id), PageWindow::ALL)
            .await?;
        for recipe in recipes {
            plan.collect_recipe(repo, recipe.id).await?;
        }

        Ok(plan)
    }

    /// Plan for a single recipe with its ingredients and votes.
    pub async fn for_recipe(repo: &dyn BaseRepository, recipe_id: RecipeId) -> Result<Self> {
        let mut plan = Self::default();
        plan.collect_recipe(repo, recipe_id).await?;
        Ok(plan)
    }

    async fn collect_recipe(&mut self, repo: &dyn BaseRepository, recipe_id: RecipeId) -> Result<()> {
        self.recipes.push(recipe_id);
        self.ingredients.extend(
            repo.list_ingredients(recipe_id)
                .await?
                .into_iter()
                .map(|i| i.id),
        );
        self.votes
            .extend(repo.list_votes(recipe_id).await?.into_iter().map(|v| v.id));
        Ok(())
    }
}
