use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CategoryId, PageWindow, RecipeId, SearchTerm, UserId};

/// Recipe model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    pub id: RecipeId,
    pub owner_id: UserId,
    pub category_id: CategoryId,
    pub title: String,
    pub description: String,
    /// Stored and exposed, but not consulted by any read path.
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a recipe
#[derive(Debug, Clone)]
pub struct CreateRecipe {
    pub owner_id: UserId,
    pub category_id: CategoryId,
    pub title: String,
    pub description: String,
    pub is_public: bool,
}

/// Sparse update: omitted fields stay, explicit values (including "") are written.
#[derive(Debug, Clone, Default)]
pub struct UpdateRecipe {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

impl UpdateRecipe {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_public.is_none()
    }

    pub fn apply_to(&self, recipe: &mut Recipe) {
        if let Some(title) = &self.title {
            recipe.title = title.clone();
        }
        if let Some(description) = &self.description {
            recipe.description = description.clone();
        }
        if let Some(is_public) = self.is_public {
            recipe.is_public = is_public;
        }
        recipe.updated_at = Utc::now();
    }
}

/// Row filter for recipe collections. Unset fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub owner_id: Option<UserId>,
    pub category_id: Option<CategoryId>,
    /// Matched against title and description.
    pub search: Option<SearchTerm>,
}

impl RecipeFilter {
    pub fn owned_by(owner_id: UserId) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }

    pub fn in_category(category_id: CategoryId) -> Self {
        Self {
            category_id: Some(category_id),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: Option<SearchTerm>) -> Self {
        self.search = search;
        self
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.owner_id.map_or(true, |id| recipe.owner_id == id)
            && self.category_id.map_or(true, |id| recipe.category_id == id)
            && self.search.as_ref().map_or(true, |term| {
                term.matches_any(&[recipe.title.as_str(), recipe.description.as_str()])
            })
    }
}

impl Recipe {
    pub fn from_input(input: CreateRecipe) -> Self {
        let now = Utc::now();
        Self {
            id: RecipeId::new(),
            owner_id: input.owner_id,
            category_id: input.category_id,
            title: input.title,
            description: input.description,
            is_public: input.is_public,
            created_at: now,
            updated_at: now,
        }
    }

    pub async fn find_by_id(id: RecipeId, pool: &PgPool) -> Result<Option<Self>> {
        let recipe = sqlx::query_as::<_, Self>("SELECT * FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(recipe)
    }

    pub async fn find_page(
        filter: &RecipeFilter,
        window: PageWindow,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let recipes = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM recipes
            WHERE ($1::uuid IS NULL OR owner_id = $1)
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::text IS NULL
                   OR title ILIKE $3 ESCAPE '\'
                   OR description ILIKE $3 ESCAPE '\')
            ORDER BY created_at, id
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filter.owner_id)
        .bind(filter.category_id)
        .bind(filter.search.as_ref().map(SearchTerm::like_pattern))
        .bind(window.sql_limit())
        .bind(window.sql_offset())
        .fetch_all(pool)
        .await?;
        Ok(recipes)
    }

    pub async fn create(input: CreateRecipe, pool: &PgPool) -> Result<Self> {
        let row = Self::from_input(input);
        let recipe = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO recipes (
                id, owner_id, category_id, title, description, is_public,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.owner_id)
        .bind(row.category_id)
        .bind(&row.title)
        .bind(&row.description)
        .bind(row.is_public)
        .bind(row.created_at)
        .bind(row.updated_at)
        .fetch_one(pool)
        .await?;
        Ok(recipe)
    }

    pub async fn update(id: RecipeId, input: UpdateRecipe, pool: &PgPool) -> Result<Option<Self>> {
        let recipe = sqlx::query_as::<_, Self>(
            r#"
            UPDATE recipes SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                is_public = COALESCE($4, is_public),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.title)
        .bind(input.description)
        .bind(input.is_public)
        .fetch_optional(pool)
        .await?;
        Ok(recipe)
    }
}
