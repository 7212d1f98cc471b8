use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CategoryId, PageWindow, SearchTerm, UserId};

/// Category model - a user-owned grouping of recipes
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub owner_id: UserId,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a category
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub description: String,
    pub owner_id: UserId,
}

/// Sparse update: `None` leaves the field untouched, `Some("")` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateCategory {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    /// Field merge used by stores that hold rows in memory.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(description) = &self.description {
            category.description = description.clone();
        }
        category.updated_at = Utc::now();
    }
}

impl Category {
    pub fn from_input(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: input.name,
            owner_id: input.owner_id,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    pub async fn find_by_id(id: CategoryId, pool: &PgPool) -> Result<Option<Self>> {
        let category = sqlx::query_as::<_, Self>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(category)
    }

    /// First category (in store order) with exactly this name.
    pub async fn find_by_name(name: &str, pool: &PgPool) -> Result<Option<Self>> {
        let category = sqlx::query_as::<_, Self>(
            "SELECT * FROM categories WHERE name = $1 ORDER BY created_at, id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;
        Ok(category)
    }

    /// Categories whose name or description contains the search term,
    /// in insertion order, sliced by the window.
    pub async fn find_page(
        search: Option<&SearchTerm>,
        window: PageWindow,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let categories = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM categories
            WHERE $1::text IS NULL
               OR name ILIKE $1 ESCAPE '\'
               OR description ILIKE $1 ESCAPE '\'
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search.map(SearchTerm::like_pattern))
        .bind(window.sql_limit())
        .bind(window.sql_offset())
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }

    pub async fn create(input: CreateCategory, pool: &PgPool) -> Result<Self> {
        let row = Self::from_input(input);
        let category = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO categories (id, name, owner_id, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(row.owner_id)
        .bind(&row.description)
        .bind(row.created_at)
        .bind(row.updated_at)
        .fetch_one(pool)
        .await?;
        Ok(category)
    }

    /// Single-statement field merge.
    pub async fn update(id: CategoryId, input: UpdateCategory, pool: &PgPool) -> Result<Option<Self>> {
        let category = sqlx::query_as::<_, Self>(
            r#"
            UPDATE categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.name)
        .bind(input.description)
        .fetch_optional(pool)
        .await?;
        Ok(category)
    }
}
