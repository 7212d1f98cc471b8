use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{IngredientId, RecipeId};

/// Ingredient model - a named, measured line item of a recipe
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ingredient {
    pub id: IngredientId,
    pub recipe_id: RecipeId,
    pub name: String,
    pub amount: f64,
    pub instruction_notes: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an ingredient
#[derive(Debug, Clone)]
pub struct CreateIngredient {
    pub recipe_id: RecipeId,
    pub name: String,
    pub amount: f64,
    pub instruction_notes: String,
}

impl Ingredient {
    pub fn from_input(input: CreateIngredient) -> Self {
        Self {
            id: IngredientId::new(),
            recipe_id: input.recipe_id,
            name: input.name,
            amount: input.amount,
            instruction_notes: input.instruction_notes,
            created_at: Utc::now(),
        }
    }

    pub async fn find_by_recipe(recipe_id: RecipeId, pool: &PgPool) -> Result<Vec<Self>> {
        let ingredients = sqlx::query_as::<_, Self>(
            "SELECT * FROM ingredients WHERE recipe_id = $1 ORDER BY created_at, id",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await?;
        Ok(ingredients)
    }

    pub async fn create(input: CreateIngredient, pool: &PgPool) -> Result<Self> {
        let row = Self::from_input(input);
        let ingredient = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO ingredients (id, recipe_id, name, amount, instruction_notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.recipe_id)
        .bind(&row.name)
        .bind(row.amount)
        .bind(&row.instruction_notes)
        .bind(row.created_at)
        .fetch_one(pool)
        .await?;
        Ok(ingredient)
    }
}
