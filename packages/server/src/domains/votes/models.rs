use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{RecipeId, RecipeVoteId, UserId};

/// One user's endorsement of a recipe. Repeats are allowed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecipeVote {
    pub id: RecipeVoteId,
    pub user_id: UserId,
    pub recipe_id: RecipeId,
    pub created_at: DateTime<Utc>,
}

impl RecipeVote {
    pub fn new(user_id: UserId, recipe_id: RecipeId) -> Self {
        Self {
            id: RecipeVoteId::new(),
            user_id,
            recipe_id,
            created_at: Utc::now(),
        }
    }

    pub async fn find_by_recipe(recipe_id: RecipeId, pool: &PgPool) -> Result<Vec<Self>> {
        let votes = sqlx::query_as::<_, Self>(
            "SELECT * FROM recipe_votes WHERE recipe_id = $1 ORDER BY created_at, id",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await?;
        Ok(votes)
    }

    pub async fn count_for_recipe(recipe_id: RecipeId, pool: &PgPool) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM recipe_votes WHERE recipe_id = $1")
                .bind(recipe_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    pub async fn create(user_id: UserId, recipe_id: RecipeId, pool: &PgPool) -> Result<Self> {
        let row = Self::new(user_id, recipe_id);
        let vote = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO recipe_votes (id, user_id, recipe_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.recipe_id)
        .bind(row.created_at)
        .fetch_one(pool)
        .await?;
        Ok(vote)
    }
}
