use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::UserId;

/// Gender choices, persisted as a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, juniper::GraphQLEnum)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
            Gender::Other => "o",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "m" => Ok(Gender::Male),
            "f" => Ok(Gender::Female),
            "o" => Ok(Gender::Other),
            _ => Err(anyhow::anyhow!("Invalid gender code: {}", s)),
        }
    }
}

/// User model. `password_hash` never leaves the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Single-letter code, see [`Gender`].
    pub gender: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
}

/// Raised by the store when a unique column already holds the value.
#[derive(Debug, thiserror::Error)]
#[error("a user with that {field} already exists")]
pub struct DuplicateUser {
    pub field: &'static str,
}

impl User {
    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(|code| code.parse().ok())
    }

    /// Builds an in-memory row; the store assigns nothing else.
    pub fn from_input(input: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            gender: input.gender.map(|g| g.code().to_string()),
            password_hash: input.password_hash,
            is_active: true,
            is_staff: false,
            date_joined: now,
            updated_at: now,
        }
    }

    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_username(username: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, Self>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, Self>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Inserts a user. A unique violation surfaces as [`DuplicateUser`]
    /// inside the returned `anyhow::Error`.
    pub async fn create(input: CreateUser, pool: &PgPool) -> Result<Self> {
        let row = Self::from_input(input);

        let result = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (
                id, username, email, first_name, last_name, gender,
                password_hash, is_active, is_staff, date_joined, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(&row.username)
        .bind(&row.email)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.gender)
        .bind(&row.password_hash)
        .bind(row.is_active)
        .bind(row.is_staff)
        .bind(row.date_joined)
        .bind(row.updated_at)
        .fetch_one(pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                let field = match db_err.constraint() {
                    Some(c) if c.contains("email") => "email",
                    _ => "username",
                };
                Err(DuplicateUser { field }.into())
            }
            Err(e) => Err(e).context("Failed to insert user"),
        }
    }
}
