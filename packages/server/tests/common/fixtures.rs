//! Test fixtures for creating test data through the public schema.

use recipe_core::common::UserId;
use uuid::Uuid;

use super::GraphQLClient;
use crate::vars;

/// A name no other test in a shared database will pick.
pub fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

/// Register a user with password `password123` and return its id.
pub async fn sign_up(client: &GraphQLClient, username: &str) -> UserId {
    let data = client
        .query_with_vars(
            r#"mutation SignUp($username: String!, $email: String!) {
                createUser(username: $username, email: $email, password: "password123") {
                    user { id }
                }
            }"#,
            vars!(
                "username" => username.to_string(),
                "email" => format!("{}@example.com", username),
            ),
        )
        .await;

    let id = data["createUser"]["user"]["id"]
        .as_str()
        .expect("createUser returned no id");
    UserId::parse(id).expect("createUser returned a malformed id")
}

/// Create a category as the client's caller and return its id.
pub async fn create_category(client: &GraphQLClient, name: &str) -> String {
    let data = client
        .query_with_vars(
            r#"mutation CreateCategory($name: String!) {
                createCategory(name: $name, description: "Test category") {
                    category { id }
                }
            }"#,
            vars!("name" => name.to_string()),
        )
        .await;

    id_at(&data["createCategory"]["category"]["id"])
}

/// Create a recipe in `cat_id` as the client's caller and return its id.
pub async fn create_recipe(client: &GraphQLClient, cat_id: &str, title: &str) -> String {
    let data = client
        .query_with_vars(
            r#"mutation CreateRecipe($catId: ID!, $title: String!) {
                createRecipe(catId: $catId, title: $title, description: "Test recipe") {
                    recipe { id }
                }
            }"#,
            vars!("catId" => cat_id.to_string(), "title" => title.to_string()),
        )
        .await;

    id_at(&data["createRecipe"]["recipe"]["id"])
}

/// Add an ingredient to a recipe and return its id.
pub async fn create_ingredient(client: &GraphQLClient, recipe_id: &str, name: &str) -> String {
    let data = client
        .query_with_vars(
            r#"mutation CreateIngredient($recipeId: ID!, $name: String!) {
                createIngredient(recipeId: $recipeId, name: $name, amount: 1.5) {
                    ingredient { id }
                }
            }"#,
            vars!("recipeId" => recipe_id.to_string(), "name" => name.to_string()),
        )
        .await;

    id_at(&data["createIngredient"]["ingredient"]["id"])
}

/// Vote for a recipe as the client's caller.
pub async fn vote_for(client: &GraphQLClient, recipe_id: &str) {
    client
        .query_with_vars(
            r#"mutation Vote($recipeId: ID!) {
                createRecipeVote(recipeId: $recipeId) { vote { id } }
            }"#,
            vars!("recipeId" => recipe_id.to_string()),
        )
        .await;
}

fn id_at(value: &serde_json::Value) -> String {
    value.as_str().expect("Expected an id").to_string()
}
