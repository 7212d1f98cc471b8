//! Integration tests for category queries and mutations.
//!
//! Runs the full schema against the in-memory store and checks the
//! authentication and ownership rules on every write.

mod common;

use crate::common::{create_category, create_recipe, sign_up, TestApp};
use serde_json::json;

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn anonymous_can_look_up_category_by_id_and_name() {
    let app = TestApp::new();
    let alice = sign_up(&app.anonymous(), "alice").await;
    let cat_id = create_category(&app.client_for(alice), "Soups").await;

    let data = app
        .anonymous()
        .query_with_vars(
            r#"query($id: ID!) { category(id: $id) { id name description owner { username } } }"#,
            vars!("id" => cat_id.clone()),
        )
        .await;
    assert_eq!(data["category"]["name"], "Soups");
    assert_eq!(data["category"]["description"], "Test category");
    assert_eq!(data["category"]["owner"]["username"], "alice");

    let data = app
        .anonymous()
        .query(r#"{ category(name: "Soups") { id } }"#)
        .await;
    assert_eq!(data["category"]["id"], json!(cat_id));
}

#[tokio::test]
async fn category_lookup_reports_missing_rows() {
    let app = TestApp::new();

    let result = app
        .anonymous()
        .execute(r#"{ category(name: "Nope") { id } }"#)
        .await;
    assert_eq!(result.error_code(), "NOT_FOUND");
    assert_eq!(result.error_message(), "Invalid category name!");

    let result = app
        .anonymous()
        .execute(r#"{ category(id: "not-an-id") { id } }"#)
        .await;
    assert_eq!(result.error_code(), "NOT_FOUND");
    assert_eq!(result.error_message(), "Invalid category ID!");

    let result = app.anonymous().execute(r#"{ category { id } }"#).await;
    assert_eq!(result.error_code(), "VALIDATION");
}

#[tokio::test]
async fn all_categories_searches_and_paginates_in_store_order() {
    let app = TestApp::new();
    let alice = sign_up(&app.anonymous(), "alice").await;
    let client = app.client_for(alice);
    for name in ["Breakfast", "Soups", "Desserts", "Salads"] {
        create_category(&client, name).await;
    }

    let data = app
        .anonymous()
        .query(r#"{ allCategories { name } }"#)
        .await;
    let names: Vec<_> = data["allCategories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Breakfast", "Soups", "Desserts", "Salads"]);

    let data = app
        .anonymous()
        .query(r#"{ allCategories(first: 2, skip: 1) { name } }"#)
        .await;
    assert_eq!(
        data["allCategories"],
        json!([{ "name": "Soups" }, { "name": "Desserts" }])
    );

    // Case-insensitive, matches name or description
    let data = app
        .anonymous()
        .query(r#"{ allCategories(search: "S") { name } }"#)
        .await;
    assert_eq!(data["allCategories"].as_array().unwrap().len(), 4);

    let data = app
        .anonymous()
        .query(r#"{ allCategories(search: "soup") { name } }"#)
        .await;
    assert_eq!(data["allCategories"], json!([{ "name": "Soups" }]));

    let data = app
        .anonymous()
        .query(r#"{ allCategories(first: 0) { name } }"#)
        .await;
    assert_eq!(data["allCategories"], json!([]));

    let result = app
        .anonymous()
        .execute(r#"{ allCategories(skip: -1) { name } }"#)
        .await;
    assert_eq!(result.error_code(), "VALIDATION");
}

#[tokio::test]
async fn category_lists_recipes_from_every_owner() {
    let app = TestApp::new();
    let alice = sign_up(&app.anonymous(), "alice").await;
    let bob = sign_up(&app.anonymous(), "bob").await;
    let cat_id = create_category(&app.client_for(alice), "Soups").await;
    create_recipe(&app.client_for(alice), &cat_id, "Minestrone").await;
    create_recipe(&app.client_for(bob), &cat_id, "Borscht").await;

    let data = app
        .anonymous()
        .query_with_vars(
            r#"query($id: ID!) { category(id: $id) { recipes { title } } }"#,
            vars!("id" => cat_id),
        )
        .await;
    assert_eq!(
        data["category"]["recipes"],
        json!([{ "title": "Minestrone" }, { "title": "Borscht" }])
    );
}

// =============================================================================
// Writes
// =============================================================================

#[tokio::test]
async fn create_category_requires_authentication() {
    let app = TestApp::new();

    let result = app
        .anonymous()
        .execute(r#"mutation { createCategory(name: "Soups") { category { id } } }"#)
        .await;

    assert_eq!(result.error_code(), "UNAUTHENTICATED");
    assert_eq!(
        result.error_message(),
        "You must be logged in to complete this action!"
    );
    assert_eq!(app.repository.category_count(), 0);
}

#[tokio::test]
async fn create_category_defaults_description_and_sets_owner() {
    let app = TestApp::new();
    let alice = sign_up(&app.anonymous(), "alice").await;

    let data = app
        .client_for(alice)
        .query(
            r#"mutation { createCategory(name: "Soups") {
                category { name description owner { id } }
            } }"#,
        )
        .await;

    let category = &data["createCategory"]["category"];
    assert_eq!(category["description"], "");
    assert_eq!(category["owner"]["id"], json!(alice.to_string()));
}

#[tokio::test]
async fn create_category_rejects_long_names() {
    let app = TestApp::new();
    let alice = sign_up(&app.anonymous(), "alice").await;

    let result = app
        .client_for(alice)
        .execute_with_vars(
            r#"mutation($name: String!) { createCategory(name: $name) { category { id } } }"#,
            vars!("name" => "x".repeat(101)),
        )
        .await;

    assert_eq!(result.error_code(), "VALIDATION");
    assert_eq!(app.repository.category_count(), 0);
}

#[tokio::test]
async fn only_the_owner_can_update_a_category() {
    let app = TestApp::new();
    let alice = sign_up(&app.anonymous(), "alice").await;
    let bob = sign_up(&app.anonymous(), "bob").await;
    let cat_id = create_category(&app.client_for(alice), "Soups").await;

    let mutation = r#"mutation($id: ID!) {
        updateCategory(id: $id, description: "Hot and cold") {
            category { name description }
        }
    }"#;

    let result = app
        .anonymous()
        .execute_with_vars(mutation, vars!("id" => cat_id.clone()))
        .await;
    assert_eq!(result.error_code(), "UNAUTHENTICATED");

    let result = app
        .client_for(bob)
        .execute_with_vars(mutation, vars!("id" => cat_id.clone()))
        .await;
    assert_eq!(result.error_code(), "PERMISSION_DENIED");
    assert_eq!(
        result.error_message(),
        "You are not permitted to update this category"
    );

    let data = app
        .client_for(alice)
        .query_with_vars(mutation, vars!("id" => cat_id))
        .await;
    // Omitted fields keep their values
    assert_eq!(
        data["updateCategory"]["category"],
        json!({ "name": "Soups", "description": "Hot and cold" })
    );
}

#[tokio::test]
async fn update_of_missing_category_is_not_found_for_signed_in_callers() {
    let app = TestApp::new();
    let alice = sign_up(&app.anonymous(), "alice").await;
    let missing = recipe_core::common::CategoryId::new().to_string();
    let mutation = r#"mutation($id: ID!) { updateCategory(id: $id, name: "X") { category { id } } }"#;

    let result = app
        .client_for(alice)
        .execute_with_vars(mutation, vars!("id" => missing.clone()))
        .await;
    assert_eq!(result.error_code(), "NOT_FOUND");

    let result = app
        .anonymous()
        .execute_with_vars(mutation, vars!("id" => missing))
        .await;
    assert_eq!(result.error_code(), "UNAUTHENTICATED");
}

#[tokio::test]
async fn delete_category_removes_it_and_returns_its_id() {
    let app = TestApp::new();
    let alice = sign_up(&app.anonymous(), "alice").await;
    let bob = sign_up(&app.anonymous(), "bob").await;
    let cat_id = create_category(&app.client_for(alice), "Soups").await;
    let mutation = r#"mutation($id: ID!) { deleteCategory(id: $id) { catId } }"#;

    let result = app
        .client_for(bob)
        .execute_with_vars(mutation, vars!("id" => cat_id.clone()))
        .await;
    assert_eq!(result.error_code(), "PERMISSION_DENIED");
    assert_eq!(app.repository.category_count(), 1);

    let data = app
        .client_for(alice)
        .query_with_vars(mutation, vars!("id" => cat_id.clone()))
        .await;
    assert_eq!(data["deleteCategory"]["catId"], json!(cat_id));
    assert_eq!(app.repository.category_count(), 0);

    let result = app
        .anonymous()
        .execute_with_vars(
            r#"query($id: ID!) { category(id: $id) { id } }"#,
            vars!("id" => cat_id),
        )
        .await;
    assert_eq!(result.error_code(), "NOT_FOUND");
}
