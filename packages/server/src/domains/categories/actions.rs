//! Category actions
//!
//! Reads are world-readable. Writes need a signed-in caller, and updates and
//! deletes additionally need the caller to own the category.

use tracing::{debug, info};

use crate::common::validation::{check_max_chars, check_max_chars_opt, MAX_NAME_LEN};
use crate::common::{ApiError, ApiResult, Caller, CategoryId, OffsetArgs, SearchTerm};
use crate::domains::categories::models::{Category, CreateCategory, UpdateCategory};
use crate::kernel::{CascadePlan, ServerDeps};

pub const INVALID_CATEGORY_ID: &str = "Invalid category ID!";
pub const INVALID_CATEGORY_NAME: &str = "Invalid category name!";

/// Look up a category by id or, failing that, by exact name.
///
/// When both are given the id wins.
pub async fn get_category(
    id: Option<CategoryId>,
    name: Option<&str>,
    deps: &ServerDeps,
) -> ApiResult<Category> {
    match (id, name) {
        (Some(id), _) => deps
            .repo()
            .find_category(id)
            .await?
            .ok_or_else(|| ApiError::not_found(INVALID_CATEGORY_ID)),
        (None, Some(name)) => deps
            .repo()
            .find_category_by_name(name)
            .await?
            .ok_or_else(|| ApiError::not_found(INVALID_CATEGORY_NAME)),
        (None, None) => Err(ApiError::validation(
            "Either id or name is required to look up a category",
        )),
    }
}

/// All categories matching `search` in name or description, paginated.
pub async fn list_categories(
    search: Option<&str>,
    page: OffsetArgs,
    deps: &ServerDeps,
) -> ApiResult<Vec<Category>> {
    let window = page.validate()?;
    let search = SearchTerm::parse(search);

    let categories = deps.repo().list_categories(search.as_ref(), window).await?;
    Ok(categories)
}

pub async fn create_category(
    name: String,
    description: Option<String>,
    caller: &Caller,
    deps: &ServerDeps,
) -> ApiResult<Category> {
    let owner_id = caller.require_user()?;
    check_max_chars("name", &name, MAX_NAME_LEN)?;

    let category = deps
        .repo()
        .create_category(CreateCategory {
            name,
            description: description.unwrap_or_default(),
            owner_id,
        })
        .await?;

    info!(category_id = %category.id, owner_id = %owner_id, "Category created");
    Ok(category)
}

/// Load a category and check the caller owns it.
async fn owned_category(
    id: CategoryId,
    caller: &Caller,
    denial: &str,
    deps: &ServerDeps,
) -> ApiResult<Category> {
    caller.require_user()?;

    let category = deps
        .repo()
        .find_category(id)
        .await?
        .ok_or_else(|| ApiError::not_found(INVALID_CATEGORY_ID))?;

    caller.require_owner(category.owner_id, denial)?;
    Ok(category)
}

pub async fn update_category(
    id: CategoryId,
    changes: UpdateCategory,
    caller: &Caller,
    deps: &ServerDeps,
) -> ApiResult<Category> {
    owned_category(id, caller, "You are not permitted to update this category", deps).await?;
    check_max_chars_opt("name", changes.name.as_deref(), MAX_NAME_LEN)?;

    if changes.is_empty() {
        debug!(category_id = %id, "Category update with no fields supplied");
    }

    let category = deps
        .repo()
        .update_category(id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(INVALID_CATEGORY_ID))?;

    info!(category_id = %id, "Category updated");
    Ok(category)
}

/// Delete a category together with its recipes and their dependents.
///
/// Returns the id of the deleted category.
pub async fn delete_category(
    id: CategoryId,
    caller: &Caller,
    deps: &ServerDeps,
) -> ApiResult<CategoryId> {
    owned_category(id, caller, "You are not permitted to delete this category", deps).await?;

    let plan = CascadePlan::for_category(deps.repo(), id).await?;
    let summary = deps.repo().apply_cascade(&plan).await?;

    info!(
        category_id = %id,
        rows = summary.total(),
        recipes = summary.recipes,
        ingredients = summary.ingredients,
        votes = summary.votes,
        "Category deleted"
    );
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UserId;
    use crate::kernel::{ServerDeps, TestDependencies};

    fn deps() -> ServerDeps {
        TestDependencies::new().into_server_deps()
    }

    async fn desserts(owner: UserId, deps: &ServerDeps) -> Category {
        create_category(
            "Desserts".to_string(),
            Some("Sweet things".to_string()),
            &Caller::user(owner),
            deps,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_requires_login() {
        let deps = deps();
        let err = create_category("Soups".to_string(), None, &Caller::Anonymous, &deps)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_create_sets_owner_and_default_description() {
        let deps = deps();
        let owner = UserId::new();

        let category = create_category("Soups".to_string(), None, &Caller::user(owner), &deps)
            .await
            .unwrap();

        assert_eq!(category.owner_id, owner);
        assert_eq!(category.description, "");
    }

    #[tokio::test]
    async fn test_get_is_public() {
        let deps = deps();
        let category = desserts(UserId::new(), &deps).await;

        let by_id = get_category(Some(category.id), None, &deps).await.unwrap();
        assert_eq!(by_id.id, category.id);

        let by_name = get_category(None, Some("Desserts"), &deps).await.unwrap();
        assert_eq!(by_name.id, category.id);
    }

    #[tokio::test]
    async fn test_get_prefers_id_over_name() {
        let deps = deps();
        let category = desserts(UserId::new(), &deps).await;

        let err = get_category(Some(CategoryId::new()), Some("Desserts"), &deps)
            .await
            .unwrap_err();
        assert!(matches!(&err, ApiError::NotFound(m) if m == INVALID_CATEGORY_ID));

        let found = get_category(Some(category.id), Some("nope"), &deps)
            .await
            .unwrap();
        assert_eq!(found.id, category.id);
    }

    #[tokio::test]
    async fn test_get_without_arguments() {
        let err = get_category(None, None, &deps()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_search_and_pagination() {
        let deps = deps();
        let caller = Caller::user(UserId::new());
        for (name, description) in [
            ("Cakes", ""),
            ("Soups", "warming"),
            ("Baking", "bread and CAKE"),
            ("Salads", ""),
        ] {
            create_category(name.to_string(), Some(description.to_string()), &caller, &deps)
                .await
                .unwrap();
        }

        let names = |cs: Vec<Category>| cs.into_iter().map(|c| c.name).collect::<Vec<_>>();

        let found = list_categories(Some("cake"), OffsetArgs::default(), &deps)
            .await
            .unwrap();
        assert_eq!(names(found), vec!["Cakes", "Baking"]);

        let page = list_categories(None, OffsetArgs::new(Some(2), Some(1)), &deps)
            .await
            .unwrap();
        assert_eq!(names(page), vec!["Soups", "Baking"]);

        let past_end = list_categories(None, OffsetArgs::new(None, Some(10)), &deps)
            .await
            .unwrap();
        assert!(past_end.is_empty());

        let err = list_categories(None, OffsetArgs::new(Some(-1), None), &deps)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_denied() {
        let deps = deps();
        let category = desserts(UserId::new(), &deps).await;

        let err = update_category(
            category.id,
            UpdateCategory {
                name: Some("Hacked".to_string()),
                description: None,
            },
            &Caller::user(UserId::new()),
            &deps,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::PermissionDenied(_)));
        let unchanged = get_category(Some(category.id), None, &deps).await.unwrap();
        assert_eq!(unchanged.name, "Desserts");
    }

    #[tokio::test]
    async fn test_update_applies_explicit_empty_string() {
        let deps = deps();
        let owner = UserId::new();
        let category = desserts(owner, &deps).await;

        let updated = update_category(
            category.id,
            UpdateCategory {
                name: None,
                description: Some(String::new()),
            },
            &Caller::user(owner),
            &deps,
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Desserts");
        assert_eq!(updated.description, "");
    }

    #[tokio::test]
    async fn test_update_checks_login_before_existence() {
        let deps = deps();
        let err = update_category(
            CategoryId::new(),
            UpdateCategory::default(),
            &Caller::Anonymous,
            &deps,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));

        let err = update_category(
            CategoryId::new(),
            UpdateCategory::default(),
            &Caller::user(UserId::new()),
            &deps,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_id() {
        let deps = deps();
        let owner = UserId::new();
        let category = desserts(owner, &deps).await;

        let deleted = delete_category(category.id, &Caller::user(owner), &deps)
            .await
            .unwrap();
        assert_eq!(deleted, category.id);

        let err = get_category(Some(category.id), None, &deps).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_denied() {
        let deps = deps();
        let category = desserts(UserId::new(), &deps).await;

        let err = delete_category(category.id, &Caller::user(UserId::new()), &deps)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::PermissionDenied(_)));
        assert!(get_category(Some(category.id), None, &deps).await.is_ok());
    }
}
