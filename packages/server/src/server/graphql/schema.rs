//! GraphQL schema definition.
//!
//! Resolvers only translate arguments and wrap results; every decision about
//! who may do what is made in the domain actions.

use super::context::GraphQLContext;
use juniper::{EmptySubscription, RootNode, ID};
use tracing::info;

// Common types
use crate::common::{ApiError, ApiResult, Id, OffsetArgs};

// Domain actions
use crate::domains::auth::actions as auth_actions;
use crate::domains::categories::actions as category_actions;
use crate::domains::ingredients::actions::{self as ingredient_actions, NewIngredient};
use crate::domains::recipes::actions::{self as recipe_actions, NewRecipe};
use crate::domains::users::actions as user_actions;
use crate::domains::votes::actions as vote_actions;

// Domain data types (GraphQL types)
use crate::domains::auth::data::{RefreshTokenPayload, TokenAuthPayload, VerifyTokenPayload};
use crate::domains::categories::data::{
    CategoryData, CreateCategoryPayload, DeleteCategoryPayload, UpdateCategoryPayload,
};
use crate::domains::ingredients::data::CreateIngredientPayload;
use crate::domains::recipes::data::{
    CreateRecipePayload, DeleteRecipePayload, RecipeData, UpdateRecipePayload,
};
use crate::domains::users::data::{CreateUserInput, CreateUserPayload, UserData};
use crate::domains::users::models::Gender;
use crate::domains::votes::data::CreateRecipeVotePayload;

// Domain models (for sparse updates)
use crate::domains::categories::models::UpdateCategory;
use crate::domains::recipes::models::UpdateRecipe;

/// Parse a GraphQL `ID` into a typed id. An id that cannot name any row is
/// reported the same way as one that names a missing row.
fn parse_id<T>(id: &ID, not_found: &str) -> ApiResult<Id<T>> {
    Id::parse(id).map_err(|_| ApiError::not_found(not_found))
}

pub struct Query;

#[juniper::graphql_object(Context = GraphQLContext)]
impl Query {
    // =========================================================================
    // Category Queries
    // =========================================================================

    /// Look up a category by id or by name (id wins when both are given).
    async fn category(
        ctx: &GraphQLContext,
        id: Option<ID>,
        name: Option<String>,
    ) -> ApiResult<CategoryData> {
        let id = id
            .map(|id| parse_id(&id, category_actions::INVALID_CATEGORY_ID))
            .transpose()?;
        let category = category_actions::get_category(id, name.as_deref(), ctx.deps()).await?;
        Ok(category.into())
    }

    /// All categories, optionally filtered by a case-insensitive search over
    /// name and description. `skip` is applied before `first`.
    async fn all_categories(
        ctx: &GraphQLContext,
        search: Option<String>,
        first: Option<i32>,
        skip: Option<i32>,
    ) -> ApiResult<Vec<CategoryData>> {
        let categories = category_actions::list_categories(
            search.as_deref(),
            OffsetArgs::new(first, skip),
            ctx.deps(),
        )
        .await?;
        Ok(categories.into_iter().map(CategoryData::from).collect())
    }

    // =========================================================================
    // Recipe Queries
    // =========================================================================

    /// A single recipe by id. Not restricted to the owner.
    async fn recipe(ctx: &GraphQLContext, id: ID) -> ApiResult<RecipeData> {
        let id = parse_id(&id, recipe_actions::INVALID_RECIPE_ID)?;
        let recipe = recipe_actions::get_recipe(id, ctx.deps()).await?;
        Ok(recipe.into())
    }

    /// The signed-in caller's recipes.
    async fn all_recipes(
        ctx: &GraphQLContext,
        search: Option<String>,
        first: Option<i32>,
        skip: Option<i32>,
    ) -> ApiResult<Vec<RecipeData>> {
        let recipes = recipe_actions::list_recipes(
            search.as_deref(),
            OffsetArgs::new(first, skip),
            &ctx.caller,
            ctx.deps(),
        )
        .await?;
        Ok(recipes.into_iter().map(RecipeData::from).collect())
    }

    // =========================================================================
    // User Queries
    // =========================================================================

    /// The signed-in caller's profile.
    async fn me(ctx: &GraphQLContext) -> ApiResult<UserData> {
        let user = user_actions::me(&ctx.caller, ctx.deps()).await?;
        Ok(user.into())
    }
}

pub struct Mutation;

#[juniper::graphql_object(Context = GraphQLContext)]
impl Mutation {
    // =========================================================================
    // Account Mutations
    // =========================================================================

    async fn create_user(
        ctx: &GraphQLContext,
        username: String,
        email: String,
        password: String,
        first_name: Option<String>,
        last_name: Option<String>,
        gender: Option<Gender>,
    ) -> ApiResult<CreateUserPayload> {
        let user = user_actions::create_user(
            CreateUserInput {
                username,
                email,
                password,
                first_name,
                last_name,
                gender,
            },
            ctx.deps(),
        )
        .await?;
        Ok(CreateUserPayload { user: user.into() })
    }

    /// Exchange a username and password for a JWT.
    async fn token_auth(
        ctx: &GraphQLContext,
        username: String,
        password: String,
    ) -> ApiResult<TokenAuthPayload> {
        let issued = auth_actions::token_auth(&username, &password, ctx.deps()).await?;
        Ok(issued.into())
    }

    fn verify_token(ctx: &GraphQLContext, token: String) -> ApiResult<VerifyTokenPayload> {
        let claims = auth_actions::verify_token(&token, ctx.deps())?;
        Ok(VerifyTokenPayload {
            payload: (&claims).into(),
        })
    }

    fn refresh_token(ctx: &GraphQLContext, token: String) -> ApiResult<RefreshTokenPayload> {
        let issued = auth_actions::refresh_token(&token, ctx.deps())?;
        Ok(issued.into())
    }

    // =========================================================================
    // Category Mutations
    // =========================================================================

    async fn create_category(
        ctx: &GraphQLContext,
        name: String,
        description: Option<String>,
    ) -> ApiResult<CreateCategoryPayload> {
        info!(caller = ?ctx.caller, "createCategory");
        let category =
            category_actions::create_category(name, description, &ctx.caller, ctx.deps()).await?;
        Ok(CreateCategoryPayload {
            category: category.into(),
        })
    }

    async fn update_category(
        ctx: &GraphQLContext,
        id: ID,
        name: Option<String>,
        description: Option<String>,
    ) -> ApiResult<UpdateCategoryPayload> {
        info!(caller = ?ctx.caller, category_id = %*id, "updateCategory");
        let id = parse_id(&id, category_actions::INVALID_CATEGORY_ID)?;
        let category = category_actions::update_category(
            id,
            UpdateCategory { name, description },
            &ctx.caller,
            ctx.deps(),
        )
        .await?;
        Ok(UpdateCategoryPayload {
            category: category.into(),
        })
    }

    /// Deletes the category with all of its recipes, their ingredients and
    /// votes.
    async fn delete_category(ctx: &GraphQLContext, id: ID) -> ApiResult<DeleteCategoryPayload> {
        info!(caller = ?ctx.caller, category_id = %*id, "deleteCategory");
        let category_id = parse_id(&id, category_actions::INVALID_CATEGORY_ID)?;
        let deleted =
            category_actions::delete_category(category_id, &ctx.caller, ctx.deps()).await?;
        Ok(DeleteCategoryPayload {
            cat_id: ID::new(deleted.to_string()),
        })
    }

    // =========================================================================
    // Recipe Mutations
    // =========================================================================

    async fn create_recipe(
        ctx: &GraphQLContext,
        cat_id: ID,
        title: String,
        description: Option<String>,
        is_public: Option<bool>,
    ) -> ApiResult<CreateRecipePayload> {
        info!(caller = ?ctx.caller, category_id = %*cat_id, "createRecipe");
        let category_id = parse_id(&cat_id, recipe_actions::INVALID_CATEGORY_REF)?;
        let recipe = recipe_actions::create_recipe(
            NewRecipe {
                category_id,
                title,
                description,
                is_public,
            },
            &ctx.caller,
            ctx.deps(),
        )
        .await?;
        Ok(CreateRecipePayload {
            recipe: recipe.into(),
        })
    }

    async fn update_recipe(
        ctx: &GraphQLContext,
        id: ID,
        title: Option<String>,
        description: Option<String>,
        is_public: Option<bool>,
    ) -> ApiResult<UpdateRecipePayload> {
        info!(caller = ?ctx.caller, recipe_id = %*id, "updateRecipe");
        let id = parse_id(&id, recipe_actions::INVALID_RECIPE_ID)?;
        let recipe = recipe_actions::update_recipe(
            id,
            UpdateRecipe {
                title,
                description,
                is_public,
            },
            &ctx.caller,
            ctx.deps(),
        )
        .await?;
        Ok(UpdateRecipePayload {
            recipe: recipe.into(),
        })
    }

    /// Deletes the recipe with its ingredients and votes.
    async fn delete_recipe(ctx: &GraphQLContext, id: ID) -> ApiResult<DeleteRecipePayload> {
        info!(caller = ?ctx.caller, recipe_id = %*id, "deleteRecipe");
        let recipe_id = parse_id(&id, recipe_actions::INVALID_RECIPE_ID)?;
        let deleted = recipe_actions::delete_recipe(recipe_id, &ctx.caller, ctx.deps()).await?;
        Ok(DeleteRecipePayload {
            recipe_id: ID::new(deleted.to_string()),
        })
    }

    // =========================================================================
    // Ingredient & Vote Mutations
    // =========================================================================

    async fn create_ingredient(
        ctx: &GraphQLContext,
        recipe_id: ID,
        name: String,
        amount: f64,
        instruction_notes: Option<String>,
    ) -> ApiResult<CreateIngredientPayload> {
        info!(caller = ?ctx.caller, recipe_id = %*recipe_id, "createIngredient");
        let recipe_id = parse_id(&recipe_id, ingredient_actions::INVALID_RECIPE_REF)?;
        let ingredient = ingredient_actions::create_ingredient(
            NewIngredient {
                recipe_id,
                name,
                amount,
                instruction_notes,
            },
            &ctx.caller,
            ctx.deps(),
        )
        .await?;
        Ok(CreateIngredientPayload {
            ingredient: ingredient.into(),
        })
    }

    async fn create_recipe_vote(
        ctx: &GraphQLContext,
        recipe_id: ID,
    ) -> ApiResult<CreateRecipeVotePayload> {
        info!(caller = ?ctx.caller, recipe_id = %*recipe_id, "createRecipeVote");
        let recipe_id = parse_id(&recipe_id, recipe_actions::INVALID_RECIPE_ID)?;
        let cast = vote_actions::create_recipe_vote(recipe_id, &ctx.caller, ctx.deps()).await?;
        Ok(CreateRecipeVotePayload {
            user: cast.user.into(),
            recipe: cast.recipe.into(),
            vote: cast.vote.into(),
        })
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
