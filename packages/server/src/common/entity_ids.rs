//! Typed ID definitions for all domain entities.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for registered users.
pub struct User;

/// Marker type for recipe categories.
pub struct Category;

/// Marker type for recipes.
pub struct Recipe;

/// Marker type for recipe ingredients.
pub struct Ingredient;

/// Marker type for recipe votes.
pub struct RecipeVote;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type UserId = Id<User>;

pub type CategoryId = Id<Category>;

pub type RecipeId = Id<Recipe>;

pub type IngredientId = Id<Ingredient>;

pub type RecipeVoteId = Id<RecipeVote>;
