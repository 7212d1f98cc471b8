//! Caller identity and ownership checks.
//!
//! Every engine action receives the caller explicitly:
//!
//! ```rust,ignore
//! let owner_id = caller.require_user()?;
//! caller.require_owner(recipe.owner_id, "You are not permitted to update this recipe")?;
//! ```

mod caller;

pub use caller::Caller;
