//! Auth domain - credential checks and JWT session tokens
//!
//! Responsibilities:
//! - Password hashing (argon2id)
//! - Token issue, verification and refresh
//! - Mapping token failures onto API errors

pub mod actions;
pub mod data;
pub mod jwt;
pub mod password;

pub use data::{RefreshTokenPayload, TokenAuthPayload, TokenPayloadData, VerifyTokenPayload};
pub use jwt::{Claims, IssuedToken, JwtService, TokenError};
pub use password::PasswordHasher;
