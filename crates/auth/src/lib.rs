//! `aviary-auth`: bearer token boundary.
//!
//! Turns a bearer token string into a verified caller identity. Knows nothing
//! about HTTP or storage.

pub mod claims;
pub mod jwt;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtValidator, TokenError, sign_hs256};
