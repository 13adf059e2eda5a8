//! Auth domain - issues and verifies the bearer tokens that identify actors
//!
//! Responsibilities:
//! - JWT creation for a member id and role
//! - JWT verification (signature, issuer, expiry)

pub mod jwt;

pub use jwt::{Claims, JwtService};
