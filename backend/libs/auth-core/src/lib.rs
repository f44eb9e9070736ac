//! Shared authentication primitives for Lumina services
//!
//! Token issuance lives with the identity provider; services in this
//! workspace only need validation plus a test-time signing path.

pub mod jwt;
