//! Auth types shared across Campus crates.
//!
//! Provides the identity-token service, the `BearerToken` extractor, and the
//! session cookie builder.

pub mod bearer;
pub mod cookie;
pub mod token;
