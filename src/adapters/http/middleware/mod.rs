//! HTTP middleware for axum.
//!
//! - `auth` - Admin bearer-token middleware and extractor

pub mod auth;

pub use auth::{
    admin_auth_middleware, bearer_token, AdminAuthRejection, AdminAuthState, RequireAdmin,
};
