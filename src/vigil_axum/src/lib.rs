//! Axum surface for the vigil account service.
//!
//! Routes carry no policy of their own: credential and lifecycle decisions
//! live in `vigil_application`, session mechanics in `vigil_adapters`. What
//! this crate adds is the HTTP mapping and the revalidation middleware that
//! re-checks every guarded request against the account store.

pub mod extract;
pub mod revalidate;
pub mod routes;
pub mod state;

pub use extract::CurrentAccount;
pub use revalidate::revalidate;
pub use state::{AppState, RevalidationPolicy};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use vigil_core::{AccountStore, CredentialHasher, RevokedSessionStore};

/// The account and admin routes, wrapped in the revalidation middleware.
///
/// Static pages and asset serving are left to the caller; everything routed
/// here passes through [`revalidate`] first.
pub fn router<S, R, H>(state: AppState<S, R, H>) -> Router
where
    S: AccountStore + Clone + 'static,
    R: RevokedSessionStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    Router::new()
        .route("/account/register", post(routes::register::<S, R, H>))
        .route("/account/login", post(routes::login::<S, R, H>))
        .route("/account/logout", post(routes::logout::<S, R, H>))
        .route("/admin", get(routes::admin_index::<S, R, H>))
        .route("/admin/bulk-action", post(routes::bulk_action::<S, R, H>))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            revalidate::<S, R, H>,
        ))
        .with_state(state)
}
