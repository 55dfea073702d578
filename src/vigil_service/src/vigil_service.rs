use axum::Router;
use axum::routing::get_service;
use tokio::net::TcpListener;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use vigil_adapters::SessionManager;
use vigil_axum::{AppState, RevalidationPolicy};
use vigil_core::{AccountStore, CredentialHasher, RevokedSessionStore};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The composed account service: API routes, revalidation middleware, the
/// static form pages, and request tracing.
pub struct VigilService {
    router: Router,
}

impl VigilService {
    /// Wire the service together from its injected collaborators.
    ///
    /// Stores implement `Clone` via internal shared handles, so the routes
    /// and the middleware can each hold the same state cheaply.
    pub fn new<S, R, H>(
        accounts: S,
        hasher: H,
        sessions: SessionManager<R>,
        policy: RevalidationPolicy,
        assets_dir: String,
    ) -> Self
    where
        S: AccountStore + Clone + 'static,
        R: RevokedSessionStore + Clone + 'static,
        H: CredentialHasher + Clone + 'static,
    {
        let state = AppState {
            accounts,
            hasher,
            sessions,
            policy,
        };

        let router = vigil_axum::router(state)
            // The login and registration forms are static pages on the same
            // paths their POST handlers live on.
            .route(
                "/account/login",
                get_service(ServeFile::new(format!("{assets_dir}/login.html"))),
            )
            .route(
                "/account/register",
                get_service(ServeFile::new(format!("{assets_dir}/register.html"))),
            )
            .nest_service("/assets", ServeDir::new(assets_dir.clone()))
            .fallback_service(ServeFile::new(format!("{assets_dir}/index.html")));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// The finished router, for embedding or for driving in tests.
    pub fn into_router(self) -> Router {
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server.
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.into_router();

        ::tracing::info!("vigil listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
