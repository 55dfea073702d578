use vigil_adapters::SessionManager;

/// Shared state for the routes and the revalidation middleware.
///
/// Everything the request path needs is injected here; there are no ambient
/// globals. Stores are `Clone` via internal `Arc`s (or a connection pool), so
/// cloning the state per request is cheap.
#[derive(Clone)]
pub struct AppState<S, R, H> {
    pub accounts: S,
    pub hasher: H,
    pub sessions: SessionManager<R>,
    pub policy: RevalidationPolicy,
}

/// Which paths skip revalidation, and where revoked sessions get sent.
///
/// The exempt set exists solely to break the redirect loop a signed-out or
/// just-blocked user would otherwise enter: guarded page redirects to login,
/// login would redirect again. It is an explicit prefix list, never inferred
/// from the route table.
#[derive(Debug, Clone)]
pub struct RevalidationPolicy {
    exempt_prefixes: Vec<String>,
    login_path: String,
}

impl RevalidationPolicy {
    pub fn new(exempt_prefixes: Vec<String>, login_path: String) -> Self {
        Self {
            exempt_prefixes,
            login_path,
        }
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }
}

impl Default for RevalidationPolicy {
    fn default() -> Self {
        Self {
            exempt_prefixes: vec![
                "/account/login".to_string(),
                "/account/register".to_string(),
                "/assets".to_string(),
            ],
            login_path: "/account/login".to_string(),
        }
    }
}
