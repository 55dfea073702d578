mod configure;
mod tracing;
mod vigil_service;

pub use configure::{configure_postgresql, configure_redis, get_redis_client};
pub use vigil_service::VigilService;
