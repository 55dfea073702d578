pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    ApplicationSettings, GuardSettings, PostgresSettings, RedisSettings, SessionSettings, Settings,
};
