pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "VIGIL__POSTGRES__URL";
    pub const REDIS_HOST_NAME_ENV_VAR: &str = "VIGIL__REDIS__HOST_NAME";
    pub const SESSION_SECRET_ENV_VAR: &str = "VIGIL__SESSION__SECRET";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const ASSETS_DIR: &str = "assets";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
