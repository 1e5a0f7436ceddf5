pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_FRONTEND_URL: &str = "*";
pub const DEFAULT_APP_NAME: &str = "beacon-app-min";

// Environment variable names
pub const CONFIG_FILE_VAR: &str = "BEACON_CONFIG";
pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const FRONTEND_URL_VAR: &str = "FRONTEND_URL";
pub const API_URL_VAR: &str = "API_URL";
pub const PUBLISHABLE_KEY_VAR: &str = "AUTH_PUBLISHABLE_KEY";
pub const APP_NAME_VAR: &str = "APP_NAME";

pub const HEALTH_PATH: &str = "/health";
pub const API_HEALTH_PATH: &str = "/api/health";
