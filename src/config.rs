use tracing::warn;

pub const STORE_URL_VAR: &str = "PETOGRAM_STORE_URL";
pub const SERVICE_ROLE_KEY_VAR: &str = "PETOGRAM_SERVICE_ROLE_KEY";
pub const ALLOW_ORIGIN_VAR: &str = "PETOGRAM_ALLOW_ORIGIN";
pub const BIND_ADDR_VAR: &str = "PETOGRAM_BIND_ADDR";

pub const DEFAULT_ALLOW_ORIGIN: &str = "*";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SQLITE_LABEL: &str = "default";

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Settings handed to every handler. Built once at the entry point and
/// passed down, never read from the environment inside a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_url: String,
    pub service_role_key: String,
    pub allow_origin: String,
}

impl Config {
    /// Reads the component environment. Missing values become empty
    /// strings so that a misconfigured deployment fails at the store, not here.
    pub fn from_env() -> Self {
        Self::from_env_or("", "")
    }

    /// Like [`Config::from_env`] but with caller supplied fallbacks for the
    /// store, used by the native server to default to the memory backend.
    pub fn from_env_or(store_url: &str, service_role_key: &str) -> Self {
        Self {
            store_url: var_or(STORE_URL_VAR, store_url),
            service_role_key: var_or(SERVICE_ROLE_KEY_VAR, service_role_key),
            allow_origin: var_or(ALLOW_ORIGIN_VAR, DEFAULT_ALLOW_ORIGIN),
        }
    }

    pub fn new(store_url: impl Into<String>, service_role_key: impl Into<String>) -> Self {
        Self {
            store_url: store_url.into(),
            service_role_key: service_role_key.into(),
            allow_origin: DEFAULT_ALLOW_ORIGIN.to_string(),
        }
    }
}

pub fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        warn!("{key} not set, using {default:?}");
        default.to_string()
    })
}

pub fn bind_addr() -> String {
    var_or(BIND_ADDR_VAR, DEFAULT_BIND_ADDR)
}
