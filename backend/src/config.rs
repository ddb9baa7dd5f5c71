use std::env;
use std::str::FromStr;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IDENTIFICATION_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_SEGMENTATION_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub identification_model: String,
    pub segmentation_model: String,
    pub port: u16,
    pub frontend_dir: String,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            identification_model: DEFAULT_IDENTIFICATION_MODEL.to_string(),
            segmentation_model: DEFAULT_SEGMENTATION_MODEL.to_string(),
            port: DEFAULT_PORT,
            frontend_dir: default_frontend_dir(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    /// Call `dotenv::dotenv()` first to pick up a local `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            api_key: non_empty("GEMINI_API_KEY"),
            api_base_url: non_empty("GEMINI_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            identification_model: non_empty("GEMINI_IDENTIFICATION_MODEL")
                .unwrap_or(defaults.identification_model),
            segmentation_model: non_empty("GEMINI_SEGMENTATION_MODEL")
                .unwrap_or(defaults.segmentation_model),
            port: parse_or("PORT", non_empty("PORT"), defaults.port),
            frontend_dir: non_empty("FRONTEND_DIR").unwrap_or(defaults.frontend_dir),
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                non_empty("MAX_UPLOAD_BYTES"),
                defaults.max_upload_bytes,
            ),
        }
    }

    pub fn gemini_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid value '{}' for {}, using {}", raw, key, default);
            default
        }),
        None => default,
    }
}

fn default_frontend_dir() -> String {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        format!("{}/../frontend/dist", manifest_dir)
    } else {
        "/usr/src/app/frontend/dist".to_string()
    }
}
