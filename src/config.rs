use std::path::PathBuf;

const DEFAULT_DATABASE_URL: &str = "sqlite:data/cahier.db";
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_HTTP_PORT: u16 = 5000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Server settings, read from the environment.
///
/// | Variable | Default |
/// |----------|---------|
/// | DATABASE_URL | sqlite:data/cahier.db |
/// | UPLOADS_DIR | uploads |
/// | HTTP_PORT | 5000 |
/// | MAX_UPLOAD_BYTES | 26214400 |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub uploads_dir: PathBuf,
    pub http_port: u16,
    /// Request body limit for the note routes, which carry attachments.
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            http_port: DEFAULT_HTTP_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            uploads_dir: lookup("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.uploads_dir),
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
        }
    }
}
