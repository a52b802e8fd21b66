use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mongodb_uri: String,
    pub database: String,
    pub upload_dir: String,
}

impl Config {
    /// Reads configuration from the environment. The connection string is
    /// the only required variable.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(3000),
            mongodb_uri: env::var("MONGODB_URI").expect("MONGODB_URI must be set"),
            database: env::var("MONGODB_DB").unwrap_or_else(|_| "ctf-blog".to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
        }
    }
}
