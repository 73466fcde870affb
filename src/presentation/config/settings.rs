use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub chunking: ChunkingSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    pub assistant_name: String,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub model: String,
    pub chat_timeout_secs: u64,
    pub analysis_timeout_secs: u64,
}

impl BackendSettings {
    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct ChunkingSettings {
    pub max_chunk_size: usize,
    pub max_analyzed_chunks: usize,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub upload_dir: PathBuf,
    pub database_url: Option<String>,
    pub max_pool_connections: u32,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub json_format: bool,
}

impl Settings {
    /// Environment-driven configuration with working local defaults.
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: parse_env_or("SERVER_PORT", 5000),
            },
            backend: BackendSettings {
                base_url: env_or("OLLAMA_URL", "http://localhost:11434"),
                model: env_or("OLLAMA_MODEL", "tinyllama"),
                chat_timeout_secs: parse_env_or("CHAT_TIMEOUT_SECS", 30),
                analysis_timeout_secs: parse_env_or("ANALYSIS_TIMEOUT_SECS", 120),
            },
            chunking: ChunkingSettings {
                max_chunk_size: parse_env_or("MAX_CHUNK_SIZE", 400),
                max_analyzed_chunks: parse_env_or("MAX_ANALYZED_CHUNKS", 3),
            },
            storage: StorageSettings {
                upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
                database_url: std::env::var("DATABASE_URL").ok(),
                max_pool_connections: parse_env_or("DATABASE_MAX_CONNECTIONS", 5),
            },
            logging: LoggingSettings {
                json_format: std::env::var("LOG_JSON")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(false),
            },
            assistant_name: env_or("ASSISTANT_NAME", "Tanglin"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
