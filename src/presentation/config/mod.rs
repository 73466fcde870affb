mod settings;

pub use settings::{
    BackendSettings, ChunkingSettings, LoggingSettings, ServerSettings, Settings, StorageSettings,
};
