mod mock_backend;
mod ollama_client;

pub use mock_backend::MockInferenceBackend;
pub use ollama_client::OllamaClient;
