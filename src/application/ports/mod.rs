mod file_registry;
mod inference_backend;
mod text_extractor;
mod text_splitter;

pub use file_registry::{FileRegistry, RegistryError};
pub use inference_backend::{
    InferenceBackend, InferenceError, InferenceFrame, InferenceFrameStream,
};
pub use text_extractor::{ExtractionError, TextExtractor};
pub use text_splitter::{TextSplitter, TextSplitterError};
