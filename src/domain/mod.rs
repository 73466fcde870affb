mod analysis;
mod chat;
mod chunk;
mod document;
mod owner;
mod uploaded_file;

pub use analysis::{AnalysisPoint, DocumentAnalysis, NO_ANALYSIS_AVAILABLE};
pub use chat::{ChatFrame, ChatTurn};
pub use chunk::Chunk;
pub use document::{Document, DocumentKind};
pub use owner::OwnerId;
pub use uploaded_file::UploadedFileRecord;
