/// Key findings the backend produced for one chunk, tagged with the chunk's
/// ordinal.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPoint {
    pub section: usize,
    pub text: String,
}

impl AnalysisPoint {
    pub fn new(section: usize, text: String) -> Self {
        Self { section, text }
    }

    pub fn render(&self) -> String {
        format!("Section {}:\n{}", self.section, self.text)
    }
}

/// The outcome of one successful analysis pass over a document. Produced
/// exactly once per invocation, used to build a reply, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
    pub chunks_processed: usize,
    pub summary: String,
    pub points: Vec<AnalysisPoint>,
}

/// Summary used when extraction and chunking succeeded but the backend never
/// produced a usable point.
pub const NO_ANALYSIS_AVAILABLE: &str = "No analysis available";
