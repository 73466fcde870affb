#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub kind: DocumentKind,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Pdf,
    Spreadsheet,
}

impl DocumentKind {
    /// Classify a filename by its extension. Returns `None` for anything
    /// other than `.pdf`, `.xlsx`, `.xls`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
            Some(Self::Spreadsheet)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Spreadsheet => "Spreadsheet",
        }
    }
}

impl Document {
    pub fn new(filename: String, kind: DocumentKind, size_bytes: u64) -> Self {
        Self {
            filename,
            kind,
            size_bytes,
        }
    }
}
