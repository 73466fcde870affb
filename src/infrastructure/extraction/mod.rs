mod composite_extractor;
mod pdf_extractor;
mod spreadsheet_extractor;

pub use composite_extractor::CompositeExtractor;
pub use pdf_extractor::PdfExtractor;
pub use spreadsheet_extractor::SpreadsheetExtractor;
