use std::path::Path;

use async_trait::async_trait;
use calamine::{open_workbook_auto, Reader};

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::{Document, DocumentKind};

/// Renders every sheet of a workbook as a text block prefixed with the sheet
/// name; sheets keep workbook order and are separated by blank lines.
#[derive(Default)]
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(path: &Path) -> Result<String, ExtractionError> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| ExtractionError::Unreadable(format!("failed to open workbook: {e}")))?;

        let sheet_names = workbook.sheet_names().to_owned();
        let mut blocks = Vec::with_capacity(sheet_names.len());

        for name in sheet_names {
            let range = match workbook.worksheet_range(&name) {
                Ok(range) => range,
                Err(e) => {
                    tracing::debug!(sheet = %name, error = %e, "Skipping unreadable sheet");
                    continue;
                }
            };

            let mut block = format!("Sheet: {name}\n");
            for row in range.rows() {
                let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
                block.push_str(&cells.join("\t"));
                block.push('\n');
            }
            blocks.push(block.trim_end().to_string());
        }

        if blocks.is_empty() {
            return Err(ExtractionError::Unreadable(
                "workbook contains no readable sheets".to_string(),
            ));
        }

        Ok(blocks.join("\n\n"))
    }
}

#[async_trait]
impl TextExtractor for SpreadsheetExtractor {
    #[tracing::instrument(skip(self, document), fields(filename = %document.filename))]
    async fn extract(
        &self,
        path: &Path,
        document: &Document,
    ) -> Result<String, ExtractionError> {
        if document.kind != DocumentKind::Spreadsheet {
            return Err(ExtractionError::UnsupportedFileType(
                document.kind.as_str().to_string(),
            ));
        }

        let path = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || Self::extract_blocking(&path))
            .await
            .map_err(|e| ExtractionError::Io(format!("task join error: {e}")))??;

        tracing::info!(chars = text.len(), "Spreadsheet text extraction complete");
        Ok(text)
    }
}
