use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("failed to read uploaded image: {0}")]
    Io(#[from] std::io::Error),
    #[error("text extraction failed: {0}")]
    Backend(String),
}

/// Seam for the external "image to raw text" collaborator. The engine
/// itself never touches image data; the service hands extracted text to
/// [`super::AnalysisInput::FreeText`].
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, image: &Path) -> Result<String, OcrError>;
}
