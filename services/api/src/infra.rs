use labelscan::analysis::ocr::{OcrError, TextExtractor};
use labelscan::lexicon::LexiconStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::process::Command;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<LexiconStore>,
    pub(crate) extractor: Arc<dyn TextExtractor>,
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shells out to the `tesseract` CLI, the same engine the service has
/// always used for label photos. Any other `TextExtractor` impl can be
/// swapped in without touching the routes.
pub(crate) struct TesseractCli {
    binary: String,
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
        }
    }
}

impl TextExtractor for TesseractCli {
    fn extract_text(&self, image: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .output()?;

        if !output.status.success() {
            return Err(OcrError::Backend(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
