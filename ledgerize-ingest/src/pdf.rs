//! PDF statement text extraction.
//!
//! Page texts are joined in page order with nothing in between; the
//! statement parsers rely on that when a transaction straddles a page break.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use ledgerize_core::IngestError;

/// Receives page progress while a document is being extracted.
pub trait PageObserver {
    fn on_page(&mut self, index: usize, total: usize);
}

/// Logs page progress at debug level.
#[derive(Debug, Default)]
pub struct TracingProgress;

impl PageObserver for TracingProgress {
    fn on_page(&mut self, index: usize, total: usize) {
        tracing::debug!(page = index + 1, total, "extracted page");
    }
}

impl<F: FnMut(usize, usize)> PageObserver for F {
    fn on_page(&mut self, index: usize, total: usize) {
        self(index, total)
    }
}

pub fn concat_pages<I>(pages: I, observer: &mut dyn PageObserver) -> String
where
    I: IntoIterator<Item = String>,
    I::IntoIter: ExactSizeIterator,
{
    let pages = pages.into_iter();
    let total = pages.len();
    let mut text = String::new();
    for (i, page) in pages.enumerate() {
        text.push_str(&page);
        observer.on_page(i, total);
    }
    text
}

/// Extract the full text of the PDF at `path`.
pub fn extract_text(path: &Path, observer: &mut dyn PageObserver) -> Result<String, IngestError> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::DocumentRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    extract_text_from_bytes(path, &bytes, observer)
}

pub fn extract_text_from_bytes(
    path: &Path,
    bytes: &[u8],
    observer: &mut dyn PageObserver,
) -> Result<String, IngestError> {
    let read_error = |reason: String| IngestError::DocumentRead {
        path: path.to_path_buf(),
        reason,
    };

    // pdf-extract panics on some malformed documents instead of returning an error.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| read_error("pdf parser panicked".to_string()))?
    .map_err(|e| read_error(e.to_string()))?;

    Ok(concat_pages(pages, observer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_joined_without_separator() {
        let mut seen = Vec::new();
        let mut observer = |i: usize, total: usize| seen.push((i, total));
        let text = concat_pages(
            vec!["01/02 A 1.00".to_string(), "\n01/03 B 2.00".to_string(), "end".to_string()],
            &mut observer,
        );
        assert_eq!(text, "01/02 A 1.00\n01/03 B 2.00end");
        assert_eq!(seen, vec![(0, 3), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_garbage_bytes_are_a_read_error() {
        let err = extract_text_from_bytes(
            Path::new("broken.pdf"),
            b"this is not a pdf",
            &mut TracingProgress,
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::DocumentRead { .. }));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = extract_text(Path::new("/nonexistent/WFCC.pdf"), &mut TracingProgress).unwrap_err();
        assert!(matches!(err, IngestError::DocumentRead { .. }));
    }
}
