//! Report file ingestion
//!
//! Turns an uploaded file into the text sent for scoring. Plain-text
//! and CSV content passes through verbatim. PDF content is never
//! parsed: a fixed instructional placeholder naming the file is
//! substituted instead, a known limitation carried over deliberately.
//! Anything else is rejected before any network call happens.

use crate::error::{EsgError, Result};

/// Upload cap. The UI advertises 10MB; the server enforces it.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Text,
    Csv,
    Pdf,
}

impl UploadKind {
    /// Classify by file extension, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())?;
        match ext.as_str() {
            "txt" => Some(UploadKind::Text),
            "csv" => Some(UploadKind::Csv),
            "pdf" => Some(UploadKind::Pdf),
            _ => None,
        }
    }
}

fn pdf_placeholder(name: &str) -> String {
    format!(
        "[Extracting Document: {name}]\n\n\
         Please perform a full summarization and ESG scoring of the provided document content. \
         Based on the industry standards for {name}, evaluate Environmental impact, \
         Social responsibility, and Governance transparency."
    )
}

/// Produce the text to score from an uploaded file, enforcing the
/// type whitelist and size cap.
pub fn extract_text(name: &str, bytes: &[u8], max_bytes: usize) -> Result<String> {
    let kind =
        UploadKind::from_name(name).ok_or_else(|| EsgError::UnsupportedFile(name.to_string()))?;

    if bytes.len() > max_bytes {
        return Err(EsgError::UploadTooLarge {
            limit: max_bytes,
            actual: bytes.len(),
        });
    }

    let text = match kind {
        UploadKind::Text | UploadKind::Csv => String::from_utf8_lossy(bytes).into_owned(),
        UploadKind::Pdf => pdf_placeholder(name),
    };

    if text.trim().is_empty() {
        return Err(EsgError::EmptyInput("file content"));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(UploadKind::from_name("report.txt"), Some(UploadKind::Text));
        assert_eq!(UploadKind::from_name("data.CSV"), Some(UploadKind::Csv));
        assert_eq!(UploadKind::from_name("annual.Pdf"), Some(UploadKind::Pdf));
        assert_eq!(UploadKind::from_name("report.docx"), None);
        assert_eq!(UploadKind::from_name("no_extension"), None);
    }

    #[test]
    fn test_text_and_csv_are_verbatim() {
        let content = "year,emissions\n2023,410\n2024,395\n";
        let extracted = extract_text("metrics.csv", content.as_bytes(), MAX_UPLOAD_BYTES).unwrap();
        assert_eq!(extracted, content);

        let content = "Our company reduced scope 1 emissions by 12%.";
        let extracted = extract_text("report.txt", content.as_bytes(), MAX_UPLOAD_BYTES).unwrap();
        assert_eq!(extracted, content);
    }

    #[test]
    fn test_pdf_substitutes_placeholder() {
        let extracted =
            extract_text("annual-2024.pdf", b"%PDF-1.7 binary junk", MAX_UPLOAD_BYTES).unwrap();
        assert!(extracted.starts_with("[Extracting Document: annual-2024.pdf]"));
        assert!(extracted.contains("Governance transparency"));
        // The raw bytes never make it into the prompt.
        assert!(!extracted.contains("binary junk"));
    }

    #[test]
    fn test_unsupported_type_rejected() {
        let err = extract_text("report.docx", b"whatever", MAX_UPLOAD_BYTES).unwrap_err();
        assert!(matches!(err, EsgError::UnsupportedFile(_)));
    }

    #[test]
    fn test_size_cap_enforced() {
        let big = vec![b'a'; 32];
        let err = extract_text("report.txt", &big, 16).unwrap_err();
        assert!(matches!(
            err,
            EsgError::UploadTooLarge {
                limit: 16,
                actual: 32
            }
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = extract_text("report.txt", b"  \n ", MAX_UPLOAD_BYTES).unwrap_err();
        assert!(matches!(err, EsgError::EmptyInput(_)));
    }
}
