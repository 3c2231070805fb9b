//! Text extraction: turns an uploaded document into plain text.
//!
//! Decoding backends sit behind `DocumentDecoder` so they can be swapped or
//! mocked. `TextExtractor` never fails: any decoder error (or panic) is logged
//! and degrades to empty text so the rest of the pipeline still produces a
//! complete report.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document is empty")]
    Empty,

    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("text is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("no decoder for media type '{0}'")]
    Unsupported(String),

    #[error("decoder task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    PlainText,
    Other(String),
}

impl MediaType {
    /// Resolves the media type of an upload: declared content type first,
    /// then file extension, then the `%PDF-` magic prefix.
    pub fn detect(declared: Option<&str>, file_name: Option<&str>, bytes: &[u8]) -> Self {
        if let Some(media) = declared.and_then(Self::from_mime) {
            return media;
        }
        if let Some(media) = file_name.and_then(Self::from_file_name) {
            return media;
        }
        if bytes.starts_with(PDF_MAGIC) {
            return MediaType::Pdf;
        }
        MediaType::Other(declared.unwrap_or("application/octet-stream").to_string())
    }

    fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "application/pdf" | "application/x-pdf" => Some(MediaType::Pdf),
            "text/plain" => Some(MediaType::PlainText),
            _ => None,
        }
    }

    fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(MediaType::Pdf),
            "txt" | "text" => Some(MediaType::PlainText),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::PlainText => "text/plain",
            MediaType::Other(mime) => mime,
        }
    }
}

/// An uploaded document as handed over by the transport layer.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub media_type: MediaType,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Bytes>, media_type: MediaType) -> Self {
        Self {
            bytes: bytes.into(),
            media_type,
        }
    }
}

/// Plain text recovered from a document. `extracted == false` means decoding
/// failed and `text` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub extracted: bool,
}

impl ExtractedText {
    pub fn failed() -> Self {
        Self::default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Decoder backends
// ────────────────────────────────────────────────────────────────────────────

pub trait DocumentDecoder: Send + Sync {
    fn supports(&self, media_type: &MediaType) -> bool;
    fn decode(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// PDF decoding via the pdf-extract crate (digital PDFs with a text layer).
pub struct PdfDecoder;

impl DocumentDecoder for PdfDecoder {
    fn supports(&self, media_type: &MediaType) -> bool {
        *media_type == MediaType::Pdf
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
    }
}

pub struct PlainTextDecoder;

impl DocumentDecoder for PlainTextDecoder {
    fn supports(&self, media_type: &MediaType) -> bool {
        *media_type == MediaType::PlainText
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        Ok(std::str::from_utf8(bytes)?.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extractor
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct TextExtractor {
    decoders: Vec<Arc<dyn DocumentDecoder>>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(vec![Arc::new(PdfDecoder), Arc::new(PlainTextDecoder)])
    }
}

impl TextExtractor {
    pub fn new(decoders: Vec<Arc<dyn DocumentDecoder>>) -> Self {
        Self { decoders }
    }

    /// Extracts text from `document`. Decoding runs on the blocking pool;
    /// every failure is logged and returned as empty text.
    pub async fn extract(&self, document: &RawDocument) -> ExtractedText {
        let media_type = document.media_type.as_str().to_string();
        match self.try_extract(document).await {
            Ok(text) => {
                debug!(media_type = %media_type, chars = text.len(), "Document text extracted");
                ExtractedText {
                    text,
                    extracted: true,
                }
            }
            Err(e) => {
                warn!(media_type = %media_type, "Text extraction failed: {e}");
                ExtractedText::failed()
            }
        }
    }

    async fn try_extract(&self, document: &RawDocument) -> Result<String, ExtractionError> {
        if document.bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }

        let decoder = self
            .decoders
            .iter()
            .find(|d| d.supports(&document.media_type))
            .cloned()
            .ok_or_else(|| ExtractionError::Unsupported(document.media_type.as_str().to_string()))?;

        let bytes = document.bytes.clone();
        tokio::task::spawn_blocking(move || decoder.decode(&bytes))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDecoder(&'static str);

    impl DocumentDecoder for FixedDecoder {
        fn supports(&self, media_type: &MediaType) -> bool {
            *media_type == MediaType::Pdf
        }

        fn decode(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingDecoder;

    impl DocumentDecoder for FailingDecoder {
        fn supports(&self, _media_type: &MediaType) -> bool {
            true
        }

        fn decode(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
            Err(ExtractionError::Pdf("corrupt xref table".to_string()))
        }
    }

    struct PanickingDecoder;

    impl DocumentDecoder for PanickingDecoder {
        fn supports(&self, _media_type: &MediaType) -> bool {
            true
        }

        fn decode(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
            panic!("font table overflow")
        }
    }

    fn pdf_doc(bytes: &'static [u8]) -> RawDocument {
        RawDocument::new(bytes, MediaType::Pdf)
    }

    #[test]
    fn test_detect_prefers_declared_mime() {
        let media = MediaType::detect(Some("application/pdf"), Some("resume.txt"), b"hello");
        assert_eq!(media, MediaType::Pdf);
    }

    #[test]
    fn test_detect_mime_with_parameters() {
        let media = MediaType::detect(Some("Text/Plain; charset=utf-8"), None, b"");
        assert_eq!(media, MediaType::PlainText);
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        let media = MediaType::detect(Some("application/octet-stream"), Some("CV.PDF"), b"");
        assert_eq!(media, MediaType::Pdf);
        let media = MediaType::detect(None, Some("notes.txt"), b"");
        assert_eq!(media, MediaType::PlainText);
    }

    #[test]
    fn test_detect_sniffs_pdf_magic() {
        let media = MediaType::detect(None, Some("upload"), b"%PDF-1.7\n...");
        assert_eq!(media, MediaType::Pdf);
    }

    #[test]
    fn test_detect_unknown_keeps_declared_type() {
        let media = MediaType::detect(Some("image/png"), Some("photo.png"), b"\x89PNG");
        assert_eq!(media, MediaType::Other("image/png".to_string()));
    }

    #[test]
    fn test_plain_text_decoder_strips_bom() {
        let text = PlainTextDecoder.decode(b"\xEF\xBB\xBFName: Ada").unwrap();
        assert_eq!(text, "Name: Ada");
    }

    #[test]
    fn test_plain_text_decoder_rejects_invalid_utf8() {
        assert!(matches!(
            PlainTextDecoder.decode(&[0x66, 0xff, 0xfe]),
            Err(ExtractionError::Encoding(_))
        ));
    }

    #[test]
    fn test_pdf_decoder_rejects_garbage() {
        assert!(PdfDecoder.decode(b"not a pdf").is_err());
    }

    #[tokio::test]
    async fn test_extract_uses_matching_decoder() {
        let extractor = TextExtractor::new(vec![Arc::new(FixedDecoder("Skills: rust"))]);
        let out = extractor.extract(&pdf_doc(b"%PDF-1.4")).await;
        assert!(out.extracted);
        assert_eq!(out.text, "Skills: rust");
    }

    #[tokio::test]
    async fn test_extract_empty_document_degrades() {
        let extractor = TextExtractor::new(vec![Arc::new(FixedDecoder("unused"))]);
        let out = extractor.extract(&pdf_doc(b"")).await;
        assert_eq!(out, ExtractedText::failed());
    }

    #[tokio::test]
    async fn test_extract_decoder_error_degrades() {
        let extractor = TextExtractor::new(vec![Arc::new(FailingDecoder)]);
        let out = extractor.extract(&pdf_doc(b"%PDF-broken")).await;
        assert!(!out.extracted);
        assert!(out.text.is_empty());
    }

    #[tokio::test]
    async fn test_extract_decoder_panic_degrades() {
        let extractor = TextExtractor::new(vec![Arc::new(PanickingDecoder)]);
        let out = extractor.extract(&pdf_doc(b"%PDF-1.4")).await;
        assert_eq!(out, ExtractedText::failed());
    }

    #[tokio::test]
    async fn test_extract_unsupported_media_degrades() {
        let extractor = TextExtractor::default();
        let doc = RawDocument::new(&b"\x89PNG"[..], MediaType::Other("image/png".to_string()));
        let out = extractor.extract(&doc).await;
        assert_eq!(out, ExtractedText::failed());
    }

    #[tokio::test]
    async fn test_default_extractor_reads_plain_text() {
        let doc = RawDocument::new(&b"Email: ada@example.com"[..], MediaType::PlainText);
        let out = TextExtractor::default().extract(&doc).await;
        assert!(out.extracted);
        assert_eq!(out.text, "Email: ada@example.com");
    }

    #[tokio::test]
    async fn test_default_extractor_corrupt_pdf_degrades() {
        let doc = pdf_doc(b"%PDF-1.4 this is not really a pdf");
        let out = TextExtractor::default().extract(&doc).await;
        assert_eq!(out, ExtractedText::failed());
    }
}
