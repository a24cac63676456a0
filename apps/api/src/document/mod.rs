//! Document → text conversion: the `TextExtractor` port and its default
//! implementation.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod docx;
pub mod pdf;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractError {
    #[error("Unsupported file type '{0}'. Supported types: pdf, docx, doc")]
    UnsupportedFormat(String),

    #[error("Could not decode {format} document: {message}")]
    Decode {
        format: DocumentFormat,
        message: String,
    },
}

impl ExtractError {
    pub fn decode(format: DocumentFormat, message: impl Into<String>) -> Self {
        ExtractError::Decode {
            format,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
}

impl DocumentFormat {
    /// Derives the format from a file name's extension.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or_default();
        extension.parse()
    }
}

impl FromStr for DocumentFormat {
    type Err = ExtractError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "doc" => Ok(DocumentFormat::Doc),
            _ => Err(ExtractError::UnsupportedFormat(tag.to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
        };
        f.write_str(tag)
    }
}

/// Uploaded document bytes plus their declared format. Consumed by one
/// pipeline run.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub format: DocumentFormat,
}

/// Converts document bytes to plain text. CPU-bound; callers run it on a
/// blocking thread.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError>;
}

/// PDF via `pdf-extract`; DOCX and DOC via the OOXML body part.
///
/// Legacy binary `.doc` files are not OOXML and fail with `Decode`; `.doc`
/// uploads that are really DOCX (a common mislabel) are read normally.
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
        match format {
            DocumentFormat::Pdf => pdf::extract_pdf_text(bytes),
            DocumentFormat::Docx | DocumentFormat::Doc => docx::extract_docx_text(bytes, format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags_parse_case_insensitively() {
        assert_eq!("PDF".parse::<DocumentFormat>(), Ok(DocumentFormat::Pdf));
        assert_eq!("docx".parse::<DocumentFormat>(), Ok(DocumentFormat::Docx));
        assert_eq!(" Doc ".parse::<DocumentFormat>(), Ok(DocumentFormat::Doc));
    }

    #[test]
    fn test_unknown_tag_is_unsupported() {
        assert_eq!(
            "txt".parse::<DocumentFormat>(),
            Err(ExtractError::UnsupportedFormat("txt".to_string()))
        );
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(
            DocumentFormat::from_filename("jane.doe.CV.Pdf"),
            Ok(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_filename("resume"),
            Err(ExtractError::UnsupportedFormat(String::new()))
        );
        assert!(DocumentFormat::from_filename("resume.odt").is_err());
    }

    #[test]
    fn test_format_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&DocumentFormat::Docx).unwrap(), "\"docx\"");
        assert_eq!(DocumentFormat::Doc.to_string(), "doc");
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let extractor = DocumentTextExtractor;
        for format in [DocumentFormat::Pdf, DocumentFormat::Docx, DocumentFormat::Doc] {
            let result = extractor.extract(b"definitely not a document", format);
            assert!(
                matches!(result, Err(ExtractError::Decode { format: f, .. }) if f == format),
                "expected decode error for {format}"
            );
        }
    }
}
