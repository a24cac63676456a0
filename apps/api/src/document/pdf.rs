use crate::document::{DocumentFormat, ExtractError};

pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::decode(DocumentFormat::Pdf, e.to_string()))
}
