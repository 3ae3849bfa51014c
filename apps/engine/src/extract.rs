//! Resume text extraction from uploaded files.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String>;
}

pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        // pdf-extract is synchronous and CPU-bound.
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .context("PDF extraction task panicked")?
            .map_err(|e| anyhow::anyhow!("Failed to extract text from PDF {}: {e}", path.display()))?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {} as UTF-8 text", path.display()))
    }
}

/// Picks an extractor by file extension. Anything that is not `.pdf` is plain text.
pub fn extractor_for(path: &Path) -> Box<dyn TextExtractor> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        Box::new(PdfTextExtractor)
    } else {
        Box::new(PlainTextExtractor)
    }
}

/// Extracts and trims the text of `path`. May return an empty string.
pub async fn extract_text(path: &Path) -> Result<String> {
    let text = extractor_for(path).extract(path).await?;
    let trimmed = text.trim().to_string();
    debug!("Extracted {} chars from {}", trimmed.len(), path.display());
    Ok(trimmed)
}
