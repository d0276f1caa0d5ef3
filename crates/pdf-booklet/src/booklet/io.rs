//! Document I/O and request preconditions

use crate::report::BookletRequest;
use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| BookletError::filesystem(&path, e))?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Number of pages in a PDF, without rendering it
pub async fn count_pages(path: impl AsRef<Path>) -> Result<usize> {
    Ok(load_pdf(path).await?.get_pages().len())
}

/// Serialize `doc` and write it to `path`
pub(crate) fn write_pdf(doc: &mut Document, path: &Path) -> Result<()> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)
        .map_err(|e| BookletError::filesystem(path, e))?;
    std::fs::write(path, writer).map_err(|e| BookletError::filesystem(path, e))?;
    Ok(())
}

/// Checks done before any page is rendered
pub(crate) fn check_request(request: &BookletRequest) -> Result<()> {
    let input = &request.input_path;
    if input.as_os_str().is_empty() {
        return Err(BookletError::InvalidInput(
            "No input PDF selected".to_string(),
        ));
    }
    if !input.is_file() {
        return Err(BookletError::InvalidInput(format!(
            "Input file not found: {}",
            input.display()
        )));
    }

    let output = &request.output_path;
    if output.as_os_str().is_empty() {
        return Err(BookletError::InvalidInput(
            "No output path specified".to_string(),
        ));
    }
    if output.is_dir() {
        return Err(BookletError::InvalidInput(format!(
            "Output path is a directory: {}",
            output.display()
        )));
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(BookletError::InvalidInput(format!(
                "Output directory does not exist: {}",
                parent.display()
            )));
        }
    }

    Ok(())
}
