//! System clipboard access.

use crate::errors::{PassmanError, Result};

/// Put `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| PassmanError::ClipboardError(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| PassmanError::ClipboardError(e.to_string()))
}
