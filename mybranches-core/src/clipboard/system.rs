use super::{Clipboard, ClipboardError};
use copypasta::{ClipboardContext, ClipboardProvider};

/// The OS clipboard. A fresh context is opened per copy, so the handle
/// itself holds nothing and is shareable across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Check that a clipboard context can be opened at all
    pub fn connect() -> Result<Self, ClipboardError> {
        match ClipboardContext::new() {
            Ok(_) => Ok(Self),
            Err(e) => {
                log::debug!("clipboard not available: {e}");
                Err(ClipboardError::NotSupported)
            }
        }
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        log::debug!("copying {} bytes to the clipboard", text.len());
        let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Failed(e.to_string()))?;
        ctx.set_contents(text.to_string())
            .map_err(|e| ClipboardError::Failed(e.to_string()))
    }
}
