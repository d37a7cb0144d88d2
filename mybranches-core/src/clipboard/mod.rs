mod system;

pub use system::SystemClipboard;

#[derive(Debug)]
pub enum ClipboardError {
    /// No clipboard on this platform, or it could not be opened
    NotSupported,
    Failed(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSupported => write!(f, "clipboard not supported"),
            Self::Failed(reason) => write!(f, "failed to copy to clipboard: {reason}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

pub trait Clipboard: Send + Sync {
    /// Copy `text` to the system clipboard
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The clipboard available on the running platform, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformClipboard {
    Unavailable,
    Darwin(SystemClipboard),
    Windows(SystemClipboard),
}

impl PlatformClipboard {
    pub fn detect() -> Self {
        platform_clipboard(std::env::consts::OS)
    }

    pub fn capability(&self) -> Option<&dyn Clipboard> {
        match self {
            Self::Unavailable => None,
            Self::Darwin(clipboard) | Self::Windows(clipboard) => Some(clipboard),
        }
    }
}

/// Map an OS name (as in `std::env::consts::OS`) to its clipboard
pub fn platform_clipboard(os: &str) -> PlatformClipboard {
    select_clipboard(os, SystemClipboard::connect)
}

fn select_clipboard(
    os: &str,
    connect: impl FnOnce() -> Result<SystemClipboard, ClipboardError>,
) -> PlatformClipboard {
    let tag: fn(SystemClipboard) -> PlatformClipboard = match os {
        "macos" => PlatformClipboard::Darwin,
        "windows" => PlatformClipboard::Windows,
        _ => return PlatformClipboard::Unavailable,
    };
    match connect() {
        Ok(clipboard) => tag(clipboard),
        Err(e) => {
            log::info!("no clipboard on {os}: {e}");
            PlatformClipboard::Unavailable
        }
    }
}

/// Copy through an optional capability; absence is `NotSupported`
pub fn copy_text(clipboard: Option<&dyn Clipboard>, text: &str) -> Result<(), ClipboardError> {
    match clipboard {
        Some(clipboard) => clipboard.copy(text),
        None => Err(ClipboardError::NotSupported),
    }
}
