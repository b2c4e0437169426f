//! System clipboard access.
//!
//! Platform backends stay behind `cfg` so the workspace builds on every target.

use std::sync::Arc;
use toonstudio_engine::traits::Clipboard;

#[cfg(windows)]
mod windows;

#[cfg(target_os = "macos")]
mod macos;


#[cfg(windows)]
pub use windows::WindowsClipboard;

#[cfg(target_os = "macos")]
pub use macos::MacosClipboard;

/// Clipboard for the current platform. Targets without a backend get one that always fails.
pub fn system_clipboard() -> Arc<dyn Clipboard> {
    #[cfg(windows)]
    {
        Arc::new(WindowsClipboard)
    }

    #[cfg(target_os = "macos")]
    {
        Arc::new(MacosClipboard)
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    {
        Arc::new(test::UnsupportedClipboard)
    }
}
