// Windows clipboard via the Win32 clipboard API.

use clipboard_win::set_clipboard_string;
use toonstudio_engine::traits::Clipboard;

#[derive(Debug, Default)]
pub struct WindowsClipboard;

#[async_trait::async_trait]
impl Clipboard for WindowsClipboard {
    async fn set_text(&self, text: &str) -> anyhow::Result<()> {
        set_clipboard_string(text).map_err(|e| anyhow::anyhow!("failed to write clipboard: {e}"))
    }
}
