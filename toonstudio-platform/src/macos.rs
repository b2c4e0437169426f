// macOS clipboard via NSPasteboard.

use objc2_app_kit::{NSPasteboard, NSPasteboardTypeString};
use objc2_foundation::NSString;
use toonstudio_engine::traits::Clipboard;

#[derive(Debug, Default)]
pub struct MacosClipboard;

fn write_general_pasteboard(text: &str) -> anyhow::Result<()> {
    let pasteboard = NSPasteboard::generalPasteboard();
    let ns_text = NSString::from_str(text);

    let written = unsafe {
        pasteboard.clearContents();
        pasteboard.setString_forType(&ns_text, NSPasteboardTypeString)
    };
    if !written {
        return Err(anyhow::anyhow!("pasteboard rejected the text"));
    }
    Ok(())
}

#[async_trait::async_trait]
impl Clipboard for MacosClipboard {
    async fn set_text(&self, text: &str) -> anyhow::Result<()> {
        write_general_pasteboard(text)
    }
}
