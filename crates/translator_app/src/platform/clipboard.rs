//! Clipboard writes. Windows goes through the native clipboard; other
//! platforms hand the text to egui's platform output.

#[cfg(windows)]
pub(crate) fn write_text(_ctx: &egui::Context, text: &str) -> Result<(), String> {
    clipboard_win::set_clipboard_string(text).map_err(|err| err.to_string())
}

#[cfg(not(windows))]
pub(crate) fn write_text(ctx: &egui::Context, text: &str) -> Result<(), String> {
    ctx.output_mut(|output| output.copied_text = text.to_string());
    Ok(())
}
