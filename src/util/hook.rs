use crate::ui::tui;

/// Puts the terminal back before the previous hook prints the report.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = tui::Tui::restore() {
            tracing::error!("Failed to restore terminal after panic: {}", e);
        }
        tracing::error!("{}", panic_info);
        hook(panic_info);
    }));
}
