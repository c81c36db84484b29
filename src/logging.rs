use once_cell::sync::OnceCell;

use crate::config::LogLevel;

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the browser console logger and panic hook. Only the first call
/// has any effect; native builds leave logger setup to the host binary.
pub fn init(level: LogLevel) {
    INIT.get_or_init(|| install(level));
}

#[cfg(target_arch = "wasm32")]
fn install(level: LogLevel) {
    console_error_panic_hook::set_once();
    if let Some(level) = level.to_level() {
        if let Err(err) = console_log::init_with_level(level) {
            log::warn!("console logger not installed: {err}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install(_level: LogLevel) {}
