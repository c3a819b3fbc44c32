pub mod arboard_backend;
pub mod backend;
#[cfg(test)]
pub mod memory;
pub mod wayland;

use anyhow::{Context, Result};
use std::env;

pub use arboard_backend::ArboardBackend;
pub use backend::{ClipboardBackend, ClipboardError, ClipboardPayload};
pub use wayland::WaylandBackend;

/// Create a clipboard backend based on the current display server
/// Uses wl-clipboard when running under Wayland with the tools installed,
/// arboard everywhere else (X11, macOS, Windows)
pub fn create_backend() -> Result<Box<dyn ClipboardBackend>> {
    if env::var("WAYLAND_DISPLAY").is_ok() {
        match WaylandBackend::new() {
            Ok(backend) => {
                log::info!("Detected Wayland display server, using wl-clipboard");
                return Ok(Box::new(backend));
            }
            Err(e) => log::debug!("wl-clipboard unavailable, falling back to arboard: {}", e),
        }
    }

    let backend = ArboardBackend::new().context("Failed to open the system clipboard")?;
    log::debug!("Using {} clipboard backend", backend.name());
    Ok(Box::new(backend))
}
