//! Read-only spectator stream.
//!
//! Broadcasts every changed match snapshot as JSON to connected browsers.
//! Spectators cannot send commands; incoming messages other than close are
//! ignored.
//!
//! ## Usage
//!
//! Build with the web feature:
//! ```sh
//! cargo build --features web
//! ```
//!
//! Run with the spectator server:
//! ```sh
//! ./target/debug/snake_duel --serve        # Default port 3000
//! ./target/debug/snake_duel --serve=8080   # Custom port
//! ```
//!
//! Then open http://localhost:3000 in a browser.

#[cfg(feature = "web")]
mod server;

#[cfg(feature = "web")]
mod spectator;

#[cfg(feature = "web")]
pub use server::{start_spectator_server, SpectatorServer};

#[cfg(feature = "web")]
pub use spectator::SpectatorRenderer;

pub const DEFAULT_PORT: u16 = 3000;

/// Parse the `--serve` / `--serve=PORT` argument.
pub fn parse_serve_arg(arg: &str) -> Option<Result<u16, String>> {
    if arg == "--serve" {
        return Some(Ok(DEFAULT_PORT));
    }
    arg.strip_prefix("--serve=").map(|port| {
        port.parse::<u16>()
            .map_err(|_| format!("invalid port for --serve: {port}"))
    })
}
