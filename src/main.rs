//! Particle viewer.
//!
//! Usage: `pfx2d [config.json]`
//!
//! Without a config the default emitter is used (10 000 points, red/green/blue).
//! Set `RUST_LOG=pfx2d=debug` for more output.

use pfx2d::{EmitterConfig, Viewer, ViewerError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ViewerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pfx2d=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EmitterConfig::from_path(&path)?,
        None => EmitterConfig::default(),
    };

    Viewer::new(config).with_title("pfx2d").run()
}
