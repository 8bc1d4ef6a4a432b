//! # Points
//!
//! 10 000 single-pixel particles cycling red, green and blue, streaming
//! out of the cursor.
//!
//! Run with: `cargo run --example points --release`

use pfx2d::prelude::*;

fn main() -> Result<(), pfx2d::ViewerError> {
    tracing_subscriber::fmt::init();

    let count: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10_000);

    Viewer::new(EmitterConfig::new(count))
        .with_title("Points")
        .with_size(1920, 1080)
        .run()
}
