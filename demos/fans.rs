//! # Fans
//!
//! 1 000 filled circles (12 triangles each, radius 10) in random colors.
//! Lifetimes run 2-4 seconds against a 3 second fade, so young particles
//! stay opaque for a while before they start to fade.
//!
//! Run with: `cargo run --example fans --release`

use std::time::Duration;

use pfx2d::prelude::*;

fn main() -> Result<(), pfx2d::ViewerError> {
    tracing_subscriber::fmt::init();

    let config = EmitterConfig::new(1_000)
        .with_lifetime(Duration::from_secs(2), Duration::from_secs(4))
        .with_fade(Fade::Fixed(Duration::from_secs(3)))
        .with_color(ColorMode::Random)
        .with_shape(Shape::Fan {
            radius: 10.0,
            segments: 12,
        });

    Viewer::new(config)
        .with_title("Fans")
        .with_size(1920, 1080)
        .run()
}
