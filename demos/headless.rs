//! # Headless
//!
//! Runs the update pass without a window: the emitter circles the middle
//! of a 1920x1080 canvas at a fixed 60 Hz step, and the per-frame cost is
//! printed once per simulated second.
//!
//! Run with: `cargo run --example headless --release -- [particles] [seconds]`

use std::time::Duration;

use pfx2d::prelude::*;

fn main() -> Result<(), pfx2d::ConfigError> {
    let mut args = std::env::args().skip(1);
    let count: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);

    let mut system = ParticleSystem::new(EmitterConfig::new(count).with_seed(1))?;
    let step = Duration::from_secs_f64(1.0 / 60.0);
    let center = Vec2::new(960.0, 540.0);

    println!("=== pfx2d headless ===");
    println!("Particles: {}", count);
    println!("Step: {:?}", step);
    println!();

    for second in 0..seconds {
        let mut respawned = 0;
        let mut busy = Duration::ZERO;

        for frame in 0..60 {
            let t = second as f32 + frame as f32 / 60.0;
            system.set_emitter(center + Vec2::from_angle(t) * 300.0);

            let timer = Stopwatch::start();
            respawned += system.update(step).respawned;
            busy += timer.elapsed();
        }

        println!(
            "t={}s  respawned={:>8}  avg update={:.3} ms",
            second + 1,
            respawned,
            busy.as_secs_f64() * 1000.0 / 60.0
        );
    }

    Ok(())
}
