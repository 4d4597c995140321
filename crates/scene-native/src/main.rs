//! Headless driver: runs the background at a fixed 60 Hz with a scripted
//! pointer and scripted clicks, logging scene changes and frame statistics.
//!
//! Usage: `scene-native [--seconds N] [--seed N] [--compact]`

use anyhow::Context;
use glam::Vec2;
use scene_core::{Background, SceneConfig, SceneEvent, Viewport, FRAME_DT};
use std::time::Instant;

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;

/// Scene switches at these times (seconds), then a rapid burst.
const CLICKS_SEC: [f32; 2] = [3.0, 7.0];
const BURST_START_SEC: f32 = 11.0;
const BURST_CLICKS: u32 = 5;
const BURST_SPACING_SEC: f32 = 0.1;
/// Pointer leaves the window for this interval to exercise the idle paths.
const AWAY_SEC: (f32, f32) = (16.0, 20.0);

struct Args {
    seconds: f32,
    seed: Option<u64>,
    compact: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        seconds: 24.0,
        seed: None,
        compact: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seconds" => {
                let v = it.next().context("--seconds needs a value")?;
                args.seconds = v.parse().with_context(|| format!("bad --seconds {v:?}"))?;
            }
            "--seed" => {
                let v = it.next().context("--seed needs a value")?;
                args.seed = Some(v.parse().with_context(|| format!("bad --seed {v:?}"))?);
            }
            "--compact" => args.compact = true,
            other => anyhow::bail!("unknown argument {other:?}"),
        }
    }
    Ok(args)
}

/// Scripted pointer path: a Lissajous figure across the viewport.
fn pointer_at(t: f32) -> Vec2 {
    let center = Vec2::new(WIDTH, HEIGHT) * 0.5;
    center + Vec2::new((t * 0.9).sin() * WIDTH * 0.4, (t * 1.3).cos() * HEIGHT * 0.35)
}

/// Number of scripted clicks falling inside the frame ending at `t`.
fn clicks_due(t: f32) -> usize {
    let prev = t - FRAME_DT;
    let crossed = |at: f32| prev < at && t >= at;
    let scheduled = CLICKS_SEC.iter().filter(|at| crossed(**at)).count();
    let burst = (0..BURST_CLICKS)
        .filter(|i| crossed(BURST_START_SEC + *i as f32 * BURST_SPACING_SEC))
        .count();
    scheduled + burst
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut config = SceneConfig::for_device(args.compact);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    log::info!(
        "[scene] headless run: {:.0}s, {}, seed {:#x}",
        args.seconds,
        if args.compact { "compact" } else { "desktop" },
        config.seed
    );
    let mut bg = Background::new(config, Viewport::new(WIDTH, HEIGHT));

    let frames = (args.seconds / FRAME_DT).ceil() as u32;
    let started = Instant::now();
    let mut t = 0.0_f32;
    let mut away = false;
    for frame in 0..frames {
        t += FRAME_DT;

        let leave = t >= AWAY_SEC.0 && t < AWAY_SEC.1;
        if leave && !away {
            bg.pointer_leave();
            log::info!("[pointer] left the window at {t:.1}s");
        } else if !leave {
            let p = pointer_at(t);
            bg.pointer_move(p.x, p.y);
        }
        away = leave;

        for _ in 0..clicks_due(t) {
            let p = pointer_at(t);
            bg.pointer_down(p.x, p.y);
            bg.pointer_up();
            if !bg.advance_scene() {
                log::debug!("[scene] click at {t:.2}s did not switch");
            }
        }

        bg.tick(FRAME_DT);

        for ev in bg.drain_events() {
            match ev {
                SceneEvent::SceneChanged { label, .. } => log::info!("[scene] {t:.2}s -> {label}"),
                SceneEvent::EasterEggStarted => log::info!("[scene] {t:.2}s easter egg on"),
                SceneEvent::EasterEggEnded => log::info!("[scene] {t:.2}s easter egg off"),
            }
        }

        if (frame + 1) % 60 == 0 {
            let (count, excitement) = bg
                .entities()
                .fold((0usize, 0.0f32), |(n, sum), e| (n + 1, sum + e.excitement));
            let mean = if count > 0 { excitement / count as f32 } else { 0.0 };
            let world = bg.pointer().world;
            log::info!(
                "[scene] t={t:>5.1}s {:<8} instances={count:<3} pool={}/{} excitement={mean:.3} pointer=({:.2},{:.2},{:.2})",
                bg.active_kind().label(),
                bg.pool().in_use_len(),
                bg.pool().capacity(),
                world.x,
                world.y,
                world.z,
            );
        }
    }

    bg.unmount();
    anyhow::ensure!(bg.pool().in_use_len() == 0, "entities still in use after unmount");
    let elapsed = started.elapsed();
    log::info!(
        "[scene] {frames} frames in {:.1} ms ({:.1} us/frame)",
        elapsed.as_secs_f64() * 1e3,
        elapsed.as_secs_f64() * 1e6 / frames.max(1) as f64
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = parse_args().and_then(|args| run(&args));
    if let Err(e) = result {
        log::error!("{e:?}");
        std::process::exit(1);
    }
}
