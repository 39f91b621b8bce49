//! # LUMINA Headless
//!
//! Runs the portrait on a virtual clock without a window.
//!
//! ```text
//! lumina_headless [config.toml] [--frames N] [--snapshot out.ppm]
//! ```
//!
//! Logs phase transitions and frame statistics; optionally writes the last
//! frame as a PPM image. `RUST_LOG` overrides the default `info` filter.

use std::path::PathBuf;
use std::process::ExitCode;

use lumina::{snapshot, Container, EventBus, FrameLoop, LuminaConfig, LuminaResult, PortraitView};
use lumina_core::PhaseCell;
use lumina_ui::PhaseDriver;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// One full phase cycle at 60fps.
const DEFAULT_FRAMES: u64 = 810;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    frames: Option<u64>,
    snapshot: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--frames" => {
                let value = iter.next().ok_or("--frames needs a value")?;
                let frames = value
                    .parse()
                    .map_err(|_| format!("--frames: not a number: {value}"))?;
                args.frames = Some(frames);
            }
            "--snapshot" => {
                let value = iter.next().ok_or("--snapshot needs a path")?;
                args.snapshot = Some(PathBuf::from(value));
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
            path => {
                if args.config.replace(PathBuf::from(path)).is_some() {
                    return Err("only one config file may be given".to_owned());
                }
            }
        }
    }
    Ok(args)
}

fn run(args: &Args) -> LuminaResult<()> {
    let config = match &args.config {
        Some(path) => LuminaConfig::load(path)?,
        None => LuminaConfig::default(),
    };

    let phase = PhaseCell::default();
    let (listener, receiver) = EventBus::new().split();
    let container = Container::new(config.surface.width, config.surface.height)
        .at(config.surface.origin_x, config.surface.origin_y);

    let Some(mut view) = PortraitView::mount(Some(container), &config, phase.clone(), receiver) else {
        return Ok(());
    };
    // Completion is observed but drives nothing
    view.on_animation_complete(|phase| tracing::debug!("Phase {} complete", phase));

    let driver = PhaseDriver::new(phase, config.timings);
    let mut frame_loop = FrameLoop::new(view, driver, config.frame);

    // Park the pointer over the face so the hovering phases show repulsion
    listener.pointer_moved(
        config.surface.origin_x + f64::from(config.surface.width) / 2.0,
        config.surface.origin_y + f64::from(config.surface.height) / 2.0,
    );

    let frames = args.frames.unwrap_or(DEFAULT_FRAMES);
    let ran = frame_loop.run(frames);
    info!(
        "Ran {} frames ({:.2}s simulated), ending in {}",
        ran,
        frame_loop.clock(),
        frame_loop.driver().phase()
    );
    frame_loop.stats().log_summary();

    if let Some(path) = &args.snapshot {
        snapshot::write_ppm(&frame_loop.view().present(), path)?;
    }

    frame_loop.view_mut().teardown();
    Ok(())
}

fn main() -> ExitCode {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: lumina_headless [config.toml] [--frames N] [--snapshot out.ppm]");
            return ExitCode::from(2);
        }
    };

    info!("LUMINA headless starting");
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("LUMINA error: {e}");
            ExitCode::FAILURE
        }
    }
}
