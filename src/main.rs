use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod engine;
mod pages;
mod texture_loader;

use crossfade::constants::*;
use crossfade::{CrossFadeConfig, Timeout};

use crate::engine::Engine;
use crate::pages::engine::PageEngine;

/// Cross-fade between pages whenever the page changes.
#[derive(Debug, Parser)]
#[command(name = "crossfade-demo", version)]
struct Args {
    /// Fade duration in milliseconds
    #[arg(long, default_value_t = DEMO_TIMEOUT_MS as i64, allow_negative_numbers = true)]
    timeout: i64,

    /// Directory of images to add as extra pages
    #[arg(long)]
    images: Option<PathBuf>,

    /// Show the image pages in random order
    #[arg(long, requires = "images")]
    shuffle: bool,

    /// Keep redrawing the hidden slot between fades
    #[arg(long)]
    no_freeze: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = CrossFadeConfig::default()
        .with_timeout(Timeout::from_millis(args.timeout))
        .with_freeze_hidden(!args.no_freeze);
    info!(?args, "starting demo");

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("CrossFade Demo")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut engine = PageEngine::new(config, args.images, args.shuffle);
    if !engine.initialize(&mut rl, &thread)? {
        bail!("no pages to show");
    }

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow::anyhow!("failed to create render texture: {e}"))?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if !engine.render_frame(dt, &mut rl, &thread, &mut framebuffer)? {
            break;
        }

        // Scale the fixed size framebuffer to the window
        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;

        d.clear_background(Color::BLACK);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    info!("demo closed");
    Ok(())
}
