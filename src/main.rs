mod demo;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};
use rawfb::display::window::{Display, InputEvent, RenderTarget, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use rawfb::{Frame, RenderConfig, Renderer};
use sdl2::keyboard::Keycode;

use demo::util::FpsCounter;

struct Args {
    width: u32,
    height: u32,
    vsync: bool,
    config: Option<PathBuf>,
    frame: Option<PathBuf>,
    dump: Option<PathBuf>,
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        vsync: true,
        config: None,
        frame: None,
        dump: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => parsed.vsync = false,
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 1280x720)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                            parsed.width = w;
                            parsed.height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    parsed.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--frame" | "-f" => {
                if i + 1 < args.len() {
                    parsed.frame = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--dump" => {
                if i + 1 < args.len() {
                    parsed.dump = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: rawfb-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --resolution WxH, -r WxH  Window size (default: {}x{})",
                    DEFAULT_WIDTH, DEFAULT_HEIGHT
                );
                println!("  --config PATH, -c PATH    Render config JSON");
                println!("  --frame PATH, -f PATH     Render a command frame from JSON");
                println!("                            instead of the showcase");
                println!("  --dump PATH               Write the first showcase frame as JSON");
                println!("  --no-vsync                Disable VSync for uncapped framerate");
                println!("  --help                    Show this help message");
                std::process::exit(0);
            },
            other => warn!("Ignoring unknown argument {}", other),
        }
        i += 1;
    }

    parsed
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = parse_args();
    let config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    let fixed_frame = match &args.frame {
        Some(path) => {
            Some(Frame::load(path).with_context(|| format!("loading frame {}", path.display()))?)
        },
        None => None,
    };

    let (mut display, texture_creator) =
        Display::with_options("rawfb", args.width, args.height, args.vsync)
            .map_err(anyhow::Error::msg)?;
    let layout = config.layout;
    let mut target = RenderTarget::with_size(&texture_creator, args.width, args.height, layout)
        .map_err(anyhow::Error::msg)?;

    let clear = config.clear_color;
    let mut renderer = Renderer::with_size(args.width, args.height, config);
    let (atlas, font) = demo::font5x7::bake();
    renderer.set_font_atlas(atlas);
    let font = renderer.add_font(font);
    let image = renderer.add_image(demo::checker_image());

    info!("Esc quits, F toggles the frame time overlay");

    let mut fps_counter = FpsCounter::new(60);
    let mut show_fps = true;
    let mut dump = args.dump;
    let start = Instant::now();

    'main: loop {
        let (_dt, avg_fps) = fps_counter.tick();

        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::F) => show_fps = !show_fps,
                InputEvent::KeyDown(_) => {},
                InputEvent::Resized { width, height } => {
                    let pitch = width as usize * 4;
                    let pixels = vec![0; pitch * height as usize];
                    renderer.resize(pixels, width, height, pitch, layout)?;
                    target = RenderTarget::with_size(&texture_creator, width, height, layout)
                        .map_err(anyhow::Error::msg)?;
                },
            }
        }

        let surface = renderer.surface();
        let (width, height) = (surface.width(), surface.height());
        let status = if show_fps {
            format!("FPS {} ({:.1}MS)", avg_fps as u32, fps_counter.avg_frame_time_ms())
        } else {
            String::new()
        };

        let showcase;
        let frame = match &fixed_frame {
            Some(frame) => frame,
            None => {
                let t = start.elapsed().as_secs_f32();
                showcase = demo::showcase(t, width, height, font, image, &status);
                &showcase
            },
        };

        if let Some(path) = dump.take() {
            frame.save(&path).with_context(|| format!("writing frame {}", path.display()))?;
            info!("Frame with {} commands written to {}", frame.len(), path.display());
        }

        renderer.render(frame, Some(clear));
        display
            .present(&mut target, renderer.surface())
            .map_err(anyhow::Error::msg)?;
    }

    Ok(())
}
