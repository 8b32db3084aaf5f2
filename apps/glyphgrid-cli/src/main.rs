use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glyphgrid_camera::{AutoFitConfig, AutoFitFrame};
use glyphgrid_common::{CameraMode, GridParameters, PITCH_EPSILON};
use glyphgrid_input::{InputEvent, Key};
use glyphgrid_render::{DebugTextRenderer, Renderer};
use glyphgrid_runtime::{AppConfig, Session};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glyphgrid-cli", about = "Headless driver for the glyph grid viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file; defaults are used for anything it leaves out
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective configuration
    Info,
    /// Compute the auto-fit camera for a grid
    Fit {
        /// Glyphs per axis
        #[arg(short = 'n', long, default_value = "2")]
        size: u32,
        /// Distance between glyph centres
        #[arg(short, long, default_value = "4.5")]
        spacing: f32,
    },
    /// Run scripted frames and report the final camera
    Simulate {
        /// Number of frames to step
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Camera mode to start in (auto_fit, free_flight, first_person, third_person)
        #[arg(short, long, value_parser = parse_mode)]
        mode: Option<CameraMode>,
        /// Key held for the whole run (repeatable), e.g. `w`, `space`
        #[arg(long, value_parser = parse_key)]
        hold: Vec<Key>,
        /// Key pressed at a frame, as `FRAME:KEY` (repeatable), e.g. `30:digit2`
        #[arg(long, value_parser = parse_press)]
        press: Vec<(u32, Key)>,
        /// Mouse motion added every frame, as `DX,DY`
        #[arg(long, value_parser = parse_motion)]
        look: Option<(f32, f32)>,
        /// Print the debug rendering of the last frame
        #[arg(long)]
        render: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_key(s: &str) -> Result<Key, String> {
    serde_json::from_value(serde_json::Value::String(s.to_ascii_lowercase()))
        .map_err(|_| format!("unknown key `{s}`"))
}

fn parse_mode(s: &str) -> Result<CameraMode, String> {
    let name = s.to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(name))
        .map_err(|_| format!("unknown camera mode `{s}`"))
}

fn parse_press(s: &str) -> Result<(u32, Key), String> {
    let (frame, key) = s.split_once(':').ok_or_else(|| format!("expected FRAME:KEY, got `{s}`"))?;
    let frame = frame.parse().map_err(|_| format!("bad frame number `{frame}`"))?;
    Ok((frame, parse_key(key)?))
}

fn parse_motion(s: &str) -> Result<(f32, f32), String> {
    let (dx, dy) = s.split_once(',').ok_or_else(|| format!("expected DX,DY, got `{s}`"))?;
    let parse = |v: &str| v.trim().parse::<f32>().map_err(|_| format!("bad motion value `{v}`"));
    Ok((parse(dx)?, parse(dy)?))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("glyphgrid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("modes: {}", CameraMode::ALL.map(CameraMode::name).join(", "));
            print!("{}", config.to_yaml()?);
        }
        Commands::Fit { size, spacing } => {
            let grid = GridParameters::new(size, spacing);
            let fit = config.camera.auto_fit;
            let frame = AutoFitFrame::compute(&grid, &fit, config.camera.pitch_epsilon);
            println!("Auto-fit: N={} spacing={:.1}", grid.size(), grid.spacing());
            println!("radius={:.3}", frame.radius);
            println!("eye=({:.3}, {:.3}, {:.3})", frame.eye.x, frame.eye.y, frame.eye.z);
            println!("yaw={:.4} pitch={:.4}", frame.pose.yaw, frame.pose.pitch);
            println!("near={:.2} far={:.2}", frame.near, frame.far);
            if fit != AutoFitConfig::default() || config.camera.pitch_epsilon != PITCH_EPSILON {
                println!("(using auto-fit settings from config)");
            }
        }
        Commands::Simulate {
            frames,
            dt,
            mode,
            hold,
            press,
            look,
            render,
            json,
        } => {
            let mut session = Session::new(&config);
            if let Some(mode) = mode {
                session.set_mode(mode);
            }
            for &key in &hold {
                session.handle_event(&InputEvent::KeyDown(key));
            }

            let mut last = None;
            for frame in 0..frames {
                for &(_, key) in press.iter().filter(|(at, _)| *at == frame) {
                    session.handle_event(&InputEvent::KeyDown(key));
                }
                if let Some((dx, dy)) = look {
                    session.handle_event(&InputEvent::MouseMotion { dx, dy });
                }
                last = Some(session.step(dt));
                tracing::trace!(frame, "stepped");
                for &(_, key) in press.iter().filter(|(at, _)| *at == frame) {
                    if !hold.contains(&key) {
                        session.handle_event(&InputEvent::KeyUp(key));
                    }
                }
            }

            tracing::debug!(frames, mode = %session.camera().mode(), "simulation finished");

            let camera = session.camera();
            let pose = camera.camera_pose();
            let player = camera.player_pose();
            let eye = camera.eye_position();
            let grid = session.scene().grid();

            if json {
                let report = serde_json::json!({
                    "frames": frames,
                    "mode": camera.mode(),
                    "eye": [eye.x, eye.y, eye.z],
                    "camera": pose,
                    "player": player,
                    "grid": grid,
                    "draws": last.as_ref().map(|f| f.draw_count()),
                    "status": session.status().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Simulated {frames} frames at dt={dt}");
                println!("{}", session.status());
                println!(
                    "camera: pos=({:.3}, {:.3}, {:.3}) yaw={:.4} pitch={:.4} roll={:.4}",
                    pose.position.x,
                    pose.position.y,
                    pose.position.z,
                    pose.yaw,
                    pose.pitch,
                    pose.roll
                );
                println!(
                    "player: pos=({:.3}, {:.3}, {:.3}) yaw={:.4} pitch={:.4}",
                    player.position.x,
                    player.position.y,
                    player.position.z,
                    player.yaw,
                    player.pitch
                );
                println!("eye=({:.3}, {:.3}, {:.3})", eye.x, eye.y, eye.z);
            }

            if render {
                let frame = last.context("no frames simulated")?;
                print!("{}", DebugTextRenderer::new().render(&frame));
            }
        }
    }

    Ok(())
}
