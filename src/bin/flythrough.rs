use cavemarch::camera::{CameraState, FlyController, FlyInput};
use cavemarch::config::{ParamStore, Resolution, Settings};
use cavemarch::render::render_image;
use clap::Parser;
use log::{info, warn};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a numbered PNG sequence flying through the cave", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 320)]
    width: u32,

    #[arg(long, default_value_t = 180)]
    height: u32,

    #[arg(short, long, default_value_t = 1)]
    antialias: u32,

    #[arg(short, long, default_value_t = 48)]
    frames: u32,

    #[arg(long, default_value_t = 24.)]
    fps: f64,

    /// Forward speed in world units per second.
    #[arg(long, default_value_t = 0.5)]
    speed: f64,

    /// Constant yaw rate in radians per second while flying.
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    turn_rate: f64,

    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base settings as `key=value&...`.
    #[arg(short, long)]
    query: Option<String>,

    /// Per-frame settings changes as `FRAME:key=value&...`; an invalid
    /// change is reported and the previous settings keep rendering.
    #[arg(long = "at")]
    changes: Vec<String>,

    #[arg(short, long, default_value = "frames")]
    out_dir: PathBuf,
}

fn parse_change(spec: &str) -> Option<(u32, &str)> {
    let (frame, query) = spec.split_once(':')?;
    Some((frame.trim().parse().ok()?, query))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::from_json_file(path)?,
        None => Settings::default(),
    };
    if let Some(query) = &args.query {
        settings.apply_query(query)?;
    }
    let mut store = ParamStore::new(settings)?;
    let resolution = Resolution::new(args.width, args.height)?;
    let changes = args
        .changes
        .iter()
        .map(|c| parse_change(c).ok_or_else(|| format!("malformed --at `{}`, expected FRAME:query", c)))
        .collect::<Result<Vec<_>, _>>()?;
    fs::create_dir_all(&args.out_dir)?;

    let controller = FlyController {
        speed: args.speed,
        turn_rate: args.turn_rate,
    };
    let input = FlyInput {
        forward: 1.,
        turn: 1.,
        ..Default::default()
    };
    let dt = 1. / args.fps;
    let mut camera = CameraState::new(store.settings().start_position(), 0., 0.);

    let start = Instant::now();
    for i in 0..args.frames {
        for (_, query) in changes.iter().filter(|(at, _)| *at == i) {
            if let Err(e) = store.apply_query(query) {
                warn!("frame {}: ignoring `{}`: {}", i, query, e);
            }
        }

        let frame = store.frame(resolution, i as f64 * dt, args.antialias)?;
        let frame_start = Instant::now();
        let img = render_image(&frame, &camera);
        let path = args.out_dir.join(format!("frame_{:05}.png", i));
        img.save(&path)?;
        info!(
            "frame {} at {:?} took {} s",
            i,
            camera.position,
            frame_start.elapsed().as_secs_f32()
        );

        camera = controller.advance(&camera, &input, dt);
    }
    info!("{} frames took {} s", args.frames, start.elapsed().as_secs_f32());
    Ok(())
}
