use cavemarch::camera::CameraState;
use cavemarch::config::{ParamStore, Resolution, Settings};
use cavemarch::math::v;
use cavemarch::render::render_image;
use clap::Parser;
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render one frame of the procedural cave", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 360)]
    height: u32,

    #[arg(short, long, default_value_t = 1)]
    antialias: u32,

    /// Elapsed seconds; drives the slow drift of the field.
    #[arg(short, long, default_value_t = 0.)]
    time: f64,

    #[arg(long, default_value_t = 0.)]
    yaw: f64,

    #[arg(long, default_value_t = 0.)]
    pitch: f64,

    /// Camera position; defaults to `(0, 0, camDist)`.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    position: Option<Vec<f64>>,

    /// JSON settings file, applied before `--query`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Settings as `key=value&key=value`, e.g. `seed=3&octaves=5`.
    #[arg(short, long)]
    query: Option<String>,

    #[arg(short, long, default_value = "out.png")]
    out: PathBuf,
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
    let store = ParamStore::new(settings)?;

    let position = match args.position.as_deref() {
        Some([x, y, z]) => v(*x, *y, *z),
        _ => store.settings().start_position(),
    };
    let camera = CameraState::new(position, args.yaw, args.pitch);
    let frame = store.frame(
        Resolution::new(args.width, args.height)?,
        args.time,
        args.antialias,
    )?;

    info!("rendering {}x{} with {:?}", args.width, args.height, store.settings());
    let start = Instant::now();
    let img = render_image(&frame, &camera);
    info!("render took {} s", start.elapsed().as_secs_f32());

    img.save(&args.out)?;
    info!("wrote {}", args.out.display());
    Ok(())
}
