use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use boxtag::config::BoxTagConfig;
use boxtag::domain::CoordinateTransform;
use boxtag::metadata;
use boxtag::session::{EditCommand, EditorSession, PointerEvent};

const USAGE: &str = "usage: boxtag <image> <WIDTHxHEIGHT> <events.json> [boxes.json]";

/// Command line of the replay tool
///
/// The image supplies the natural size, WIDTHxHEIGHT the size it was shown
/// at. The resulting box record is printed as JSON.
struct Args {
    image: PathBuf,
    display_size: (f64, f64),
    events: PathBuf,
    boxes: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args_os().skip(1);
    let (Some(image), Some(size), Some(events)) = (args.next(), args.next(), args.next()) else {
        bail!(USAGE);
    };
    let size = size.to_string_lossy();
    let Some((w, h)) = size.split_once('x') else {
        bail!("display size must look like 800x600, got {size}");
    };
    let display_size = (
        w.parse::<f64>().with_context(|| format!("invalid display width: {w}"))?,
        h.parse::<f64>().with_context(|| format!("invalid display height: {h}"))?,
    );
    Ok(Args {
        image: image.into(),
        display_size,
        events: events.into(),
        boxes: args.next().map(PathBuf::from),
    })
}

fn read_events(path: &Path) -> Result<Vec<PointerEvent>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse events file: {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args()?;
    let (width, height) = image::image_dimensions(&args.image)
        .with_context(|| format!("Failed to read image: {}", args.image.display()))?;
    let transform = CoordinateTransform::new(
        width as f64,
        height as f64,
        args.display_size.0,
        args.display_size.1,
    );
    log::info!("{}: {width}x{height}, shown at {:?}", args.image.display(), args.display_size);

    let mut session = EditorSession::new(BoxTagConfig::load(), transform);
    if let Some(path) = &args.boxes {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read boxes file: {}", path.display()))?;
        session.handle(EditCommand::Load(metadata::decode(&json)?));
    }

    let events = read_events(&args.events)?;
    for event in &events {
        session.handle(*event);
    }
    log::info!(
        "replayed {} events, {} shapes, selected {:?}",
        events.len(),
        session.shapes().len(),
        session.selected()
    );

    log::info!("writing record for EXIF tag {}", metadata::EXIF_TAG);
    println!("{}", metadata::encode(session.shapes())?);
    Ok(())
}
