use anyhow::{Context, Result};
use bevtrail::{Color, Engine, EngineConfig, Handled, Layers, RasterCanvas};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

/// Replays recorded viewer messages (one JSON payload per line) and renders BEV frames.
#[derive(Parser, Debug)]
#[command(name = "bev-replay")]
struct Args {
    /// Recorded stream; stdin when omitted
    input: Option<PathBuf>,
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Engine config as JSON; missing fields take defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// TTF/OTF font for labels; labels are skipped without one
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,
    #[arg(long, default_value = "frames")]
    out_dir: PathBuf,
    /// Write a PNG every N processed snapshots (0 disables output)
    #[arg(long, default_value_t = 1)]
    every: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            let src = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_json(&src)?
        }
        None => EngineConfig::default(),
    };

    let mut surface = RasterCanvas::new(args.width, args.height);
    if let Some(path) = &args.font {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
        let font = ab_glyph::FontArc::try_from_vec(bytes)
            .with_context(|| format!("parsing font {}", path.display()))?;
        surface = surface.with_font(font);
    }

    let layers = Layers::new(surface.clone(), surface.clone(), surface)?;
    let mut engine = Engine::new(config, layers)?;

    if args.every > 0 {
        std::fs::create_dir_all(&args.out_dir)
            .with_context(|| format!("creating {}", args.out_dir.display()))?;
    }

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let (mut frames, mut dropped) = (0u64, 0u64);

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match engine.ingest(&line)? {
            Handled::Frame { tick, .. } => {
                frames += 1;

                if args.every > 0 && tick % args.every == 0 {
                    let path = args.out_dir.join(format!("frame_{:06}.png", tick));
                    engine.layers().save_png(&path, Color::BLACK)?;
                }
            }
            Handled::Dropped => dropped += 1,
            Handled::Layout { .. } | Handled::Ignored => {}
        }
    }

    tracing::info!(
        frames,
        dropped,
        tracks = engine.store().len(),
        "replay finished"
    );

    Ok(())
}
