use std::path::PathBuf;
use std::rc::Rc;
use anyhow::{Context, Result};
use clap::Parser;
use heightfield_rust_core::config::{ReconstructionConfig, TruncationPolicy};
use heightfield_rust_core::export::{self, PlotOptions};
use heightfield_rust_core::gapfilling::FillStrategy;
use heightfield_rust_core::pipeline::ReconstructionBuilder;

#[derive(Parser, Debug)]
#[command(version, about = "Repair a raw float32 height-field capture and emit a 3D surface", long_about = None)]
struct Args {
    /// Raw little-endian float32 layer, e.g. LAYER_0.raw
    #[arg(short, long)]
    raw: PathBuf,

    /// JSON reconstruction config, flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Columns, IMAGE_SIZE_X of the capture metadata
    #[arg(long)]
    width: Option<usize>,

    /// Rows, IMAGE_SIZE_Y of the capture metadata
    #[arg(long)]
    height: Option<usize>,

    #[arg(long)]
    scale_x: Option<f64>,

    #[arg(long)]
    scale_y: Option<f64>,

    #[arg(long)]
    scale_z: Option<f64>,

    /// Decode a truncated capture and repair the missing tail
    #[arg(long)]
    best_effort: bool,

    /// Skip linear interpolation, use nearest samples only
    #[arg(long)]
    nearest_only: bool,

    /// Write the filled grid as .npy
    #[arg(long)]
    npy: Option<PathBuf>,

    /// Write the surface as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write an interactive surface plot
    #[arg(long)]
    html: Option<PathBuf>,

    /// Lower end of the plot colour range
    #[arg(long)]
    cmin: Option<f64>,

    /// Upper end of the plot colour range
    #[arg(long)]
    cmax: Option<f64>,

    /// Stream the surface to a spawned rerun viewer
    #[arg(long)]
    spawn_viewer: bool,

    /// Save the rerun recording to this file instead
    #[arg(long)]
    rrd: Option<PathBuf>,
}

impl Args {
    fn reconstruction_config(&self) -> Result<ReconstructionConfig> {
        let mut config = match &self.config {
            Some(path) => ReconstructionConfig::from_file(path)?,
            None => ReconstructionConfig::default()
        };
        if self.width.is_some() {
            config.width = self.width;
        }
        if self.height.is_some() {
            config.height = self.height;
        }
        if let Some(x) = self.scale_x {
            config.scale.x = x;
        }
        if let Some(y) = self.scale_y {
            config.scale.y = y;
        }
        if let Some(z) = self.scale_z {
            config.scale.z = z;
        }
        if self.best_effort {
            config.truncation = TruncationPolicy::BestEffort;
        }
        if self.nearest_only {
            config.fill_strategy = FillStrategy::NearestOnly;
        }
        Ok(config)
    }

    fn rerun_stream(&self) -> Result<Option<Rc<rerun::RecordingStream>>> {
        let builder = rerun::RecordingStreamBuilder::new("heightfield");
        let stream = if let Some(path) = &self.rrd {
            Some(builder.save(path)?)
        } else if self.spawn_viewer {
            Some(builder.spawn()?)
        } else {
            None
        };
        Ok(stream.map(Rc::new))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.reconstruction_config()?;
    let mut builder = ReconstructionBuilder::from_config(&config)?;
    if let Some(stream) = args.rerun_stream()? {
        builder = builder.with_rerun_stream(stream);
    }
    let reconstruction = builder.run_file(&args.raw)
        .with_context(|| format!("reconstructing {}", args.raw.display()))?;

    if let Some(path) = &args.npy {
        export::write_npy(path, &reconstruction.filled)?;
    }
    if let Some(path) = &args.json {
        export::write_surface_json(path, &reconstruction.surface)?;
    }
    if let Some(path) = &args.html {
        let options = PlotOptions {
            title: Some(format!("{}", args.raw.display())),
            cmin: args.cmin,
            cmax: args.cmax
        };
        export::write_surface_html(path, &reconstruction.surface, &options)?;
    }
    Ok(())
}
