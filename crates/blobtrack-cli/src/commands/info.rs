use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use blobtrack_core::io::open_source;

#[derive(Args)]
pub struct InfoArgs {
    /// Input SER file, image, or image directory
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = open_source(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let info = source
        .info()
        .with_context(|| format!("No metadata available for {}", args.file.display()))?;

    println!("File:        {}", info.filename.display());
    println!("Frames:      {}", info.total_frames);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Bit depth:   {}", info.bit_depth);
    println!("Color mode:  {:?}", info.color_mode);

    if let Some(ref obs) = info.observer {
        println!("Observer:    {}", obs);
    }
    if let Some(ref tel) = info.telescope {
        println!("Telescope:   {}", tel);
    }
    if let Some(ref inst) = info.instrument {
        println!("Instrument:  {}", inst);
    }

    Ok(())
}
