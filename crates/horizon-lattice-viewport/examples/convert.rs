//! Stylesheet conversion example.
//!
//! Converts the pixel lengths of a stylesheet into viewport units and writes
//! the result next to the input as `<name>-viewport.css`. An optional second
//! argument names a `.json` or `.toml` configuration file.
//!
//! Run with: cargo run -p horizon-lattice-viewport --example convert -- main.css [viewport.toml]

use std::env;
use std::path::PathBuf;

use horizon_lattice_viewport::prelude::*;

fn main() -> horizon_lattice_viewport::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "main.css".to_string()));
    let config = match args.next() {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let processor = Processor::new().plugin(PxToViewport::new(config)?);
    let output = processor.process_file(&input)?;

    for warning in &output.warnings {
        println!("warning: {}", warning);
    }

    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let target = input.with_file_name(format!("{}-viewport.css", stem));
    std::fs::write(&target, &output.css)
        .map_err(|e| horizon_lattice_viewport::Error::io(&target, e))?;

    println!("Wrote {}", target.display());
    Ok(())
}
