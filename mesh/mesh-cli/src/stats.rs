//! `stl2obj stats`.

use anyhow::{Context, Result};
use mesh_convert::preview;

use crate::args::StatsArgs;

pub fn run(args: &StatsArgs) -> Result<()> {
    let config = args.pipeline.load_config()?;
    let stats = preview(&args.input, &config.options)
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", args.input.display());
        println!("{stats}");
    }
    Ok(())
}
