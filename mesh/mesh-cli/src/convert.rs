//! `stl2obj convert`.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use mesh_convert::{collect_inputs, BatchConverter, BatchEvent, BatchState, OutputNamer};
use tracing::{debug, info};

use crate::args::ConvertArgs;

pub fn run(args: &ConvertArgs) -> Result<()> {
    let config = args.load_config()?;

    let inputs = collect_inputs(&args.inputs);
    info!(count = inputs.len(), "collected inputs");

    let namer = OutputNamer::new(config.naming.mode(), config.naming.out_dir.clone());
    let jobs = namer.resolve(&inputs).context("failed to name outputs")?;

    let batch = BatchConverter::new(jobs.into(), Arc::new(config.options));
    let handle = batch.spawn().context("failed to start conversion worker")?;

    let mut outcome = None;
    for event in handle.events.iter() {
        match event {
            BatchEvent::Log(text) => println!("{text}"),
            BatchEvent::Progress(percent) => debug!(percent, "progress"),
            BatchEvent::Done { success, message } => outcome = Some((success, message)),
        }
    }

    let state = handle.wait();
    match outcome {
        Some((true, message)) if state == BatchState::Completed => {
            println!("{message}");
            Ok(())
        }
        Some((_, message)) => bail!(message),
        None => bail!("conversion worker stopped without reporting ({state})"),
    }
}
