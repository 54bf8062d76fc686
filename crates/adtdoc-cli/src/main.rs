use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "adtdoc",
    version,
    about = "Render an ADT discovery service document as markdown"
)]
struct Args {
    /// ADT discovery service document (XML)
    #[arg(value_name = "INPUT_XML_FILE")]
    input: PathBuf,
    /// Markdown file to create or overwrite
    #[arg(value_name = "OUTPUT_MARKDOWN_FILE")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => usage_exit(),
    };

    adtdoc::convert(&args.input, &args.output).with_context(|| {
        format!(
            "failed to convert {} to {}",
            args.input.display(),
            args.output.display()
        )
    })?;

    info!("wrote {}", args.output.display());
    Ok(())
}

#[allow(clippy::print_stdout)]
fn usage_exit() -> ! {
    println!("{}", Args::command().render_usage());
    std::process::exit(1)
}
