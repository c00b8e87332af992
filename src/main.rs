// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use md2blocks::config::CommandLineInput;
use md2blocks::{blocks_to_json, markdown_to_block_objects, AppError};
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Sets up logging configuration. Logs go to stderr so they never mix with
/// the JSON written to stdout.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .build(Root::builder().appender("stderr").build(log_level))
        .context("Failed to build logging configuration")?;

    log4rs::init_config(config).context("Failed to initialize logging")?;
    log::debug!("Logging initialized at {}", log_level);
    Ok(())
}

/// Reads the markdown source from a file, or from stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String, AppError> {
    let bytes = match path {
        Some(path) => fs::read(path)?,
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
    };

    String::from_utf8(bytes)
        .map_err(|err| AppError::InvalidInput(format!("input is not valid UTF-8: {}", err)))
}

/// Writes the JSON output to a file, or to stdout when no path is given.
fn write_output(path: Option<&Path>, output: &str) -> Result<(), AppError> {
    match path {
        Some(path) => fs::write(path, format!("{}\n", output))?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", output)?;
        }
    }
    Ok(())
}

/// Serializes the blocks, optionally wrapped for the block builder.
fn format_output(blocks: Vec<Value>, builder: bool, pretty: bool) -> anyhow::Result<String> {
    let payload = if builder {
        serde_json::json!({ "blocks": blocks })
    } else {
        Value::Array(blocks)
    };

    let json = if pretty {
        serde_json::to_string_pretty(&payload)
    } else {
        serde_json::to_string(&payload)
    };
    json.context("Failed to serialize blocks")
}

fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let markdown = read_input(cli.input.as_deref()).with_context(|| match &cli.input {
        Some(path) => format!("Failed to read {}", path.display()),
        None => "Failed to read markdown from stdin".to_string(),
    })?;
    let options = cli.render_options();

    let blocks = markdown_to_block_objects(&markdown, &options)?;
    log::info!("Rendered {} blocks", blocks.len());

    let output = format_output(blocks_to_json(&blocks)?, cli.builder, cli.pretty)?;

    write_output(cli.output_file.as_deref(), &output).with_context(|| match &cli.output_file {
        Some(path) => format!("Failed to write {}", path.display()),
        None => "Failed to write to stdout".to_string(),
    })?;
    if let Some(path) = &cli.output_file {
        eprintln!("✓ Blocks saved to {}", path.display());
    }

    Ok(())
}
