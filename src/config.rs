// src/config.rs
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Markdown file to convert (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Output file for the JSON blocks (prints to stdout when omitted)
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Mark section blocks as always expanded
    #[arg(long, default_value_t = false)]
    pub expand_sections: bool,

    /// Wrap the output as {"blocks": [...]} for pasting into the block builder
    #[arg(short = 'b', long, default_value_t = false)]
    pub builder: bool,

    /// Pretty-print the JSON output
    #[arg(short, long, default_value_t = false)]
    pub pretty: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CommandLineInput {
    /// Resolves the render options selected on the command line.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new().with_expand_sections(self.expand_sections)
    }
}

/// Options that change how a document is rendered into blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Whether section blocks carry the platform's auto-expand attribute.
    pub expand_sections: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expand_sections(mut self, expand: bool) -> Self {
        self.expand_sections = expand;
        self
    }
}
