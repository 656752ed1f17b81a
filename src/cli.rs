//! CLI argument parsing with clap.

use clap::{Args, Parser, Subcommand};

use crate::gateway::GenerationRequest;

/// Prompt-to-image gateway: serve the generation endpoint or run it once.
#[derive(Parser, Debug)]
#[command(name = "imagegen", version, about)]
pub struct Cli {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output (debug logging).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Generate one image and print the result as JSON.
    Generate(GenerateArgs),
}

/// Options for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Interface to bind (overrides config).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config and `PORT`).
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Options for `generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Text prompt describing the desired image.
    pub prompt: String,

    /// Aspect ratio: 1:1, 16:9, 9:16, 4:3, 3:4.
    #[arg(short, long)]
    pub ratio: Option<String>,

    /// Explicit size as WIDTHxHEIGHT; wins over --ratio.
    #[arg(short, long)]
    pub size: Option<String>,

    /// Style label included in the result label.
    #[arg(long)]
    pub style: Option<String>,

    /// Reference image URL for edits.
    #[arg(long)]
    pub reference: Option<String>,

    /// Edit mask URL (needs --reference).
    #[arg(long)]
    pub mask: Option<String>,
}

impl From<GenerateArgs> for GenerationRequest {
    fn from(args: GenerateArgs) -> Self {
        Self {
            prompt: args.prompt,
            ratio: args.ratio,
            explicit_size: args.size,
            style: args.style,
            reference_image_url: args.reference,
            edit_mask_url: args.mask,
        }
    }
}
