//! HAR Convert Example
//!
//! Renders every request of a HAR file with one of the built-in clients.
//!
//! ```text
//! cargo run -p har-convert-example -- [FILE.har] [--target TARGET] [--client CLIENT]
//! RUST_LOG=debug cargo run -p har-convert-example -- --list
//! ```

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use harsnip::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Used when no file is given.
const SAMPLE_HAR: &str = r#"{
  "log": {
    "entries": [
      {
        "request": {
          "method": "GET",
          "url": "https://httpbin.org/get?tool=harsnip",
          "headers": [{ "name": "accept", "value": "application/json" }]
        }
      },
      {
        "request": {
          "method": "POST",
          "url": "https://httpbin.org/post",
          "headers": [{ "name": "content-type", "value": "application/json" }],
          "cookies": [{ "name": "session", "value": "s3cr3t" }],
          "postData": { "mimeType": "application/json", "text": "{\"name\":\"ada\"}" }
        }
      },
      {
        "request": {
          "method": "POST",
          "url": "https://httpbin.org/post",
          "postData": {
            "mimeType": "multipart/form-data",
            "params": [
              { "name": "title", "value": "report" },
              { "name": "file", "fileName": "report.pdf" }
            ]
          }
        }
      }
    ]
  }
}"#;

#[derive(Debug, Parser)]
#[command(name = "har-convert", about = "Render HAR requests as HTTP client code")]
struct Args {
    /// HAR file or single request JSON (a bundled sample is used if omitted)
    file: Option<PathBuf>,

    /// Target language
    #[arg(long, default_value = "shell")]
    target: String,

    /// Client of the target (the target's default if omitted)
    #[arg(long)]
    client: Option<String>,

    /// List targets and their clients, then exit
    #[arg(long)]
    list: bool,
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn list_targets(registry: &Registry) {
    for target in registry.list_targets() {
        println!(
            "{} ({}, default: {})",
            target.info.key, target.info.extname, target.info.default
        );
        for client in target.clients {
            println!("  {:<10} {}", client.key, client.description);
        }
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing();

    if args.list {
        list_targets(&Registry::with_builtins());
        return Ok(());
    }

    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE_HAR.to_string(),
    };
    let target = args.target.as_str();

    let snippet = Snippet::from_json(&text)?;
    info!(requests = snippet.requests().len(), target_id = target, "HAR loaded");

    let Some(conversion) = snippet.convert(target, args.client.as_deref()) else {
        eprintln!("Unknown target `{target}`, available targets:");
        list_targets(snippet.registry());
        return Ok(());
    };

    let extension = snippet.registry().extension_for(target);
    for (index, code) in conversion.into_vec().into_iter().enumerate() {
        println!("// request-{}{extension}", index + 1);
        println!("{code}\n");
    }

    Ok(())
}
