//! `grove` CLI — reformat and inspect JSON documents from the command line.
//!
//! Every document passes through the grove codec in both directions: input
//! is read through the tree reader and output is produced by the tree
//! writer, so the tool doubles as an end-to-end exercise of the library.
//!
//! ## Usage
//!
//! ```sh
//! # Pretty-print JSON (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | grove pretty
//!
//! # Compact from file to file
//! grove compact -i data.json -o data.min.json
//!
//! # List the top-level member keys of an object document
//! grove keys -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use grove_core::{Deserializer, JsonReader};
use serde_json::Value;
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "grove", version, about = "Tree-serialization JSON toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pretty-print a JSON document
    Pretty {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Compact a JSON document to its minimal form
    Compact {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List the top-level member keys of an object document
    Keys {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pretty { input, output } => {
            let text = read_input(input.as_deref())?;
            let tree: Value = grove_core::from_str(&text).context("Failed to parse JSON")?;
            let pretty =
                grove_core::to_string_pretty(&tree).context("Failed to write JSON")?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Compact { input, output } => {
            let text = read_input(input.as_deref())?;
            let tree: Value = grove_core::from_str(&text).context("Failed to parse JSON")?;
            let compact = grove_core::to_string(&tree).context("Failed to write JSON")?;
            write_output(output.as_deref(), &compact)?;
        }
        Commands::Keys { input } => {
            let text = read_input(input.as_deref())?;
            let doc: Value = serde_json::from_str(&text).context("Failed to parse JSON")?;
            for key in top_level_keys(&doc)? {
                println!("{}", key);
            }
        }
    }

    Ok(())
}

/// Collect the top-level member names of an object document, in document
/// order, by driving the reader's key iteration.
fn top_level_keys(doc: &Value) -> Result<Vec<String>> {
    let de = Deserializer::new(JsonReader::new(doc));
    let mut keys = Vec::new();
    {
        let obj = de
            .root()
            .object()
            .context("Document root is not an object")?;
        while let Some(member) = obj.next_key()? {
            keys.push(member.name);
        }
    }
    de.finish()?;
    Ok(keys)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
