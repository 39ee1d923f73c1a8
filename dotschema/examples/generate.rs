//! Generates C# classes from a JSON Schema file.
//!
//! Run with: `cargo run --example generate -- <schema.json> <output-dir> [hints.json]`
//!
//! Set `RUST_LOG=debug` to see each class and file as it is produced.

use anyhow::{Context, bail};
use dotschema::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(schema_path), Some(output)) = (args.next(), args.next()) else {
        bail!("usage: generate <schema.json> <output-dir> [hints.json]");
    };

    let schema = std::fs::read_to_string(&schema_path)
        .with_context(|| format!("reading schema {schema_path}"))?;

    let hints = match args.next() {
        Some(path) => {
            let text =
                std::fs::read_to_string(&path).with_context(|| format!("reading hints {path}"))?;
            HintDictionary::from_json(&text)?
        }
        None => HintDictionary::new(),
    };

    let settings = GeneratorSettings::new(PathBuf::from(output), "Generated", "Root")
        .force_overwrite(true)
        .hints(hints);

    let artifacts = generate(&schema, &settings, &OsFileSystem)?;
    for artifact in &artifacts {
        println!("{} -> {}", artifact.type_name, artifact.path.display());
    }

    Ok(())
}
