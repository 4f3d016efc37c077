//! Build script for msgspec-sample
//!
//! Validates the bundled message resources in strict mode and generates the
//! typed accessors included by `src/lib.rs`.

use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;

use msgspec_codegen::{AccessorGenerator, GeneratorOptions};
use msgspec_common::ValidationMode;
use msgspec_core::{load_and_validate, Bundle};

const OUTPUT_FILE: &str = "sample_messages.rs";

fn generate_accessors() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=resources");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let bundle = Bundle::builder("messages")
        .key_prefix("sample")
        .main_locale("en-GB")
        .locales(["fr-FR", "de-DE"])
        .root(manifest_dir.join("resources"))
        .build()?;

    let specs = load_and_validate(&bundle)?;
    for error in specs.errors() {
        println!("cargo:warning={error}");
    }
    ValidationMode::Strict.gate(specs.errors())?;

    let generated = AccessorGenerator::new(GeneratorOptions::default())?.generate(&specs)?;
    let out = PathBuf::from(env::var("OUT_DIR")?).join(OUTPUT_FILE);
    fs::write(&out, generated.source())?;
    Ok(())
}

fn main() {
    if let Err(e) = generate_accessors() {
        eprintln!("Message bundle generation failed:\n{e}");
        process::exit(1);
    }
}
