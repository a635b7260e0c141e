//! Build script for rhapcli.
//!
//! Copies the `.env.example` template from the crate root into the local
//! data directory (`rhapcli/` under `dirs::data_local_dir()`), next to where
//! `config::load_env` looks for the real `.env`.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut target_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    target_dir.push("rhapcli");
    fs::create_dir_all(&target_dir)?;

    if template.is_file() {
        fs::copy(&template, target_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
