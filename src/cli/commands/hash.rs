//! Hash command implementation

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::core::hash::hash_file;

/// Execute the hash command
pub fn execute(file: PathBuf) -> Result<()> {
    let digest =
        hash_file(&file).with_context(|| format!("couldn't hash {}", file.display()))?;
    println!("{}", digest);
    Ok(())
}
