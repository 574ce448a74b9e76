//! CLI command implementations

pub mod anchor;
pub mod batch;
pub mod config;
pub mod finalize;
pub mod hash;
pub mod merkle;
pub mod verify;

use std::collections::HashSet;
use std::path::Path;

/// Suffix of proof files that have not been finalized
pub const PENDING_SUFFIX: &str = ".pending.json";

/// Suffix of finalized proof files
pub const FINAL_SUFFIX: &str = ".json";

/// Pick a proof file stem for `source_path` that has not been used yet.
///
/// The stem is the file's basename; later files with the same basename get
/// `-2`, `-3`, ... appended.
pub fn unique_proof_stem(source_path: &str, used: &mut HashSet<String>) -> String {
    let base = Path::new(source_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown_file".to_string());

    let mut candidate = base.clone();
    let mut counter = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{}-{}", base, counter);
        counter += 1;
    }
    candidate
}
