//! Parallel hashing of a directory into a [`HashBatch`]
//!
//! Files are hashed independently on the rayon pool. A file that cannot be
//! read is reported in [`BatchOutcome::skipped`] and the rest of the batch
//! carries on. Progress reporting is opt-in through the `progress` argument.

use crate::batch::{scanner::scan_files, HashBatch};
use crate::core::{error::Result, hash::hash_file, types::Digest};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Result of hashing a directory
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully hashed files
    pub batch: HashBatch,
    /// Files that could not be hashed, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Hash every regular file below `dir`
pub fn hash_directory(dir: &Path, progress: Option<&ProgressBar>) -> Result<BatchOutcome> {
    let scan = scan_files(dir)?;
    if let Some(pb) = progress {
        pb.set_length(scan.files.len() as u64);
    }

    let results: Vec<(PathBuf, std::io::Result<Digest>)> = scan
        .files
        .into_par_iter()
        .map(|path| {
            let digest = hash_file(&path);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            (path, digest)
        })
        .collect();

    let mut outcome = BatchOutcome::default();
    for (path, digest) in results {
        match digest {
            Ok(digest) => outcome.batch.insert(path.to_string_lossy(), digest),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping file");
                outcome.skipped.push((path, e.to_string()));
            },
        }
    }
    for (path, reason) in scan.errors {
        outcome
            .skipped
            .push((path.unwrap_or_else(|| dir.to_path_buf()), reason));
    }

    tracing::debug!(
        hashed = outcome.batch.len(),
        skipped = outcome.skipped.len(),
        "hashed directory"
    );

    Ok(outcome)
}
