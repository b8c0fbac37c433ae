// src/infra/artifacts.rs — Gzip artifact unpacking
//
// Large artifacts ship compressed next to where the service expects them
// (`model.json.gz` → `model.json`). Unpacking is idempotent: an existing
// target is never touched.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::infra::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnpackOutcome {
    AlreadyPresent {
        target: PathBuf,
    },
    Unpacked {
        target: PathBuf,
        compressed_bytes: u64,
        unpacked_bytes: u64,
    },
}

/// Path the decompressed artifact is written to.
pub fn unpacked_path(compressed: &Path) -> Result<PathBuf, ServiceError> {
    match compressed.extension().and_then(|e| e.to_str()) {
        Some("gz") => Ok(compressed.with_extension("")),
        _ => Err(ServiceError::Artifact(format!(
            "{} is not a .gz artifact",
            compressed.display()
        ))),
    }
}

/// Compressed sibling for an artifact path (`model.json` → `model.json.gz`).
pub fn compressed_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

/// Rename a fully written temp file onto its target, removing the temp file
/// if the rename fails.
fn move_into_place(temp_path: &Path, target: &Path) -> Result<(), ServiceError> {
    std::fs::rename(temp_path, target).map_err(|e| {
        let _ = std::fs::remove_file(temp_path);
        ServiceError::Artifact(format!("failed to move {} into place: {e}", target.display()))
    })
}

pub fn unpack(compressed: &Path) -> Result<UnpackOutcome, ServiceError> {
    let target = unpacked_path(compressed)?;
    if target.exists() {
        return Ok(UnpackOutcome::AlreadyPresent { target });
    }
    if !compressed.exists() {
        return Err(ServiceError::Artifact(format!(
            "compressed artifact {} not found",
            compressed.display()
        )));
    }

    // Write to a sibling first so a failed unpack never leaves a truncated target.
    let temp_path = target.with_extension("unpacking");
    let result = (|| -> std::io::Result<u64> {
        let mut decoder = GzDecoder::new(BufReader::new(File::open(compressed)?));
        let mut out = BufWriter::new(File::create(&temp_path)?);
        let written = std::io::copy(&mut decoder, &mut out)?;
        out.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        Ok(written)
    })();

    let unpacked_bytes = match result {
        Ok(n) => n,
        Err(e) => {
            let _ = std::fs::remove_file(&temp_path);
            return Err(ServiceError::Artifact(format!(
                "failed to unpack {}: {e}",
                compressed.display()
            )));
        }
    };
    move_into_place(&temp_path, &target)?;

    let compressed_bytes = std::fs::metadata(compressed)?.len();
    tracing::info!(
        "Unpacked {} → {} ({:.1} MB → {:.1} MB)",
        compressed.display(),
        target.display(),
        megabytes(compressed_bytes),
        megabytes(unpacked_bytes)
    );

    Ok(UnpackOutcome::Unpacked {
        target,
        compressed_bytes,
        unpacked_bytes,
    })
}

/// Unpack the `.gz` sibling of `artifact` when there is one to unpack.
///
/// Failures are logged, not returned: loading the artifact afterwards
/// reports the real problem if the file is still missing.
pub fn ensure_unpacked(artifact: &Path) -> Option<UnpackOutcome> {
    if artifact.exists() {
        return Some(UnpackOutcome::AlreadyPresent {
            target: artifact.to_path_buf(),
        });
    }
    match unpack(&compressed_path(artifact)) {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            tracing::error!("{e}");
            None
        }
    }
}

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
