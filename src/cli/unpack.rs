// src/cli/unpack.rs — Decompress shipped artifacts

use crate::infra::artifacts::{self, UnpackOutcome};
use crate::infra::config::Config;

pub fn run_unpack(config: &Config) -> anyhow::Result<()> {
    let mut failed = 0;
    for artifact in [
        config.artifacts.encoders_path(),
        config.artifacts.model_path(),
    ] {
        let compressed = artifacts::compressed_path(&artifact);
        match artifacts::unpack(&compressed) {
            Ok(UnpackOutcome::AlreadyPresent { target }) => {
                println!("{} already unpacked", target.display());
            }
            Ok(UnpackOutcome::Unpacked {
                target,
                compressed_bytes,
                unpacked_bytes,
            }) => {
                println!(
                    "{} unpacked ({} → {} bytes)",
                    target.display(),
                    compressed_bytes,
                    unpacked_bytes
                );
            }
            Err(e) => {
                eprintln!("{e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} artifact(s) could not be unpacked");
    }
    Ok(())
}
