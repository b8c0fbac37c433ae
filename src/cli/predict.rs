// src/cli/predict.rs — One-off scoring from the command line

use std::io::Read;

use crate::core::{AppContext, PredictionService};
use crate::features::SessionRecord;
use crate::infra::config::Config;

pub fn run_predict(config: &Config, input: Option<&str>, explain: bool) -> anyhow::Result<()> {
    let raw = read_input(input)?;
    let record: SessionRecord = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("Invalid session JSON: {e}"))?;

    let ctx = AppContext::load(config)?;
    let (result, features) = PredictionService::new(&ctx).predict_explained(&record)?;

    let output = if explain {
        serde_json::json!({
            "probability": result.probability,
            "target_class": result.target_class,
            "features": features,
        })
    } else {
        serde_json::to_value(result)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_input(input: Option<&str>) -> anyhow::Result<String> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}")),
    }
}
