// src/cli/schema.rs — Print the feature schema

use crate::core::AppContext;
use crate::infra::config::Config;

pub fn run_schema(config: &Config) -> anyhow::Result<()> {
    let ctx = AppContext::load(config)?;
    let derived = ctx.derived_feature_count();

    for (i, name) in ctx.schema().iter().enumerate() {
        let source = if i < derived {
            "derived"
        } else {
            "encoded"
        };
        println!("{i:>4}  {name}  ({source})");
    }
    println!(
        "\n{} columns ({} derived, {} encoded by {} encoders)",
        ctx.schema().len(),
        derived,
        ctx.schema().len() - derived,
        ctx.encoders().len()
    );
    Ok(())
}
