//! `keg fetch <formula>` – download and verify without installing.

use anyhow::{Context, Result};
use keg_core::config::KegConfig;
use keg_core::formula::{self, Formula};
use keg_core::install;

pub async fn run_fetch(cfg: &KegConfig, spec: &str) -> Result<()> {
    let formula_dir = cfg.formula_dir()?;
    let path = formula::resolve(spec, &formula_dir)?;
    let f = Formula::load(&path)?;
    let retry = cfg.retry_policy();

    let pipeline_formula = f.clone();
    let verified =
        tokio::task::spawn_blocking(move || install::fetch_verified(&pipeline_formula, &retry))
            .await
            .context("fetch task panicked")?;

    let verified = match verified {
        Ok(v) => v,
        Err(e) => {
            let stage = e.stage();
            return Err(anyhow::Error::new(e).context(format!("fetch failed at stage {stage}")));
        }
    };

    println!("Verified {} {}: sha256 {}", f.name, f.version, verified.sha256);
    Ok(())
}
