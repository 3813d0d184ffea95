//! `keg install <formula>` – run the full install pipeline.

use anyhow::{Context, Result};
use keg_core::config::KegConfig;
use keg_core::formula::{self, Formula};
use keg_core::install::{self, InstallOptions};
use keg_core::registry::{InstallRecord, Registry};

pub async fn run_install(db: &Registry, cfg: &KegConfig, spec: &str, force: bool) -> Result<()> {
    let formula_dir = cfg.formula_dir()?;
    let path = formula::resolve(spec, &formula_dir)?;
    let f = Formula::load(&path)?;

    let installed_version = db.get(&f.name).await?.map(|r| r.version);
    let opts = InstallOptions {
        install_dir: cfg.install_dir()?,
        retry: cfg.retry_policy(),
        installed_version,
        force,
    };

    let pipeline_formula = f.clone();
    let artifact = tokio::task::spawn_blocking(move || install::run(&pipeline_formula, &opts))
        .await
        .context("install task panicked")?;

    let artifact = match artifact {
        Ok(a) => a,
        Err(e) => {
            let stage = e.stage();
            return Err(anyhow::Error::new(e).context(format!("install failed at stage {stage}")));
        }
    };

    db.record(&InstallRecord::from(&artifact)).await?;
    println!(
        "Installed {} {} -> {}",
        artifact.formula.name,
        artifact.formula.version,
        artifact.binary_path.display()
    );
    Ok(())
}
