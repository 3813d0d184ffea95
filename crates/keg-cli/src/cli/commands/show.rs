//! `keg show <formula>` – print parsed formula metadata.

use anyhow::Result;
use keg_core::config::KegConfig;
use keg_core::formula::{self, Formula};

pub fn run_show(cfg: &KegConfig, spec: &str) -> Result<()> {
    let formula_dir = cfg.formula_dir()?;
    let path = formula::resolve(spec, &formula_dir)?;
    let f = Formula::load(&path)?;

    println!("name:        {}", f.name);
    println!("description: {}", f.description);
    println!(
        "homepage:    {}",
        f.homepage.as_ref().map(|u| u.to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!("url:         {}", f.url);
    println!("version:     {}", f.version);
    println!("sha256:      {}", f.sha256);
    println!("binary:      {}", f.binary());
    Ok(())
}
