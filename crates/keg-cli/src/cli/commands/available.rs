//! `keg available` – list formulas in the formula directory.

use anyhow::Result;
use keg_core::config::KegConfig;
use keg_core::formula;

pub fn run_available(cfg: &KegConfig) -> Result<()> {
    let dir = cfg.formula_dir()?;
    let names = formula::list_formulas(&dir)?;
    if names.is_empty() {
        println!("No formulas under {}.", dir.display());
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}
