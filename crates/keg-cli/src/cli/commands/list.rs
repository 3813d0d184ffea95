//! `keg list` – show installed artifacts from the registry.

use anyhow::Result;
use keg_core::registry::Registry;

pub async fn run_list(db: &Registry) -> Result<()> {
    let installs = db.list().await?;
    if installs.is_empty() {
        println!("Nothing installed.");
    } else {
        println!("{:<20} {:<12} {}", "NAME", "VERSION", "PATH");
        for rec in installs {
            println!(
                "{:<20} {:<12} {}",
                rec.name,
                rec.version.to_string(),
                rec.binary_path.display()
            );
        }
    }
    Ok(())
}
