//! `keg remove <name>` – delete an installed binary and its record.

use anyhow::Result;
use keg_core::registry::Registry;

pub async fn run_remove(db: &Registry, name: &str) -> Result<()> {
    let Some(rec) = db.get(name).await? else {
        anyhow::bail!("no installed artifact named {name:?}");
    };

    match std::fs::remove_file(&rec.binary_path) {
        Ok(()) => {}
        // Already gone is fine; the registry row is what's authoritative here.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("binary {} was already missing", rec.binary_path.display());
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("remove {}", rec.binary_path.display())));
        }
    }

    db.remove(name).await?;
    println!("Removed {} {}", rec.name, rec.version);
    Ok(())
}
