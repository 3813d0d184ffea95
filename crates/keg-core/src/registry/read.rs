//! Registry read operations: get and list.

use anyhow::{Context, Result};
use semver::Version;
use sqlx::Row;
use std::path::PathBuf;

use super::db::Registry;
use super::types::InstallRecord;

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<InstallRecord> {
    let name: String = row.get("name");
    let version_str: String = row.get("version");
    let url: String = row.get("url");
    let sha256: String = row.get("sha256");
    let binary_path: String = row.get("binary_path");
    let installed_at: i64 = row.get("installed_at");

    let version = Version::parse(&version_str)
        .with_context(|| format!("registry row {name:?} has bad version {version_str:?}"))?;

    Ok(InstallRecord {
        name,
        version,
        url,
        sha256,
        binary_path: PathBuf::from(binary_path),
        installed_at,
    })
}

impl Registry {
    /// Fetch the record for one installed artifact, if present.
    pub async fn get(&self, name: &str) -> Result<Option<InstallRecord>> {
        let row = sqlx::query(
            r#"
            SELECT name, version, url, sha256, binary_path, installed_at
            FROM installs
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    /// List all installed artifacts, name sorted.
    pub async fn list(&self) -> Result<Vec<InstallRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT name, version, url, sha256, binary_path, installed_at
            FROM installs
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            out.push(record_from_row(row)?);
        }
        Ok(out)
    }
}
