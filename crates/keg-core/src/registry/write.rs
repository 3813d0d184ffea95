//! Registry write operations: record and remove.

use anyhow::Result;

use super::db::Registry;
use super::types::InstallRecord;

impl Registry {
    /// Record a completed install. An existing row for the same name is
    /// replaced; the registry keeps current state, not history.
    pub async fn record(&self, rec: &InstallRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO installs (name, version, url, sha256, binary_path, installed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(name) DO UPDATE SET
                version = excluded.version,
                url = excluded.url,
                sha256 = excluded.sha256,
                binary_path = excluded.binary_path,
                installed_at = excluded.installed_at
            "#,
        )
        .bind(&rec.name)
        .bind(rec.version.to_string())
        .bind(&rec.url)
        .bind(&rec.sha256)
        .bind(rec.binary_path.to_string_lossy().into_owned())
        .bind(rec.installed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove the record for `name`. Returns true if a row was deleted.
    /// File cleanup is handled by the caller.
    pub async fn remove(&self, name: &str) -> Result<bool> {
        let r = sqlx::query(
            r#"
            DELETE FROM installs
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(r.rows_affected() > 0)
    }
}
