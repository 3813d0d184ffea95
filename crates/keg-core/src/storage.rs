//! Disk I/O and artifact file lifecycle.
//!
//! Downloads are staged in a `.part` file and only moved into place after
//! verification. The final placement copies into the destination directory
//! under a `.part` name, fsyncs, then renames, so a crash never leaves a
//! half-written binary at the install path.

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the staging file: appends `.part` to the final path
/// (e.g. `janus.tar.gz` to `janus.tar.gz.part`).
pub fn staging_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Sequential writer for a staged download. Clones share the same file,
/// which lets the curl write callback own one handle while the pipeline
/// keeps another.
#[derive(Clone)]
pub struct StagingFile {
    file: Arc<File>,
    path: PathBuf,
}

impl StagingFile {
    /// Create (or truncate) the staging file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(StagingFile {
            file: Arc::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Append `data` at the current position.
    pub fn append(&self, data: &[u8]) -> io::Result<()> {
        (&*self.file).write_all(data)
    }

    /// Truncate back to empty. Used when a download attempt is retried so
    /// stale bytes from the failed attempt can't survive into the next one.
    pub fn rewind(&self) -> io::Result<()> {
        self.file.set_len(0)?;
        (&*self.file).seek(SeekFrom::Start(0))?;
        Ok(())
    }

    /// Sync file data to disk. Call before verifying for durability.
    pub fn sync(&self) -> io::Result<()> {
        self.file.sync_all()
    }

    /// Bytes currently staged.
    pub fn len(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    pub fn is_empty(&self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Path to the staging file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Copy `src` to `dest` with the given Unix mode, atomically with respect to
/// `dest`: the bytes land in `dest.part` first, are fsynced, then renamed.
/// Overwrites an existing file at `dest` (version upgrades replace the
/// installed binary).
pub fn install_file(src: &Path, dest: &Path, mode: u32) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = staging_path(dest);
    std::fs::copy(src, &tmp)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    File::open(&tmp)?.sync_all()?;
    std::fs::rename(&tmp, dest)?;
    Ok(())
}
