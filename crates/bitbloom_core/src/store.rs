//! Filter files: the wire format on disk, published atomically.

use crate::errors::Result;
use crate::filter::BloomFilter;
use crate::hash::{Fingerprint, Xxh3Fingerprint};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn fsync_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;
    let f = std::fs::OpenOptions::new().read(true).custom_flags(libc::O_DIRECTORY).open(parent_dir(path))?;
    f.sync_all()
}
#[cfg(not(unix))]
fn fsync_dir(_path: &Path) -> std::io::Result<()> { Ok(()) }

impl<H: Fingerprint> BloomFilter<H> {
    /// Writes to a temp file next to `path`, syncs, then renames over `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut tmp = tempfile::Builder::new().prefix(".bitbloom_").tempfile_in(parent_dir(path))?;
        {
            let mut w = BufWriter::new(tmp.as_file_mut());
            self.write_to(&mut w)?;
            w.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;
        if let Err(e) = fsync_dir(path) {
            tracing::warn!(path = %path.display(), error = %e, "directory fsync failed");
        }
        tracing::debug!(path = %path.display(), bytes = self.serialized_len(), "bloom filter saved");
        Ok(())
    }

    pub fn open_with_hasher(path: impl AsRef<Path>, hasher: H) -> Result<Self> {
        let mut r = BufReader::new(File::open(path)?);
        Self::read_from_with_hasher(&mut r, hasher)
    }
}

impl BloomFilter<Xxh3Fingerprint> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_hasher(path, Xxh3Fingerprint)
    }
}
