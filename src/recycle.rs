use std::path::Path;

/// Recoverable deletion of user icon files.
pub trait RecycleBin: Send + Sync {
    fn recycle(&self, path: &Path) -> anyhow::Result<()>;
}

/// Moves files to the desktop trash.
pub struct SystemRecycleBin;

impl RecycleBin for SystemRecycleBin {
    fn recycle(&self, path: &Path) -> anyhow::Result<()> {
        ::trash::delete(path)?;
        Ok(())
    }
}
