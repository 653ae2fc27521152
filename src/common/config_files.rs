use std::path::{Path, PathBuf};

/// Resolve `relative_path` against the directory holding the settings file.
/// Absolute paths are returned unchanged.
pub fn resolve_config_path(settings_path: &Path, relative_path: &str) -> PathBuf {
    let base_dir = settings_path.parent().unwrap_or_else(|| Path::new("."));
    base_dir.join(relative_path)
}

/// The directory used when no settings path is given on the command line.
pub fn default_config_dir() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("websearch"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::{default_config_dir, resolve_config_path};
    use std::path::Path;

    #[test]
    fn resolves_path_relative_to_settings_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings_path = dir.path().join("settings.json");
        let resolved = resolve_config_path(&settings_path, "configs/engines.json");
        assert_eq!(
            resolved,
            dir.path().join(Path::new("configs").join("engines.json"))
        );
    }

    #[test]
    fn keeps_absolute_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let absolute = dir.path().join("elsewhere.json");
        let resolved = resolve_config_path(Path::new("settings.json"), absolute.to_str().unwrap());
        assert_eq!(resolved, absolute);
    }

    #[test]
    fn default_dir_is_named_after_crate() {
        let dir = default_config_dir();
        assert!(dir.ends_with("websearch") || dir == Path::new("."));
    }
}
