// crates/worldarea-core/src/layout.rs
use crate::error::Result;
use std::path::{Path, PathBuf};

pub const CSV_FILENAME: &str = "world_area_top20.csv";
pub const PNG_FILENAME: &str = "world_area.png";
pub const HTML_FILENAME: &str = "world_map.html";

/// Where a run writes its files.
///
/// ```text
/// <root>/world_area_top20.csv
/// <root>/figures/world_area.png
/// <root>/maps/world_map.html
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn figures_dir(&self) -> PathBuf {
        self.root.join("figures")
    }

    pub fn maps_dir(&self) -> PathBuf {
        self.root.join("maps")
    }

    pub fn csv_path(&self) -> PathBuf {
        self.root.join(CSV_FILENAME)
    }

    pub fn png_path(&self) -> PathBuf {
        self.figures_dir().join(PNG_FILENAME)
    }

    pub fn html_path(&self) -> PathBuf {
        self.maps_dir().join(HTML_FILENAME)
    }

    /// Creates the root and both subdirectories. Existing directories are
    /// left alone.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.root.clone(), self.figures_dir(), self.maps_dir()] {
            std::fs::create_dir_all(&dir)?;
            tracing::debug!("Output directory ready: {}", dir.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_the_fixed_layout() {
        let layout = OutputLayout::new("outputs");
        assert_eq!(layout.csv_path(), Path::new("outputs/world_area_top20.csv"));
        assert_eq!(layout.png_path(), Path::new("outputs/figures/world_area.png"));
        assert_eq!(layout.html_path(), Path::new("outputs/maps/world_map.html"));
    }

    #[test]
    fn ensure_dirs_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(tmp.path().join("nested").join("outputs"));

        layout.ensure_dirs().unwrap();
        assert!(layout.figures_dir().is_dir());
        assert!(layout.maps_dir().is_dir());

        std::fs::write(layout.csv_path(), "keep me").unwrap();
        layout.ensure_dirs().unwrap();
        assert_eq!(std::fs::read_to_string(layout.csv_path()).unwrap(), "keep me");
    }

    #[test]
    fn ensure_dirs_fails_when_root_is_a_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let layout = OutputLayout::new(tmp.path());
        assert!(layout.ensure_dirs().is_err());
    }
}
