use showroom_common::{catalog::CatalogStore, config::Config, locale::LocaleTable, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// The static files of the site, on disk.
pub struct Site<'a> {
    root: PathBuf,
    pub config: &'a Config,
}

impl<'a> Site<'a> {
    pub fn new(root: PathBuf, config: &'a Config) -> Self {
        Site { root, config }
    }

    /// Site URLs are relative, so they map directly to paths under the root.
    pub fn path(&self, url: &str) -> PathBuf {
        self.root.join(url.trim_start_matches('/'))
    }

    fn read(&self, url: &str) -> Result<String> {
        let path = self.path(url);
        debug!("Reading {}", path.display());
        Ok(fs::read_to_string(path)?)
    }

    pub fn catalog(&self) -> Result<CatalogStore> {
        CatalogStore::from_json(&self.read(&self.config.catalog_url)?)
    }

    pub fn translations(&self) -> Result<LocaleTable> {
        LocaleTable::from_json(&self.read(&self.config.translations_url)?)
    }

    /// HTML files at the root and in the directory of the header fragment.
    pub fn markup_files(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = vec![self.root.clone()];
        if let Some(layout) = self.path(&self.config.header_url).parent() {
            if layout != self.root.as_path() {
                dirs.push(layout.to_path_buf());
            }
        }

        let mut files = Vec::new();
        for dir in dirs {
            if !dir.is_dir() {
                continue;
            }
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if is_html(&path) {
                    files.push(path);
                }
            }
        }
        files.sort();
        Ok(files)
    }
}

fn is_html(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("html"))
}
