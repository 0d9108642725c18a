// Layout persistence: each layout is a JSON file holding its flat zone list.
// The edge graph is rebuilt on load and flattened again on save.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use zoner_core::{LayoutId, Zone, ZoneEngine};
use zoner_layout::EdgeLayout;

// ──────────────────────────────────────────────
// Serializable layout file
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub id: LayoutId,
    pub name: String,
    pub zones: Vec<Zone>,
}

impl LayoutFile {
    pub fn from_layout(layout: &EdgeLayout) -> Self {
        Self {
            id: layout.id,
            name: layout.name.clone(),
            zones: layout.zones(),
        }
    }

    pub fn into_layout(self) -> Result<EdgeLayout> {
        EdgeLayout::from_zones(self.id, self.name.clone(), &self.zones)
            .with_context(|| format!("layout `{}` is not a valid partition", self.name))
    }
}

// ──────────────────────────────────────────────
// Layout directory
// ──────────────────────────────────────────────

pub struct LayoutStore {
    root: PathBuf,
}

impl LayoutStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            root: config_dir.join("layouts"),
        }
    }

    /// A file name for `name` that no other layout is using yet.
    fn free_path(&self, name: &str) -> PathBuf {
        let stem: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
            .collect();
        let mut path = self.root.join(format!("{}.json", stem));
        let mut n = 2;
        while path.exists() {
            path = self.root.join(format!("{}-{}.json", stem, n));
            n += 1;
        }
        path
    }

    fn read(path: &Path) -> Result<LayoutFile> {
        let data =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
    }

    /// Every readable layout file, sorted by layout name. Files that do not
    /// parse are skipped with a warning.
    fn files(&self) -> Result<Vec<(PathBuf, LayoutFile)>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.root)
            .with_context(|| format!("listing {}", self.root.display()))?
        {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            match Self::read(&path) {
                Ok(file) => files.push((path, file)),
                Err(e) => log::warn!("skipping layout file: {:#}", e),
            }
        }
        files.sort_by(|a, b| a.1.name.cmp(&b.1.name));
        Ok(files)
    }

    fn find(&self, name: &str) -> Result<Option<(PathBuf, LayoutFile)>> {
        Ok(self.files()?.into_iter().find(|(_, file)| file.name == name))
    }

    pub fn load(&self, name: &str) -> Result<Option<EdgeLayout>> {
        match self.find(name)? {
            Some((_, file)) => file.into_layout().map(Some),
            None => Ok(None),
        }
    }

    /// Load a layout, or start a fresh single-zone one under that name with
    /// an id no saved layout uses.
    pub fn load_or_new(&self, name: &str) -> Result<EdgeLayout> {
        if let Some(layout) = self.load(name)? {
            return Ok(layout);
        }
        let id = self.files()?.iter().map(|(_, file)| file.id).max().unwrap_or(0) + 1;
        log::info!("creating layout `{}` (id {})", name, id);
        Ok(EdgeLayout::new(id, name))
    }

    pub fn save(&self, layout: &EdgeLayout) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("creating {}", self.root.display()))?;
        let path = match self.find(&layout.name)? {
            Some((path, _)) => path,
            None => self.free_path(&layout.name),
        };
        let json = serde_json::to_string_pretty(&LayoutFile::from_layout(layout))
            .context("serializing layout")?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        log::debug!("saved layout `{}` to {}", layout.name, path.display());
        Ok(())
    }

    /// Names of the saved layouts, as stored in the files.
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(self.files()?.into_iter().map(|(_, file)| file.name).collect())
    }
}
