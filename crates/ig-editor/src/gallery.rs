//! Source images and the application phase around them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One image of the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFile {
    /// Filesystem identity; also the table-data row key.
    pub path: String,
    pub name: String,
    /// Renderable source resolved by the host.
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppPhase {
    /// No working directory yet.
    #[default]
    Startup,
    /// Choosing which images take part in the batch.
    Gallery,
    Editor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTab {
    Gallery,
    #[default]
    Editor,
    Table,
}

/// What picking an image in the gallery overlay does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryMode {
    #[default]
    Select,
    /// Picking replaces the hero image.
    Replace,
}

/// The working directory: full path plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectory {
    pub path: String,
    pub name: String,
}

/// All images of the working directory plus the selected subset.
///
/// The selected set iterates in insertion order: `set_all` inserts in
/// listing order, later toggles append.
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    all: Vec<ImageFile>,
    selected: Vec<String>,
    lookup: HashSet<String>,
}

impl ImageSet {
    pub fn all(&self) -> &[ImageFile] {
        &self.all
    }

    /// Replace the listing and select every image.
    pub fn set_all(&mut self, images: Vec<ImageFile>) {
        self.all = images;
        self.select_all();
    }

    pub fn clear(&mut self) {
        self.all.clear();
        self.deselect_all();
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.lookup.contains(path)
    }

    pub fn toggle(&mut self, path: &str) {
        if self.lookup.remove(path) {
            self.selected.retain(|p| p != path);
        } else {
            self.lookup.insert(path.to_string());
            self.selected.push(path.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.all.iter().map(|img| img.path.clone()).collect();
        self.lookup = self.selected.iter().cloned().collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
        self.lookup.clear();
    }

    /// Selected paths in set iteration order.
    pub fn selected_paths(&self) -> &[String] {
        &self.selected
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected images in listing order.
    pub fn selected_images(&self) -> impl Iterator<Item = &ImageFile> {
        self.all.iter().filter(|img| self.lookup.contains(&img.path))
    }

    pub fn first_selected(&self) -> Option<&ImageFile> {
        self.selected_images().next()
    }
}
