//! Batch table coordinator.
//!
//! One row per selected image (keyed by path), one column per visible text
//! layer (keyed by the layer's `key`). Cells are created lazily with the
//! layer's content and are never overwritten by initialization.

use crate::store::EditorStore;
use serde::Serialize;

/// One rendered table row: the image and a value per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRowView {
    pub path: String,
    pub name: String,
    /// Cell values in column order.
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub key: String,
    pub value: String,
    /// The value is the layer's content, not a stored override.
    pub placeholder: bool,
}

impl EditorStore {
    /// Ensure a row for every selected image and a cell for every visible
    /// text layer in it. Absent cells default to the layer's content;
    /// present cells are left as they are.
    pub fn initialize_table_data(&mut self) {
        let columns: Vec<(String, String)> = self
            .doc
            .visible_text_layers()
            .map(|(_, text)| (text.key.clone(), text.content.clone()))
            .collect();

        let mut changed = false;
        for path in self.images.selected_paths() {
            let row = self.doc.table_data.entry(path.clone()).or_insert_with(|| {
                changed = true;
                Default::default()
            });
            for (key, content) in &columns {
                if !row.contains_key(key) {
                    row.insert(key.clone(), content.clone());
                    changed = true;
                }
            }
        }
        if changed {
            self.table_changed();
        }
    }

    /// Write a single cell, creating the row if needed.
    pub fn set_table_text_value(&mut self, image_path: &str, key: &str, value: impl Into<String>) {
        let value = value.into();
        let row = self.doc.table_data.entry(image_path.to_string()).or_default();
        if row.get(key) != Some(&value) {
            row.insert(key.to_string(), value);
            self.table_changed();
        }
    }

    /// Fill a column from a newline-delimited block (one trimmed line per
    /// image).
    pub fn set_table_text_column(&mut self, key: &str, block: &str) {
        let values: Vec<String> = block.split('\n').map(|line| line.trim().to_string()).collect();
        self.set_table_text_column_values(key, values);
    }

    /// Assign `values[i]` to the `i`-th selected image, in the selected
    /// set's iteration order. Images past the end of `values` are untouched.
    pub fn set_table_text_column_values(&mut self, key: &str, values: Vec<String>) {
        let paths: Vec<String> = self.images.selected_paths().to_vec();
        let mut changed = false;
        for (path, value) in paths.into_iter().zip(values) {
            let row = self.doc.table_data.entry(path).or_default();
            if row.get(key) != Some(&value) {
                row.insert(key.to_string(), value);
                changed = true;
            }
        }
        if changed {
            self.table_changed();
        }
    }

    /// Column keys: visible text layers in layer order.
    pub fn table_columns(&self) -> Vec<String> {
        self.doc
            .visible_text_layers()
            .map(|(_, text)| text.key.clone())
            .collect()
    }

    /// Rows for the selected images in listing order. Missing cells show
    /// the layer's content as a placeholder.
    pub fn table_rows(&self) -> Vec<TableRowView> {
        let layers: Vec<_> = self.doc.visible_text_layers().map(|(_, t)| t).collect();
        self.images
            .selected_images()
            .map(|image| {
                let stored = self.doc.table_data.get(&image.path);
                let cells = layers
                    .iter()
                    .map(|text| match stored.and_then(|row| row.get(&text.key)) {
                        Some(value) => TableCell {
                            key: text.key.clone(),
                            value: value.clone(),
                            placeholder: false,
                        },
                        None => TableCell {
                            key: text.key.clone(),
                            value: text.content.clone(),
                            placeholder: true,
                        },
                    })
                    .collect();
                TableRowView {
                    path: image.path.clone(),
                    name: image.name.clone(),
                    cells,
                }
            })
            .collect()
    }

    /// Drop rows of images that are no longer selected. Returns how many
    /// rows were removed.
    pub fn prune_table_data(&mut self) -> usize {
        let before = self.doc.table_data.len();
        let images = &self.images;
        self.doc.table_data.retain(|path, _| images.is_selected(path));
        let removed = before - self.doc.table_data.len();
        if removed > 0 {
            log::debug!("pruned {removed} stale table rows");
            self.table_changed();
        }
        removed
    }
}
