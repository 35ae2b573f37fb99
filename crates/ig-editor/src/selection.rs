//! Canvas selection: an ordered list of object ids, or the Frame itself.

use ig_core::ObjectId;
use smallvec::SmallVec;

/// Wire value of the Frame selection sentinel.
pub const FRAME_ID: &str = "__FRAME__";

/// Current selection. Not persisted and not part of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Zero or more objects, in the order they were selected.
    Objects(SmallVec<[ObjectId; 4]>),
    /// The frame is selected (properties panel shows frame settings).
    Frame,
}

impl Default for Selection {
    fn default() -> Self {
        Self::Objects(SmallVec::new())
    }
}

impl Selection {
    pub fn single(id: ObjectId) -> Self {
        let mut ids = SmallVec::new();
        ids.push(id);
        Self::Objects(ids)
    }

    pub fn from_ids(ids: impl IntoIterator<Item = ObjectId>) -> Self {
        Self::Objects(ids.into_iter().collect())
    }

    /// Selected object ids; empty when nothing or the frame is selected.
    pub fn ids(&self) -> &[ObjectId] {
        match self {
            Self::Objects(ids) => ids.as_slice(),
            Self::Frame => &[],
        }
    }

    pub fn is_frame(&self) -> bool {
        matches!(self, Self::Frame)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Objects(ids) if ids.is_empty())
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.ids().contains(&id)
    }

    /// The one selected object, if exactly one is selected.
    pub fn only(&self) -> Option<ObjectId> {
        match self.ids() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Drop `id` from an object selection. Frame selection is unaffected.
    pub fn remove(&mut self, id: ObjectId) {
        if let Self::Objects(ids) = self {
            ids.retain(|i| *i != id);
        }
    }

    /// Add `id` if absent, remove it if present. Replaces a Frame selection.
    pub fn toggle(&mut self, id: ObjectId) {
        match self {
            Self::Objects(ids) => {
                if let Some(pos) = ids.iter().position(|i| *i == id) {
                    ids.remove(pos);
                } else {
                    ids.push(id);
                }
            }
            Self::Frame => *self = Self::single(id),
        }
    }

    /// Wire form: ids as strings, or `[FRAME_ID]`.
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            Self::Objects(ids) => ids.iter().map(|id| id.as_str().to_string()).collect(),
            Self::Frame => vec![FRAME_ID.to_string()],
        }
    }
}
