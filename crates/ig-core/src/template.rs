//! Template payload codec.
//!
//! A template file is a JSON blob:
//! `{version, name, createdAt, frame, objects, tableData}`. The storage
//! collaborator treats it as opaque text; only this module knows its shape.

use crate::error::{CoreError, CoreResult};
use crate::model::{CanvasObject, Document, Frame, TableData};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Newest payload revision this build reads and the one it writes.
pub const TEMPLATE_VERSION: u32 = 1;

/// Template metadata as listed by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub name: String,
    pub path: String,
    #[serde(default, alias = "created_at")]
    pub created_at: String,
}

/// The persisted template payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    pub frame: Frame,
    #[serde(default)]
    pub objects: Vec<CanvasObject>,
    #[serde(default)]
    pub table_data: TableData,
}

fn default_version() -> u32 {
    TEMPLATE_VERSION
}

/// Current UTC time in the `createdAt` format (RFC 3339, milliseconds, `Z`).
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl TemplatePayload {
    /// Snapshot `doc` under `name`, stamped with `created_at`.
    pub fn from_document(name: impl Into<String>, doc: &Document, created_at: String) -> Self {
        Self {
            version: TEMPLATE_VERSION,
            name: name.into(),
            created_at,
            frame: doc.frame.clone(),
            objects: doc.objects.clone(),
            table_data: doc.table_data.clone(),
        }
    }

    pub fn encode(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(CoreError::Encode)
    }

    /// Parse a payload, rejecting versions newer than `TEMPLATE_VERSION`.
    pub fn decode(json: &str) -> CoreResult<Self> {
        let payload: Self = serde_json::from_str(json).map_err(CoreError::Decode)?;
        if payload.version > TEMPLATE_VERSION {
            return Err(CoreError::UnsupportedVersion {
                found: payload.version,
                supported: TEMPLATE_VERSION,
            });
        }
        log::debug!(
            "decoded template `{}` ({} objects, {} table rows)",
            payload.name,
            payload.objects.len(),
            payload.table_data.len()
        );
        Ok(payload)
    }

    pub fn into_document(self) -> Document {
        Document {
            frame: self.frame,
            objects: self.objects,
            table_data: self.table_data,
        }
    }
}
