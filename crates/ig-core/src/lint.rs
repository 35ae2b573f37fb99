//! Lint diagnostics for infographic documents.
//!
//! Reports invariant violations without modifying the document. The
//! mutation engine tolerates all of these; lint exists so callers can
//! surface them before a batch run.

use crate::geometry::MIN_OBJECT_SIZE;
use crate::id::ObjectId;
use crate::model::{Document, ObjectType};
use std::collections::HashMap;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Breaks generation or a document invariant.
    Warning,
    /// Legal but probably unintended.
    Info,
}

/// A single lint diagnostic.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// The object this refers to; `None` for frame-level findings.
    pub object_id: Option<ObjectId>,
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "missing-hero", "duplicate-key").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over the document and return diagnostics.
#[must_use]
pub fn lint_document(doc: &Document) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_hero_count(doc, &mut diags);
    lint_background_count(doc, &mut diags);
    lint_aspect_ratio(doc, &mut diags);
    lint_duplicate_keys(doc, &mut diags);
    lint_object_ranges(doc, &mut diags);
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn lint_hero_count(doc: &Document, diags: &mut Vec<LintDiagnostic>) {
    let heroes: Vec<_> = doc.objects.iter().filter(|o| o.is_hero()).collect();
    match heroes.as_slice() {
        [] => diags.push(LintDiagnostic {
            object_id: None,
            message: "Document has no hero image.".into(),
            severity: LintSeverity::Warning,
            rule: "missing-hero",
        }),
        [_] => {}
        [_, rest @ ..] => {
            for extra in rest {
                diags.push(LintDiagnostic {
                    object_id: Some(extra.id),
                    message: format!("Extra hero layer `{}`; only one is rendered as primary.", extra.name),
                    severity: LintSeverity::Warning,
                    rule: "multiple-hero",
                });
            }
        }
    }
}

fn lint_background_count(doc: &Document, diags: &mut Vec<LintDiagnostic>) {
    for extra in doc
        .objects
        .iter()
        .filter(|o| o.object_type() == ObjectType::Background)
        .skip(1)
    {
        diags.push(LintDiagnostic {
            object_id: Some(extra.id),
            message: format!("Extra background layer `{}`.", extra.name),
            severity: LintSeverity::Warning,
            rule: "multiple-background",
        });
    }
}

/// A named preset whose dimensions were edited independently.
fn lint_aspect_ratio(doc: &Document, diags: &mut Vec<LintDiagnostic>) {
    let frame = &doc.frame;
    if let Some((w, h)) = frame.aspect_ratio.preset_size()
        && (frame.width, frame.height) != (w, h)
    {
        diags.push(LintDiagnostic {
            object_id: None,
            message: format!(
                "Frame is tagged {} ({w}×{h}) but measures {}×{}.",
                frame.aspect_ratio.label(),
                frame.width,
                frame.height
            ),
            severity: LintSeverity::Info,
            rule: "aspect-mismatch",
        });
    }
}

/// Two text layers sharing a key share one table column.
fn lint_duplicate_keys(doc: &Document, diags: &mut Vec<LintDiagnostic>) {
    let mut seen: HashMap<&str, ObjectId> = HashMap::new();
    for obj in &doc.objects {
        let Some(text) = obj.as_text() else { continue };
        if let Some(first) = seen.get(text.key.as_str()) {
            diags.push(LintDiagnostic {
                object_id: Some(obj.id),
                message: format!(
                    "Text key `{}` is already used by {}; both layers read the same column.",
                    text.key, first
                ),
                severity: LintSeverity::Warning,
                rule: "duplicate-key",
            });
        } else {
            seen.insert(&text.key, obj.id);
        }
    }
}

fn lint_object_ranges(doc: &Document, diags: &mut Vec<LintDiagnostic>) {
    for obj in &doc.objects {
        if obj.width < MIN_OBJECT_SIZE || obj.height < MIN_OBJECT_SIZE {
            diags.push(LintDiagnostic {
                object_id: Some(obj.id),
                message: format!("`{}` is {}×{}, below the minimum size.", obj.name, obj.width, obj.height),
                severity: LintSeverity::Info,
                rule: "undersized",
            });
        }
        if !(0.0..=1.0).contains(&obj.opacity) {
            diags.push(LintDiagnostic {
                object_id: Some(obj.id),
                message: format!("`{}` has opacity {} outside 0..1.", obj.name, obj.opacity),
                severity: LintSeverity::Info,
                rule: "bad-opacity",
            });
        }
    }
}
