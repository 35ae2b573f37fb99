pub mod error;
pub mod geometry;
pub mod id;
pub mod lint;
pub mod model;
pub mod template;

pub use error::{CoreError, CoreResult};
pub use geometry::{Bounds, ImagePlacement, MIN_OBJECT_SIZE, place_image};
pub use id::ObjectId;
pub use lint::{LintDiagnostic, LintSeverity, lint_document};
pub use model::*;
pub use template::{TEMPLATE_VERSION, TemplateInfo, TemplatePayload};

// Re-export kurbo geometry types so downstream crates share one version.
pub use kurbo::{Point, Size, Vec2};
