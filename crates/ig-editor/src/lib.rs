pub mod actions;
pub mod autosave;
pub mod config;
pub mod gallery;
pub mod generation;
pub mod host;
pub mod input;
pub mod persistence;
pub mod selection;
pub mod session;
pub mod shortcuts;
pub mod store;
pub mod table;
pub mod tools;
pub mod viewport;

pub use actions::EditorAction;
pub use config::{ConfigError, EditorConfig};
pub use gallery::{AppPhase, EditorTab, GalleryMode, ImageFile, ImageSet, WorkingDirectory};
pub use generation::{CpuInfo, GenerateRequest, GenerateResult, GenerationProgress};
pub use host::{ArtifactGenerator, Host, HostError, HostResult, ImageEntry, MediaSource, TemplateStorage};
pub use persistence::{PersistError, PersistResult, SharedStore, TemplatePersistence};
pub use selection::{FRAME_ID, Selection};
pub use session::{FALLBACK_FONTS, Session};
pub use store::{DocRevision, EditorStore, HorizontalAlignment, VerticalAlignment};
pub use tools::{SelectTool, hit_test};
