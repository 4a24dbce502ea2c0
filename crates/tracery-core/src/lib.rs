//! Tracery Core Library
//!
//! Platform-agnostic model and logic for the Tracery drawing editor:
//! shapes, groups, selection, tools, the interaction controller and storage.

pub mod canvas;
pub mod config;
pub mod controller;
pub mod groups;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use canvas::Drawing;
pub use config::{ConfigError, EditorConfig};
pub use controller::{Controller, EditRequest, PressOutcome, ShapeProperties, UngroupOutcome};
pub use groups::{Group, GroupId, GroupRegistry};
pub use input::{Modifiers, PointerEvent};
pub use selection::{Emphasis, Highlight, Selection};
pub use shapes::{CornerStyle, NamedColor, Shape, ShapeId, ShapeKind};
pub use storage::{StorageError, StorageResult};
pub use tools::{PointerBinding, ToolKind, ToolManager, ToolState};
