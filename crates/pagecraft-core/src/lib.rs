//! PageCraft Core Library
//!
//! Platform-agnostic canvas editing engine for the PageCraft page builder: the element
//! model, drag/resize/marquee geometry, selection, linear undo history and shareable
//! snapshots.

pub mod canvas;
pub mod config;
pub mod document;
pub mod element;
pub mod geometry;
pub mod history;
pub mod input;
pub mod selection;
pub mod storage;
pub mod templates;

pub use canvas::Canvas;
pub use config::{CanvasConfig, DUPLICATE_OFFSET};
pub use document::{DEFAULT_BACKGROUND, Document, ParseColorError, parse_hex_color};
pub use element::{
    Element, ElementId, ElementKind, MIN_ELEMENT_EXTENT, ParseKindError, StyleMap, StyleValue,
    create_element,
};
pub use geometry::{ResizeDirection, compute_drag_position, compute_resize, intersects};
pub use history::{History, MAX_HISTORY};
pub use input::{InputState, KeyAction, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use selection::Selection;
pub use storage::{MemoryStorage, SharedDesign, Storage, StorageError, StorageResult};
pub use templates::{ParseTemplateError, Template};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
