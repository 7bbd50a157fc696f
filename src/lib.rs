#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod diagram;
pub mod error;
pub mod event;
pub mod export;
pub mod geometry;
pub mod id_generator;
pub mod panels;
pub mod persistence;
pub mod selection;

pub use app::{FlowchartApp, Preferences};
pub use canvas::Canvas;
pub use config::EditorConfig;
pub use controller::EditorController;
pub use diagram::{Diagram, Edge, EdgeId, EdgeStyle, Node, NodeId};
pub use event::{CanvasEvent, EventHandler};
pub use persistence::{DiagramStore, MemoryStorage, PersistenceError};
