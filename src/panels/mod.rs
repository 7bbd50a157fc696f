mod controls;
mod notice;
mod toolbar;

pub use controls::{ViewportAction, viewport_controls};
pub use notice::{Notice, notice_window};
pub use toolbar::{ToolbarAction, ToolbarState, toolbar};
