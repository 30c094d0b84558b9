//! Terminal rendering.

pub mod dino_scene;
pub mod layout;
pub mod terminal_canvas;

pub use dino_scene::{render_dino_scene, SceneOptions};
pub use terminal_canvas::TerminalCanvas;
