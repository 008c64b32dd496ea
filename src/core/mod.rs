pub mod catalog;
pub mod error;
pub mod prompt;
pub mod render;
pub mod selection;
pub mod variation;

pub use error::SceneError;
pub use render::{Render, RenderImage, RenderKind};
pub use selection::SceneSelection;
