//! String-in, string-out entry points.
//!
//! These take the scene text by reference and return owned output, so no
//! borrow of the caller's data outlives the call.

use glint_core::{load_scene, LoadError};
use thiserror::Error;

use crate::encode::{encode_png, to_base64, EncodeError};
use crate::renderer::{render, RenderConfig};

/// Errors that can occur while turning scene text into an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Render scene text to PNG bytes.
pub fn render_scene_png(text: &str, config: &RenderConfig) -> Result<Vec<u8>, RenderError> {
    let scene = load_scene(text)?;
    let image = render(&scene, config);
    Ok(encode_png(&image)?)
}

/// Render scene text to a base64-encoded PNG.
///
/// Nothing is rendered unless the whole scene loads.
///
/// # Example
///
/// ```
/// let png = glint_renderer::render_scene("camera 0 0 5 0 0 0 0 1 0 45\nresolution 2 2\n").unwrap();
/// assert!(png.starts_with("iVBORw0KGgo"));
/// ```
pub fn render_scene(text: &str) -> Result<String, RenderError> {
    let png = render_scene_png(text, &RenderConfig::default())?;
    Ok(to_base64(&png))
}
