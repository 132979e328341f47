//! Scene description text format.
//!
//! Parsing happens in two passes over one input:
//!
//! - [`parser`] turns each directive line into a typed [`Statement`],
//!   rejecting unknown keywords, wrong field counts and bad numbers.
//! - [`loader`] folds statements into a validated [`crate::Scene`],
//!   tracking the current material and the required directives.
//!
//! # Example
//!
//! ```
//! use glint_core::format::load_scene;
//!
//! let scene = load_scene(
//!     "camera 0 0 5  0 0 0  0 1 0  45\n\
//!      resolution 32 24\n\
//!      material 0.1 0.1 0.1  0.7 0.7 0.7  1 1 1  50  0 0 0  1\n\
//!      sphere 0 0 0 1\n",
//! )
//! .unwrap();
//! assert_eq!(scene.primitive_count(), 1);
//! ```

pub mod loader;
pub mod parser;
pub mod types;

pub use loader::*;
pub use parser::*;
pub use types::*;
