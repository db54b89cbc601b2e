//! Visual definitions shared by diagram elements.

mod stroke;

pub use stroke::{StrokeDefinition, StrokeStyle};
