//! Semantic diagram model types.
//!
//! This module contains the in-memory description of an architecture
//! diagram: labeled nodes, the cluster tree that groups them and the styled
//! edges between them. It is deliberately free of any rendering concern; the
//! `nimbus` crate turns a [`Diagram`] into DOT source or an image.
//!
//! # Pipeline Position
//!
//! ```text
//! DiagramBuilder (explicit cluster handles)
//!     ↓ build
//! Semantic Model (these types) - validated references, immutable
//!     ↓ export
//! DOT source
//!     ↓ layout engine (Graphviz or built-in)
//! PNG / SVG / PDF / ...
//! ```
//!
//! # Organization
//!
//! - [`builder`] - [`DiagramBuilder`] and the handles it hands out
//! - [`diagram`] - [`Diagram`], [`Direction`], [`CurveStyle`]
//! - [`element`] - [`Node`], [`Cluster`], [`Edge`] and their attributes

pub mod builder;
pub mod diagram;
pub mod element;

pub use builder::*;
pub use diagram::*;
pub use element::*;
