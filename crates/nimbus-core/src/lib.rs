//! Nimbus Core Types and Definitions
//!
//! This crate provides the foundational types for describing architecture
//! diagrams. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Draw**: Stroke definitions for edges ([`draw`] module)
//! - **Semantic**: The diagram model and its builder ([`semantic`] module)

pub mod color;
pub mod draw;
pub mod identifier;
pub mod semantic;
