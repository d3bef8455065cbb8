//! The editor-side document: a tree of shapes with free-form property bags.

mod document;
mod property;
pub mod vocabulary;

pub use document::{GraphDocument, GraphNode, ShapeRef, Stencil};
pub use property::{MAX_DECODE_PASSES, PropertyMap, PropertyValue, Scalar};
