//! Prelude module for convenient imports
//!
//! Re-exports the types most callers need to parse, convert and export a process.
//!
//! ```rust,no_run
//! use procmodel::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let model = Converter::new().from_json(&std::fs::read_to_string("process.json")?)?;
//! println!("{} elements", model.iter_elements().len());
//! # Ok(())
//! # }
//! ```

// Conversion
pub use crate::config::{ConverterConfig, ServiceDelegatePolicy};
pub use crate::converter::{ConversionContext, ConversionOutput, Converter, ElementConverter};

// Editor graph and typed model
pub use crate::graph::{GraphDocument, GraphNode, PropertyValue};
pub use crate::model::{ExtensionElements, ProcessDefinitionModel, TypedElement};

// Save and load passes
pub use crate::normalizer::{editor_view, normalize_document};

// Output
pub use crate::export::to_bpmn_xml;

// Error types
pub use crate::error::{ConversionError, ConversionWarning, ExportError, ServiceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
