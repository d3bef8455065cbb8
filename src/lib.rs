//! # procmodel - Process Graph Converter
//!
//! **procmodel** converts between the JSON graph a browser-based process editor
//! saves and a typed process-definition model an engine can deploy.
//!
//! ## Core Workflow
//!
//! 1.  **Parse**: Load the editor JSON into a [`graph::GraphDocument`]. Every
//!     property keeps its JSON shape as a [`graph::PropertyValue`].
//! 2.  **Normalize** (save path): [`normalizer::normalize_document`] rewrites
//!     date and time literals in flow conditions into comparable numbers.
//! 3.  **Convert**: A [`converter::Converter`] walks the shapes, dispatching each
//!     stencil to its registered converter, and produces a
//!     [`model::ProcessDefinitionModel`]. Recoverable problems come back as
//!     warnings; unknown stencils abort the whole conversion.
//! 4.  **Export or render**: Serialize the model with [`export::to_bpmn_xml`], or
//!     render it back into an editor document with
//!     [`converter::Converter::to_graph_document`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use procmodel::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = std::fs::read_to_string("process.json")?;
//!     let mut document = GraphDocument::from_json(&json)?;
//!     normalize_document(&mut document);
//!
//!     let converter = Converter::builder(ConverterConfig::default())
//!         .with_stencil_alias("ApprovalTask", "UserTask")
//!         .build();
//!     let output = converter.to_typed_model_with_diagnostics(&document)?;
//!     for warning in &output.diagnostics {
//!         println!("warning: {}", warning);
//!     }
//!
//!     println!("{}", to_bpmn_xml(&output.model)?);
//!     Ok(())
//! }
//! ```

pub mod assignment;
pub mod config;
pub mod converter;
pub mod error;
pub mod export;
pub mod graph;
pub mod model;
pub mod normalizer;
pub mod prelude;
pub mod service;
