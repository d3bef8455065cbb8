//! Graph document to typed model and back.

mod context;
mod end_event;
mod gateway;
mod properties;
pub mod registry;
mod sequence_flow;
mod service_task;
mod start_event;
mod sub_process;
mod user_task;
mod walker;

pub use context::{
    ConversionContext, ConversionScope, GroupInfo, ModelInfo, RenderScope, UserInfo,
};
pub use registry::{ConverterRegistry, ElementConverter, RegistryBuilder};

use crate::config::ConverterConfig;
use crate::error::{ConversionError, ConversionWarning};
use crate::graph::GraphDocument;
use crate::model::ProcessDefinitionModel;
use std::sync::Arc;
use walker::GraphWalker;

/// A converted model together with the warnings recovered along the way.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub model: ProcessDefinitionModel,
    pub diagnostics: Vec<ConversionWarning>,
}

pub struct Converter {
    registry: Arc<ConverterRegistry>,
    config: ConverterConfig,
}

pub struct ConverterBuilder {
    registry: Option<RegistryBuilder>,
    config: ConverterConfig,
}

impl ConverterBuilder {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            registry: None,
            config,
        }
    }

    pub fn with_stencil_alias(mut self, custom_stencil: &str, builtin_stencil: &str) -> Self {
        let registry = self.registry.take().unwrap_or_default();
        self.registry = Some(registry.with_stencil_alias(custom_stencil, builtin_stencil));
        self
    }

    pub fn with_custom_converter(mut self, converter: Arc<dyn ElementConverter>) -> Self {
        let registry = self.registry.take().unwrap_or_default();
        self.registry = Some(registry.with_custom_converter(converter));
        self
    }

    pub fn build(self) -> Converter {
        let mut registry = self.registry;
        for (custom, builtin) in &self.config.stencil_aliases {
            registry = Some(
                registry
                    .unwrap_or_default()
                    .with_stencil_alias(custom, builtin),
            );
        }
        Converter {
            registry: registry
                .map(|builder| Arc::new(builder.build()))
                .unwrap_or_else(ConverterRegistry::shared),
            config: self.config,
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// A converter over the shared built-in registry with default settings.
    pub fn new() -> Self {
        ConverterBuilder::new(ConverterConfig::default()).build()
    }

    pub fn builder(config: ConverterConfig) -> ConverterBuilder {
        ConverterBuilder::new(config)
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Converts with an empty context: forms and identities resolve to their raw ids.
    pub fn to_typed_model(
        &self,
        document: &GraphDocument,
    ) -> Result<ProcessDefinitionModel, ConversionError> {
        self.to_typed_model_with(document, &ConversionContext::default())
            .map(|output| output.model)
    }

    pub fn to_typed_model_with_diagnostics(
        &self,
        document: &GraphDocument,
    ) -> Result<ConversionOutput, ConversionError> {
        self.to_typed_model_with(document, &ConversionContext::default())
    }

    /// Converts a whole document. Any terminal error discards everything built so far.
    pub fn to_typed_model_with(
        &self,
        document: &GraphDocument,
        context: &ConversionContext,
    ) -> Result<ConversionOutput, ConversionError> {
        let walker = GraphWalker::new(&self.registry, &self.config, context);
        let (model, diagnostics) = walker.to_model(document)?;
        if !diagnostics.is_empty() {
            log::info!(
                "Converted '{}' with {} recovered warnings",
                model.id,
                diagnostics.warnings().len()
            );
        }
        Ok(ConversionOutput {
            model,
            diagnostics: diagnostics.into_warnings(),
        })
    }

    /// Parses editor JSON and converts it.
    pub fn from_json(&self, json: &str) -> Result<ProcessDefinitionModel, ConversionError> {
        let document = GraphDocument::from_json(json)?;
        self.to_typed_model(&document)
    }

    pub fn to_graph_document(&self, model: &ProcessDefinitionModel) -> GraphDocument {
        self.to_graph_document_with(model, &ConversionContext::default())
    }

    pub fn to_graph_document_with(
        &self,
        model: &ProcessDefinitionModel,
        context: &ConversionContext,
    ) -> GraphDocument {
        GraphWalker::new(&self.registry, &self.config, context).to_document(model)
    }
}
