use thiserror::Error;

/// Terminal errors that abort a whole document conversion.
///
/// No partial model is ever returned alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Failed to parse graph JSON: {0}")]
    JsonParse(String),

    #[error("No converter is registered for stencil '{0}'")]
    UnknownElementType(String),

    #[error("Shape '{resource_id}' has no stencil id")]
    MissingStencil { resource_id: String },

    #[error("A shape with stencil '{stencil}' is missing its resource id")]
    MissingIdentifier { stencil: String },
}

/// Problems that are recovered locally. The converter substitutes a default and
/// keeps going, since editor documents are user-authored and may be partially invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionWarning {
    #[error(
        "Property '{property}' on '{element_id}' should be {expected} but was {found}; using a default"
    )]
    MalformedProperty {
        element_id: String,
        property: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Literal '{literal}' looks like a {shape} but could not be parsed; left unchanged")]
    LiteralParseFailure { literal: String, shape: &'static str },

    #[error("Assignment on '{element_id}' mixes static and directory-bound shapes; using {chosen}")]
    AssignmentAmbiguous {
        element_id: String,
        chosen: &'static str,
    },
}

/// Collects recovered warnings during one conversion call and mirrors them to the log.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<ConversionWarning>,
}

impl Diagnostics {
    pub fn report(&mut self, warning: ConversionWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[ConversionWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<ConversionWarning> {
        self.warnings
    }
}

/// Errors raised while serializing a typed model to BPMN XML.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write XML: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Errors raised while loading a `ConverterConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid converter config: {0}")]
    Parse(String),
}

/// Errors surfaced by the model editing entry points in `service`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Model '{0}' not found")]
    ModelNotFound(String),

    #[error("Model with provided key already exists: {0}")]
    KeyAlreadyExists(String),

    #[error("A save-as request for model '{0}' needs a new model name")]
    MissingSaveAsName(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Model storage failed: {0}")]
    Storage(String),

    #[error("Deployment failed: {0}")]
    Deployment(String),
}
