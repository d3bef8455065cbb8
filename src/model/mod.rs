//! The engine-side model: typed elements with extension metadata.

mod definition;
mod element;
pub mod extension;

pub(crate) use definition::start_stencil;
pub use definition::{DEFAULT_PROCESS_ID, ProcessDefinitionModel};
pub use element::{
    BaseElement, ConditionOperand, ElementKind, EndEvent, EventDefinition, Gateway,
    SequenceFlow, ServiceImplementation, ServiceTask, StartEvent, SubProcess, TimerDefinition,
    TypedElement, UserTask,
};
pub use extension::{
    ExtensionAttribute, ExtensionElement, ExtensionElements, MODELER_NAMESPACE, MODELER_PREFIX,
};
