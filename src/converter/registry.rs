use super::context::{ConversionScope, RenderScope};
use super::{end_event, gateway, sequence_flow, service_task, start_event, sub_process, user_task};
use crate::error::ConversionError;
use crate::graph::GraphNode;
use crate::graph::vocabulary::stencil;
use crate::model::{ElementKind, TypedElement};
use ahash::AHashMap;
use std::sync::{Arc, OnceLock};

/// Converts one editor shape into a typed element.
///
/// Implementations must be pure with respect to the shape: everything else
/// they need comes through the scope.
pub trait ElementConverter: Send + Sync {
    fn stencil_id(&self) -> &str;
    fn element_kind(&self) -> ElementKind;
    fn to_typed(
        &self,
        node: &GraphNode,
        scope: &mut ConversionScope<'_>,
    ) -> Result<TypedElement, ConversionError>;
}

/// Master macro to define the built-in converters and their registration.
macro_rules! define_element_converters {
    ( $( ($struct_name:ident, $stencil:expr, $kind:ident, $parse:path) ),* $(,)? ) => {
        $(
            struct $struct_name;
            impl ElementConverter for $struct_name {
                fn stencil_id(&self) -> &str { $stencil }
                fn element_kind(&self) -> ElementKind { ElementKind::$kind }
                fn to_typed(&self, node: &GraphNode, scope: &mut ConversionScope<'_>) -> Result<TypedElement, ConversionError> {
                    $parse(node, $stencil, scope)
                }
            }
        )*

        fn register_default_converters(registry: &mut AHashMap<String, Arc<dyn ElementConverter>>) {
            $( registry.insert($stencil.to_string(), Arc::new($struct_name)); )*
        }

        fn create_converter_by_name(name: &str) -> Option<Arc<dyn ElementConverter>> {
            $( if name == $stencil { return Some(Arc::new($struct_name)); } )*
            None
        }
    };
}

define_element_converters! {
    (StartNoneConverter, stencil::START_NONE, StartEvent, start_event::from_graph),
    (StartTimerConverter, stencil::START_TIMER, StartEvent, start_event::from_graph),
    (StartErrorConverter, stencil::START_ERROR, StartEvent, start_event::from_graph),
    (StartMessageConverter, stencil::START_MESSAGE, StartEvent, start_event::from_graph),
    (StartSignalConverter, stencil::START_SIGNAL, StartEvent, start_event::from_graph),
    (EndNoneConverter, stencil::END_NONE, EndEvent, end_event::from_graph),
    (UserTaskConverter, stencil::USER_TASK, UserTask, user_task::from_graph),
    (ServiceTaskConverter, stencil::SERVICE_TASK, ServiceTask, service_task::from_graph),
    (SequenceFlowConverter, stencil::SEQUENCE_FLOW, SequenceFlow, sequence_flow::from_graph),
    (ExclusiveGatewayConverter, stencil::EXCLUSIVE_GATEWAY, ExclusiveGateway, gateway::from_graph),
    (ParallelGatewayConverter, stencil::PARALLEL_GATEWAY, ParallelGateway, gateway::from_graph),
    (SubProcessConverter, stencil::SUB_PROCESS, SubProcess, sub_process::from_graph),
}

/// Stencil id to converter. Read-only once built.
pub struct ConverterRegistry {
    converters: AHashMap<String, Arc<dyn ElementConverter>>,
}

impl ConverterRegistry {
    /// The built-in registry, built on first use and shared process-wide.
    pub fn shared() -> Arc<ConverterRegistry> {
        static SHARED: OnceLock<Arc<ConverterRegistry>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(RegistryBuilder::new().build()))
            .clone()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn lookup(&self, stencil_id: &str) -> Option<&dyn ElementConverter> {
        self.converters.get(stencil_id).map(|converter| converter.as_ref())
    }

    pub fn stencil_ids(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }

    /// Renders a typed element back to a shape, without its children.
    pub fn render(&self, element: &TypedElement, scope: &RenderScope<'_>) -> GraphNode {
        match element {
            TypedElement::StartEvent(event) => start_event::to_graph(event, scope),
            TypedElement::EndEvent(event) => end_event::to_graph(event, scope),
            TypedElement::UserTask(task) => user_task::to_graph(task, scope),
            TypedElement::ServiceTask(task) => service_task::to_graph(task, scope),
            TypedElement::SequenceFlow(flow) => sequence_flow::to_graph(flow, scope),
            TypedElement::ExclusiveGateway(element) => {
                gateway::to_graph(element, stencil::EXCLUSIVE_GATEWAY, scope)
            }
            TypedElement::ParallelGateway(element) => {
                gateway::to_graph(element, stencil::PARALLEL_GATEWAY, scope)
            }
            TypedElement::SubProcess(sub_process) => sub_process::to_graph(sub_process, scope),
        }
    }
}

pub struct RegistryBuilder {
    converters: AHashMap<String, Arc<dyn ElementConverter>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        let mut converters: AHashMap<String, Arc<dyn ElementConverter>> = AHashMap::new();
        register_default_converters(&mut converters);
        Self { converters }
    }

    /// Routes a custom stencil id through a built-in converter.
    pub fn with_stencil_alias(mut self, custom_stencil: &str, builtin_stencil: &str) -> Self {
        match create_converter_by_name(builtin_stencil) {
            Some(converter) => {
                self.converters.insert(custom_stencil.to_string(), converter);
            }
            None => log::warn!(
                "Cannot alias '{custom_stencil}': '{builtin_stencil}' is not a built-in stencil"
            ),
        }
        self
    }

    pub fn with_custom_converter(mut self, converter: Arc<dyn ElementConverter>) -> Self {
        self.converters
            .insert(converter.stencil_id().to_string(), converter);
        self
    }

    pub fn build(self) -> ConverterRegistry {
        ConverterRegistry {
            converters: self.converters,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
