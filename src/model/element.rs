use super::extension::ExtensionElements;
use crate::graph::PropertyValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields shared by every typed element.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BaseElement {
    /// Process-unique id: the shape's override id, or its resource id.
    pub id: String,
    pub resource_id: String,
    pub name: Option<String>,
    pub documentation: Option<String>,
    pub extensions: ExtensionElements,
}

impl BaseElement {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            resource_id: id.clone(),
            id,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TimerDefinition {
    pub time_date: Option<String>,
    pub time_duration: Option<String>,
    pub time_cycle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EventDefinition {
    Timer(TimerDefinition),
    Error { error_ref: Option<String> },
    Message { message_ref: Option<String> },
    Signal { signal_ref: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StartEvent {
    pub base: BaseElement,
    pub initiator: Option<String>,
    pub form_key: Option<String>,
    pub event_definitions: Vec<EventDefinition>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EndEvent {
    pub base: BaseElement,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UserTask {
    pub base: BaseElement,
    pub assignee: Option<String>,
    pub candidate_users: Vec<String>,
    pub candidate_groups: Vec<String>,
    pub form_key: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ServiceImplementation {
    Class(String),
    Expression(String),
    DelegateExpression(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ServiceTask {
    pub base: BaseElement,
    pub implementation: Option<ServiceImplementation>,
    pub result_variable: Option<String>,
    pub asynchronous: bool,
}

/// One `{key, symbol, value}` comparison behind a flow condition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConditionOperand {
    pub key: String,
    pub symbol: String,
    pub value: String,
}

impl ConditionOperand {
    pub fn new(key: impl Into<String>, symbol: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            symbol: symbol.into(),
            value: value.into(),
        }
    }

    /// The `key + symbol + value` token as it appears in an expression.
    pub fn token(&self) -> String {
        format!("{}{}{}", self.key, self.symbol, self.value)
    }

    /// Reads one operand object. Missing fields read as empty text.
    pub fn from_property(value: &PropertyValue) -> Option<Self> {
        value.as_object()?;
        let field = |name: &str| {
            value
                .get(name)
                .and_then(PropertyValue::as_text)
                .unwrap_or_default()
        };
        Some(Self::new(field("key"), field("symbol"), field("value")))
    }

    pub fn to_property(&self) -> PropertyValue {
        PropertyValue::object([
            ("key", PropertyValue::text(&self.key)),
            ("symbol", PropertyValue::text(&self.symbol)),
            ("value", PropertyValue::text(&self.value)),
        ])
    }

    /// Usable for condition-key collection: key and value are both non-blank.
    pub fn is_complete(&self) -> bool {
        !self.key.trim().is_empty() && !self.value.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SequenceFlow {
    pub base: BaseElement,
    pub source_ref: String,
    pub target_ref: String,
    pub condition_expression: Option<String>,
    pub operands: Vec<ConditionOperand>,
    /// The editor held the condition as an `{expression, data}` object, even with no operands.
    pub structured_condition: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Gateway {
    pub base: BaseElement,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SubProcess {
    pub base: BaseElement,
    pub elements: Vec<TypedElement>,
}

/// The closed set of element kinds the converter produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum TypedElement {
    StartEvent(StartEvent),
    EndEvent(EndEvent),
    UserTask(UserTask),
    ServiceTask(ServiceTask),
    SequenceFlow(SequenceFlow),
    ExclusiveGateway(Gateway),
    ParallelGateway(Gateway),
    SubProcess(SubProcess),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    StartEvent,
    EndEvent,
    UserTask,
    ServiceTask,
    SequenceFlow,
    ExclusiveGateway,
    ParallelGateway,
    SubProcess,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::StartEvent => "start event",
            ElementKind::EndEvent => "end event",
            ElementKind::UserTask => "user task",
            ElementKind::ServiceTask => "service task",
            ElementKind::SequenceFlow => "sequence flow",
            ElementKind::ExclusiveGateway => "exclusive gateway",
            ElementKind::ParallelGateway => "parallel gateway",
            ElementKind::SubProcess => "sub-process",
        };
        f.write_str(name)
    }
}

impl TypedElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            TypedElement::StartEvent(_) => ElementKind::StartEvent,
            TypedElement::EndEvent(_) => ElementKind::EndEvent,
            TypedElement::UserTask(_) => ElementKind::UserTask,
            TypedElement::ServiceTask(_) => ElementKind::ServiceTask,
            TypedElement::SequenceFlow(_) => ElementKind::SequenceFlow,
            TypedElement::ExclusiveGateway(_) => ElementKind::ExclusiveGateway,
            TypedElement::ParallelGateway(_) => ElementKind::ParallelGateway,
            TypedElement::SubProcess(_) => ElementKind::SubProcess,
        }
    }

    pub fn base(&self) -> &BaseElement {
        match self {
            TypedElement::StartEvent(e) => &e.base,
            TypedElement::EndEvent(e) => &e.base,
            TypedElement::UserTask(e) => &e.base,
            TypedElement::ServiceTask(e) => &e.base,
            TypedElement::SequenceFlow(e) => &e.base,
            TypedElement::ExclusiveGateway(e) | TypedElement::ParallelGateway(e) => &e.base,
            TypedElement::SubProcess(e) => &e.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseElement {
        match self {
            TypedElement::StartEvent(e) => &mut e.base,
            TypedElement::EndEvent(e) => &mut e.base,
            TypedElement::UserTask(e) => &mut e.base,
            TypedElement::ServiceTask(e) => &mut e.base,
            TypedElement::SequenceFlow(e) => &mut e.base,
            TypedElement::ExclusiveGateway(e) | TypedElement::ParallelGateway(e) => &mut e.base,
            TypedElement::SubProcess(e) => &mut e.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn extensions(&self) -> &ExtensionElements {
        &self.base().extensions
    }
}
