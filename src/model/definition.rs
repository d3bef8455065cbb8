use super::element::{SequenceFlow, StartEvent, TypedElement};
use crate::graph::vocabulary::stencil;
use serde::Serialize;

/// Default process id when the document carries none.
pub const DEFAULT_PROCESS_ID: &str = "process";

/// A typed, engine-ready process definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessDefinitionModel {
    pub id: String,
    pub name: Option<String>,
    pub documentation: Option<String>,
    pub elements: Vec<TypedElement>,
}

impl Default for ProcessDefinitionModel {
    fn default() -> Self {
        Self {
            id: DEFAULT_PROCESS_ID.to_string(),
            name: None,
            documentation: None,
            elements: Vec::new(),
        }
    }
}

impl ProcessDefinitionModel {
    /// Every element, sub-process contents included, parents first.
    pub fn iter_elements(&self) -> Vec<&TypedElement> {
        fn walk<'a>(elements: &'a [TypedElement], out: &mut Vec<&'a TypedElement>) {
            for element in elements {
                out.push(element);
                if let TypedElement::SubProcess(sub) = element {
                    walk(&sub.elements, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.elements, &mut out);
        out
    }

    pub fn find(&self, id: &str) -> Option<&TypedElement> {
        self.iter_elements().into_iter().find(|e| e.id() == id)
    }

    pub fn sequence_flows(&self) -> Vec<&SequenceFlow> {
        self.iter_elements()
            .into_iter()
            .filter_map(|e| match e {
                TypedElement::SequenceFlow(flow) => Some(flow),
                _ => None,
            })
            .collect()
    }

    /// The top-level start event that owns process-wide data.
    ///
    /// A none start event wins over typed start events.
    pub fn primary_start_event(&self) -> Option<&StartEvent> {
        let index = self.primary_start_index()?;
        match &self.elements[index] {
            TypedElement::StartEvent(start) => Some(start),
            _ => None,
        }
    }

    pub fn primary_start_event_mut(&mut self) -> Option<&mut StartEvent> {
        let index = self.primary_start_index()?;
        match &mut self.elements[index] {
            TypedElement::StartEvent(start) => Some(start),
            _ => None,
        }
    }

    fn primary_start_index(&self) -> Option<usize> {
        let starts: Vec<(usize, &StartEvent)> = self
            .elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| match e {
                TypedElement::StartEvent(start) => Some((i, start)),
                _ => None,
            })
            .collect();
        starts
            .iter()
            .find(|(_, start)| start.event_definitions.is_empty())
            .or_else(|| starts.first())
            .map(|(i, _)| *i)
    }
}

/// Stencil id a start event renders back to.
pub(crate) fn start_stencil(event: &StartEvent) -> &'static str {
    use super::element::EventDefinition;
    match event.event_definitions.first() {
        None => stencil::START_NONE,
        Some(EventDefinition::Timer(_)) => stencil::START_TIMER,
        Some(EventDefinition::Error { .. }) => stencil::START_ERROR,
        Some(EventDefinition::Message { .. }) => stencil::START_MESSAGE,
        Some(EventDefinition::Signal { .. }) => stencil::START_SIGNAL,
    }
}
