use super::context::{ConversionScope, RenderScope};
use super::properties::{read_base, read_form_key, set_text, write_base, write_form_key};
use crate::error::ConversionError;
use crate::graph::vocabulary::{property, stencil};
use crate::graph::{GraphNode, PropertyValue};
use crate::model::extension::names;
use crate::model::{EventDefinition, StartEvent, TimerDefinition, TypedElement, start_stencil};

/// Document-level blocks carried by the top-level start event.
const PROCESS_BLOCKS: [(&str, &str); 3] = [
    (property::SLA, names::SLA),
    (property::SPT, names::SPT),
    (property::PROCESS_TASK_TITLE, names::PROCESS_TITLE),
];

pub(super) fn from_graph(
    node: &GraphNode,
    stencil_id: &str,
    scope: &mut ConversionScope<'_>,
) -> Result<TypedElement, ConversionError> {
    let mut event = StartEvent {
        base: read_base(node),
        initiator: node.property_text(property::INITIATOR),
        ..Default::default()
    };
    let element_id = event.base.id.clone();

    match stencil_id {
        stencil::START_NONE => {
            event.form_key = read_form_key(node, &element_id, &mut event.base.extensions, scope);
        }
        stencil::START_TIMER => event.event_definitions.push(EventDefinition::Timer(TimerDefinition {
            time_date: node.property_text(property::TIMER_DATE),
            time_duration: node.property_text(property::TIMER_DURATION),
            time_cycle: node.property_text(property::TIMER_CYCLE),
        })),
        stencil::START_ERROR => event.event_definitions.push(EventDefinition::Error {
            error_ref: node.property_text(property::ERROR_REF),
        }),
        stencil::START_MESSAGE => event.event_definitions.push(EventDefinition::Message {
            message_ref: node.property_text(property::MESSAGE_REF),
        }),
        stencil::START_SIGNAL => event.event_definitions.push(EventDefinition::Signal {
            signal_ref: node.property_text(property::SIGNAL_REF),
        }),
        _ => {}
    }

    let extensions = &mut event.base.extensions;
    extensions.add_non_empty(
        names::CONDITION_KEYS,
        node.property_text(property::CONDITION_KEYS).as_deref(),
    );

    if scope.is_top_level() {
        for (name, extension) in PROCESS_BLOCKS {
            let Some(value) = scope.document_property(name) else {
                continue;
            };
            match value.structured() {
                Some(block @ PropertyValue::Array(_)) => {
                    extensions.add(extension, block.to_json_string());
                }
                _ => scope.malformed(&element_id, name, "an array", value),
            }
        }
    }

    Ok(TypedElement::StartEvent(event))
}

pub(super) fn to_graph(event: &StartEvent, scope: &RenderScope<'_>) -> GraphNode {
    let mut node = write_base(&event.base, start_stencil(event), scope);
    let extensions = &event.base.extensions;

    set_text(&mut node, property::INITIATOR, event.initiator.as_deref());
    write_form_key(&mut node, event.form_key.as_deref(), extensions, scope);

    match event.event_definitions.first() {
        Some(EventDefinition::Timer(timer)) => {
            set_text(&mut node, property::TIMER_DATE, timer.time_date.as_deref());
            set_text(&mut node, property::TIMER_DURATION, timer.time_duration.as_deref());
            set_text(&mut node, property::TIMER_CYCLE, timer.time_cycle.as_deref());
        }
        Some(EventDefinition::Error { error_ref }) => {
            set_text(&mut node, property::ERROR_REF, error_ref.as_deref());
        }
        Some(EventDefinition::Message { message_ref }) => {
            set_text(&mut node, property::MESSAGE_REF, message_ref.as_deref());
        }
        Some(EventDefinition::Signal { signal_ref }) => {
            set_text(&mut node, property::SIGNAL_REF, signal_ref.as_deref());
        }
        None => {}
    }

    set_text(
        &mut node,
        property::CONDITION_KEYS,
        extensions.first_text(names::CONDITION_KEYS),
    );
    node
}
