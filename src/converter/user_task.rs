use super::context::{ConversionScope, RenderScope};
use super::properties::{
    Expect, first_property, pass_through, read_base, read_form_key, restore_block, set_text,
    write_base, write_form_key,
};
use crate::assignment::{self, Assignment, LabeledValue, read_labeled, write_labeled};
use crate::error::ConversionError;
use crate::graph::vocabulary::{property, stencil};
use crate::graph::{GraphNode, PropertyValue};
use crate::model::extension::names;
use crate::model::{TypedElement, UserTask};

/// Opaque structured blocks kept as JSON text: (property names, extension, accepted shape).
const BLOCKS: [(&[&str], &str, Expect); 5] = [
    (&[property::SLA_NODE], names::SLA_NODE, Expect::Array),
    (&[property::SPT_NODE], names::SPT_NODE, Expect::ArrayOrObject),
    (&[property::SOP_NODE], names::SOP_NODE, Expect::Array),
    (&[property::WI_NODE], names::WI_NODE, Expect::Array),
    (&[property::EXECUTION_CONDITION], names::EXECUTION_CONDITION, Expect::Array),
];

/// `{value, name}` pickers kept as text plus a name attribute.
const PATTERNS: [(&[&str], &str); 2] = [
    (
        &[property::SUBMIT_PATTERN, property::SUBMIT_PATTERN_CAMEL],
        names::SUBMIT_PATTERN,
    ),
    (
        &[property::TASK_ACTIVATE_PATTERN, property::TASK_ACTIVATE_PATTERN_CAMEL],
        names::TASK_ACTIVATE_PATTERN,
    ),
];

pub(super) fn from_graph(
    node: &GraphNode,
    _stencil_id: &str,
    scope: &mut ConversionScope<'_>,
) -> Result<TypedElement, ConversionError> {
    let mut task = UserTask {
        base: read_base(node),
        priority: node.property_text(property::PRIORITY),
        due_date: node.property_text(property::DUE_DATE),
        category: node.property_text(property::CATEGORY),
        ..Default::default()
    };
    let element_id = task.base.id.clone();
    task.form_key = read_form_key(node, &element_id, &mut task.base.extensions, scope);

    if let Some(wrapper) = node.property(property::USER_TASK_ASSIGNMENT) {
        match wrapper.structured() {
            Some(decoded @ PropertyValue::Object(_)) => {
                if let Some(value) = decoded.get(property::ASSIGNMENT) {
                    let resolved =
                        assignment::resolve_with(value, &element_id, scope.diagnostics_mut());
                    if let Some(resolved) = resolved {
                        resolved.apply_to(&mut task);
                    }
                }
            }
            _ => scope.malformed(
                &element_id,
                property::USER_TASK_ASSIGNMENT,
                "an object",
                wrapper,
            ),
        }
    }

    for (property_names, extension, expect) in BLOCKS {
        if let Some(json) = pass_through(node, property_names, expect, &element_id, scope) {
            task.base.extensions.add(extension, json);
        }
    }

    for (property_names, extension) in PATTERNS {
        let Some(value) = first_property(node, property_names) else {
            continue;
        };
        match LabeledValue::from_property(value) {
            Some(pattern) => write_labeled(&mut task.base.extensions, extension, &pattern),
            None => scope.malformed(&element_id, property_names[0], "a {value, name} object", value),
        }
    }

    Ok(TypedElement::UserTask(task))
}

pub(super) fn to_graph(task: &UserTask, scope: &RenderScope<'_>) -> GraphNode {
    let mut node = write_base(&task.base, stencil::USER_TASK, scope);
    let extensions = &task.base.extensions;

    if let Some(assignment) = Assignment::from_task(task) {
        let rendered = assignment::render_with(&assignment, scope.context());
        node.set_property(
            property::USER_TASK_ASSIGNMENT,
            PropertyValue::object([(property::ASSIGNMENT, rendered)]),
        );
    }

    set_text(&mut node, property::PRIORITY, task.priority.as_deref());
    set_text(&mut node, property::DUE_DATE, task.due_date.as_deref());
    set_text(&mut node, property::CATEGORY, task.category.as_deref());
    write_form_key(&mut node, task.form_key.as_deref(), extensions, scope);

    for (property_names, extension, _) in BLOCKS {
        restore_block(&mut node, property_names[0], extensions, extension);
    }

    for (property_names, extension) in PATTERNS {
        let Some(pattern) = read_labeled(extensions, extension) else {
            continue;
        };
        let mut fields = vec![("value", restore_scalar(&pattern.value))];
        if let Some(name) = pattern.name {
            fields.push(("name", PropertyValue::text(name)));
        }
        node.set_property(property_names[0], PropertyValue::object(fields));
    }

    node
}

/// Pattern codes are numeric in the editor; text that reads as a number or flag goes back as one.
fn restore_scalar(text: &str) -> PropertyValue {
    match PropertyValue::parse_json(text) {
        Ok(value @ PropertyValue::Scalar(_)) if value.as_str().is_none() => value,
        _ => PropertyValue::text(text),
    }
}
