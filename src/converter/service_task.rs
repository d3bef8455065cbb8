use super::context::{ConversionScope, RenderScope};
use super::properties::{read_base, read_form_key, set_text, write_base, write_form_key};
use crate::config::ServiceDelegatePolicy;
use crate::error::ConversionError;
use crate::graph::GraphNode;
use crate::graph::vocabulary::{property, stencil};
use crate::model::extension::names;
use crate::model::{ServiceImplementation, ServiceTask, TypedElement};

pub(super) fn from_graph(
    node: &GraphNode,
    _stencil_id: &str,
    scope: &mut ConversionScope<'_>,
) -> Result<TypedElement, ConversionError> {
    let mut task = ServiceTask {
        base: read_base(node),
        result_variable: node.property_text(property::SERVICE_RESULT_VARIABLE),
        asynchronous: node
            .property(property::ASYNCHRONOUS)
            .and_then(|flag| flag.as_flag())
            .unwrap_or(false),
        ..Default::default()
    };

    let from_editor = editor_implementation(node);
    task.implementation = match &scope.config().service_delegate {
        ServiceDelegatePolicy::Override { class_name } => {
            if let Some(discarded) = from_editor.filter(|chosen| !is_class(chosen, class_name)) {
                log::info!(
                    "Service task '{}': editor implementation {:?} replaced by delegate '{}'",
                    task.base.id,
                    discarded,
                    class_name
                );
            }
            Some(ServiceImplementation::Class(class_name.clone()))
        }
        ServiceDelegatePolicy::Preserve => from_editor,
    };

    // the delegate reads its form from the extension, not from a typed field
    let element_id = task.base.id.clone();
    let form_key = read_form_key(node, &element_id, &mut task.base.extensions, scope);
    task.base
        .extensions
        .add_non_empty(names::FORM_KEY, form_key.as_deref());

    Ok(TypedElement::ServiceTask(task))
}

fn is_class(implementation: &ServiceImplementation, class_name: &str) -> bool {
    matches!(implementation, ServiceImplementation::Class(name) if name == class_name)
}

fn editor_implementation(node: &GraphNode) -> Option<ServiceImplementation> {
    node.property_text(property::SERVICE_CLASS)
        .map(ServiceImplementation::Class)
        .or_else(|| {
            node.property_text(property::SERVICE_EXPRESSION)
                .map(ServiceImplementation::Expression)
        })
        .or_else(|| {
            node.property_text(property::SERVICE_DELEGATE_EXPRESSION)
                .map(ServiceImplementation::DelegateExpression)
        })
}

pub(super) fn to_graph(task: &ServiceTask, scope: &RenderScope<'_>) -> GraphNode {
    let mut node = write_base(&task.base, stencil::SERVICE_TASK, scope);
    let extensions = &task.base.extensions;

    let (name, value) = match &task.implementation {
        Some(ServiceImplementation::Class(class)) => (property::SERVICE_CLASS, Some(class)),
        Some(ServiceImplementation::Expression(expression)) => {
            (property::SERVICE_EXPRESSION, Some(expression))
        }
        Some(ServiceImplementation::DelegateExpression(expression)) => {
            (property::SERVICE_DELEGATE_EXPRESSION, Some(expression))
        }
        None => (property::SERVICE_CLASS, None),
    };
    set_text(&mut node, name, value.map(String::as_str));
    set_text(
        &mut node,
        property::SERVICE_RESULT_VARIABLE,
        task.result_variable.as_deref(),
    );
    if task.asynchronous {
        node.set_property(property::ASYNCHRONOUS, true);
    }
    write_form_key(
        &mut node,
        extensions.first_text(names::FORM_KEY),
        extensions,
        scope,
    );
    node
}
