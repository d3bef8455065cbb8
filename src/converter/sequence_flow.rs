use super::context::{ConversionScope, RenderScope};
use super::properties::{read_base, write_base};
use crate::error::ConversionError;
use crate::graph::vocabulary::{property, stencil};
use crate::graph::{GraphNode, PropertyValue, ShapeRef};
use crate::model::extension::names;
use crate::model::{SequenceFlow, TypedElement};
use crate::normalizer::{DATA_KEY, EXPRESSION_KEY, STATIC_VALUE_KEY, operands_from};

pub(super) fn from_graph(
    node: &GraphNode,
    _stencil_id: &str,
    scope: &mut ConversionScope<'_>,
) -> Result<TypedElement, ConversionError> {
    let mut flow = SequenceFlow {
        base: read_base(node),
        ..Default::default()
    };
    let element_id = flow.base.id.clone();

    match scope.source_of(&node.resource_id) {
        Some(source) => flow.source_ref = scope.element_id_of(source).to_string(),
        None => log::debug!("Sequence flow '{element_id}' is not listed as outgoing on any shape"),
    }
    let target = node.target.as_ref().or_else(|| node.outgoing.first());
    match target {
        Some(target) => flow.target_ref = scope.element_id_of(&target.resource_id).to_string(),
        None => log::debug!("Sequence flow '{element_id}' has no target"),
    }

    if let Some(condition) = node.property(property::CONDITION) {
        match condition {
            PropertyValue::Scalar(_) => flow.condition_expression = condition.non_empty_text(),
            PropertyValue::Object(_) => {
                flow.structured_condition = true;
                flow.condition_expression = match condition.get(EXPRESSION_KEY) {
                    Some(expression @ PropertyValue::Object(_)) => {
                        expression.field_text(STATIC_VALUE_KEY)
                    }
                    Some(expression) => expression.non_empty_text(),
                    None => None,
                };
                match condition.get(DATA_KEY) {
                    Some(data @ PropertyValue::Array(_)) => flow.operands = operands_from(data),
                    Some(other) => scope.malformed(
                        &element_id,
                        &format!("{}.{}", property::CONDITION, DATA_KEY),
                        "an array",
                        other,
                    ),
                    None => {}
                }
            }
            other => scope.malformed(&element_id, property::CONDITION, "text or an object", other),
        }
    }

    let extensions = &mut flow.base.extensions;
    extensions.add_non_empty(names::EXPRESSION_DISPLAY, flow.condition_expression.as_deref());
    extensions.add_non_empty(names::NAME, flow.base.name.as_deref());

    Ok(TypedElement::SequenceFlow(flow))
}

pub(super) fn to_graph(flow: &SequenceFlow, scope: &RenderScope<'_>) -> GraphNode {
    let mut node = write_base(&flow.base, stencil::SEQUENCE_FLOW, scope);

    if !flow.target_ref.is_empty() {
        let target = ShapeRef::new(scope.resource_id_of(&flow.target_ref));
        node.outgoing = vec![target.clone()];
        node.target = Some(target);
    }

    if let Some(expression) = flow.condition_expression.as_deref() {
        let condition = if !flow.structured_condition && flow.operands.is_empty() {
            PropertyValue::text(expression)
        } else {
            PropertyValue::object([
                (EXPRESSION_KEY, PropertyValue::text(expression)),
                (
                    DATA_KEY,
                    PropertyValue::Array(flow.operands.iter().map(|op| op.to_property()).collect()),
                ),
            ])
        };
        node.set_property(property::CONDITION, condition);
    }
    node
}
