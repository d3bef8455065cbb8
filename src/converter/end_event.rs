use super::context::{ConversionScope, RenderScope};
use super::properties::{read_base, write_base};
use crate::error::ConversionError;
use crate::graph::GraphNode;
use crate::graph::vocabulary::stencil;
use crate::model::{EndEvent, TypedElement};

pub(super) fn from_graph(
    node: &GraphNode,
    _stencil_id: &str,
    _scope: &mut ConversionScope<'_>,
) -> Result<TypedElement, ConversionError> {
    Ok(TypedElement::EndEvent(EndEvent {
        base: read_base(node),
    }))
}

pub(super) fn to_graph(event: &EndEvent, scope: &RenderScope<'_>) -> GraphNode {
    write_base(&event.base, stencil::END_NONE, scope)
}
