use super::context::{ConversionScope, RenderScope};
use super::properties::{read_base, write_base};
use crate::error::ConversionError;
use crate::graph::GraphNode;
use crate::graph::vocabulary::stencil;
use crate::model::{Gateway, TypedElement};

/// Gateways carry no typed data of their own; routing lives on the flows.
pub(super) fn from_graph(
    node: &GraphNode,
    stencil_id: &str,
    _scope: &mut ConversionScope<'_>,
) -> Result<TypedElement, ConversionError> {
    let gateway = Gateway {
        base: read_base(node),
    };
    match stencil_id {
        stencil::PARALLEL_GATEWAY => Ok(TypedElement::ParallelGateway(gateway)),
        _ => Ok(TypedElement::ExclusiveGateway(gateway)),
    }
}

pub(super) fn to_graph(gateway: &Gateway, stencil_id: &str, scope: &RenderScope<'_>) -> GraphNode {
    write_base(&gateway.base, stencil_id, scope)
}
