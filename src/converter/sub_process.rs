use super::context::{ConversionScope, RenderScope};
use super::properties::{read_base, write_base};
use crate::error::ConversionError;
use crate::graph::GraphNode;
use crate::graph::vocabulary::stencil;
use crate::model::{SubProcess, TypedElement};

/// The walker fills in `elements` from the shape's children.
pub(super) fn from_graph(
    node: &GraphNode,
    _stencil_id: &str,
    _scope: &mut ConversionScope<'_>,
) -> Result<TypedElement, ConversionError> {
    Ok(TypedElement::SubProcess(SubProcess {
        base: read_base(node),
        elements: Vec::new(),
    }))
}

pub(super) fn to_graph(sub_process: &SubProcess, scope: &RenderScope<'_>) -> GraphNode {
    write_base(&sub_process.base, stencil::SUB_PROCESS, scope)
}
