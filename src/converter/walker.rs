use super::context::{ConversionContext, ConversionScope, RenderScope};
use super::registry::ConverterRegistry;
use crate::config::ConverterConfig;
use crate::error::{ConversionError, Diagnostics};
use crate::graph::vocabulary::{property, stencil};
use crate::graph::{GraphDocument, GraphNode, PropertyValue, Stencil};
use crate::model::extension::names;
use crate::model::{DEFAULT_PROCESS_ID, ProcessDefinitionModel, TypedElement};
use ahash::AHashMap;
use itertools::Itertools;

const CANVAS_RESOURCE_ID: &str = "canvas";

/// Element id of a shape: a non-empty override id wins over the resource id.
pub(crate) fn element_id(node: &GraphNode) -> String {
    node.property_text(property::OVERRIDE_ID)
        .unwrap_or_else(|| node.resource_id.clone())
}

/// Shape relationships of a whole document, computed before any conversion.
#[derive(Debug, Default)]
pub(crate) struct ShapeIndex {
    element_ids: AHashMap<String, String>,
    flow_sources: AHashMap<String, String>,
}

impl ShapeIndex {
    pub(crate) fn build(document: &GraphDocument) -> Self {
        let mut index = Self::default();
        document.visit_nodes(&mut |node| {
            index
                .element_ids
                .insert(node.resource_id.clone(), element_id(node));
            if node.stencil_id() != stencil::SEQUENCE_FLOW {
                for flow in &node.outgoing {
                    index
                        .flow_sources
                        .insert(flow.resource_id.clone(), node.resource_id.clone());
                }
            }
        });
        index
    }

    pub(crate) fn element_id(&self, resource_id: &str) -> Option<&str> {
        self.element_ids.get(resource_id).map(String::as_str)
    }

    pub(crate) fn source_of(&self, flow_resource_id: &str) -> Option<&str> {
        self.flow_sources.get(flow_resource_id).map(String::as_str)
    }
}

/// Element id to resource id, and each element's outgoing flows.
#[derive(Debug, Default)]
pub(crate) struct RenderIndex {
    resource_ids: AHashMap<String, String>,
    outgoing: AHashMap<String, Vec<String>>,
}

impl RenderIndex {
    pub(crate) fn build(model: &ProcessDefinitionModel) -> Self {
        let mut index = Self::default();
        let elements = model.iter_elements();
        for element in &elements {
            let base = element.base();
            index
                .resource_ids
                .insert(base.id.clone(), base.resource_id.clone());
        }
        for element in &elements {
            if let TypedElement::SequenceFlow(flow) = element {
                index
                    .outgoing
                    .entry(flow.source_ref.clone())
                    .or_default()
                    .push(flow.base.resource_id.clone());
            }
        }
        index
    }

    pub(crate) fn resource_id(&self, element_id: &str) -> Option<&str> {
        self.resource_ids.get(element_id).map(String::as_str)
    }

    pub(crate) fn outgoing(&self, element_id: &str) -> &[String] {
        self.outgoing
            .get(element_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Walks a document in order, dispatching every shape through the registry.
pub(crate) struct GraphWalker<'a> {
    registry: &'a ConverterRegistry,
    config: &'a ConverterConfig,
    context: &'a ConversionContext,
}

impl<'a> GraphWalker<'a> {
    pub(crate) fn new(
        registry: &'a ConverterRegistry,
        config: &'a ConverterConfig,
        context: &'a ConversionContext,
    ) -> Self {
        Self {
            registry,
            config,
            context,
        }
    }

    pub(crate) fn to_model(
        &self,
        document: &GraphDocument,
    ) -> Result<(ProcessDefinitionModel, Diagnostics), ConversionError> {
        let index = ShapeIndex::build(document);
        let mut scope = ConversionScope::new(self.context, self.config, document, &index);
        let elements = self.convert_shapes(&document.child_shapes, &mut scope)?;

        let id = document.property_text(property::PROCESS_ID).unwrap_or_else(|| {
            log::debug!("Document has no process id, using '{DEFAULT_PROCESS_ID}'");
            DEFAULT_PROCESS_ID.to_string()
        });
        let mut model = ProcessDefinitionModel {
            id,
            name: document.property_text(property::NAME),
            documentation: document.property_text(property::DOCUMENTATION),
            elements,
        };
        attach_condition_keys(&mut model);

        log::debug!(
            "Converted process '{}' with {} elements",
            model.id,
            model.iter_elements().len()
        );
        Ok((model, scope.into_diagnostics()))
    }

    fn convert_shapes(
        &self,
        shapes: &[GraphNode],
        scope: &mut ConversionScope<'_>,
    ) -> Result<Vec<TypedElement>, ConversionError> {
        let mut elements = Vec::with_capacity(shapes.len());
        for node in shapes {
            let stencil_id = node.stencil_id();
            if stencil_id.trim().is_empty() {
                return Err(ConversionError::MissingStencil {
                    resource_id: node.resource_id.clone(),
                });
            }
            if node.resource_id.trim().is_empty() {
                return Err(ConversionError::MissingIdentifier {
                    stencil: stencil_id.to_string(),
                });
            }
            let converter = self
                .registry
                .lookup(stencil_id)
                .ok_or_else(|| ConversionError::UnknownElementType(stencil_id.to_string()))?;

            let mut element = converter.to_typed(node, scope)?;
            if let TypedElement::SubProcess(sub_process) = &mut element {
                scope.enter();
                let children = self.convert_shapes(&node.child_shapes, scope);
                scope.leave();
                sub_process.elements = children?;
            }
            elements.push(element);
        }
        Ok(elements)
    }

    pub(crate) fn to_document(&self, model: &ProcessDefinitionModel) -> GraphDocument {
        let index = RenderIndex::build(model);
        let scope = RenderScope::new(self.context, &index);

        let mut properties = [
            (property::PROCESS_ID, Some(model.id.clone())),
            (property::NAME, model.name.clone()),
            (property::DOCUMENTATION, model.documentation.clone()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), PropertyValue::text(v))))
        .collect::<crate::graph::PropertyMap>();

        if let Some(start) = model.primary_start_event() {
            for (extension, name) in [
                (names::SLA, property::SLA),
                (names::SPT, property::SPT),
                (names::PROCESS_TITLE, property::PROCESS_TASK_TITLE),
            ] {
                let decoded = start
                    .base
                    .extensions
                    .first_text(extension)
                    .and_then(|json| PropertyValue::parse_json(json).ok());
                if let Some(value) = decoded {
                    properties.insert(name.to_string(), value);
                }
            }
        }

        GraphDocument {
            resource_id: Some(CANVAS_RESOURCE_ID.to_string()),
            stencil: Some(Stencil::new(stencil::DIAGRAM)),
            properties,
            child_shapes: self.render_elements(&model.elements, &scope),
            ..Default::default()
        }
    }

    fn render_elements(&self, elements: &[TypedElement], scope: &RenderScope<'_>) -> Vec<GraphNode> {
        elements
            .iter()
            .map(|element| {
                let mut node = self.registry.render(element, scope);
                if let TypedElement::SubProcess(sub_process) = element {
                    node.child_shapes = self.render_elements(&sub_process.elements, scope);
                }
                node
            })
            .collect()
    }
}

/// Collects every flow's operand keys, first-seen and de-duplicated, onto the
/// primary start event as one comma-joined `conditionKeys` element.
fn attach_condition_keys(model: &mut ProcessDefinitionModel) {
    let keys = model
        .sequence_flows()
        .into_iter()
        .filter(|flow| {
            flow.condition_expression
                .as_deref()
                .is_some_and(|expression| !expression.trim().is_empty())
        })
        .flat_map(|flow| flow.operands.iter())
        .filter(|operand| operand.is_complete())
        .map(|operand| operand.key.clone())
        .unique()
        .join(",");

    let Some(start) = model.primary_start_event_mut() else {
        if !keys.is_empty() {
            log::debug!("No start event to carry condition keys '{keys}'");
        }
        return;
    };
    let extensions = &mut start.base.extensions;
    extensions.remove(names::CONDITION_KEYS);
    if !keys.is_empty() {
        extensions.add(names::CONDITION_KEYS, keys);
    }
}
