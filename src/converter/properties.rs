use super::context::{ConversionScope, RenderScope};
use super::walker::element_id;
use crate::graph::vocabulary::property;
use crate::graph::{GraphNode, PropertyValue};
use crate::model::extension::names;
use crate::model::{BaseElement, ExtensionElements};

/// Shapes a pass-through block may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Expect {
    Array,
    ArrayOrObject,
}

impl Expect {
    fn accepts(self, value: &PropertyValue) -> bool {
        match self {
            Expect::Array => matches!(value, PropertyValue::Array(_)),
            Expect::ArrayOrObject => {
                matches!(value, PropertyValue::Array(_) | PropertyValue::Object(_))
            }
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Expect::Array => "an array",
            Expect::ArrayOrObject => "an array or object",
        }
    }
}

pub(super) fn read_base(node: &GraphNode) -> BaseElement {
    BaseElement {
        id: element_id(node),
        resource_id: node.resource_id.clone(),
        name: node.property_text(property::NAME),
        documentation: node.property_text(property::DOCUMENTATION),
        extensions: ExtensionElements::new(),
    }
}

/// Shape skeleton for `base`, with its outgoing flows attached.
pub(super) fn write_base(base: &BaseElement, stencil_id: &str, scope: &RenderScope<'_>) -> GraphNode {
    let mut node = GraphNode::new(&base.resource_id, stencil_id);
    if base.id != base.resource_id {
        node.set_property(property::OVERRIDE_ID, base.id.as_str());
    }
    set_text(&mut node, property::NAME, base.name.as_deref());
    set_text(&mut node, property::DOCUMENTATION, base.documentation.as_deref());
    node.outgoing = scope.outgoing_of(&base.id);
    node
}

pub(super) fn set_text(node: &mut GraphNode, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        node.set_property(name, value);
    }
}

/// First property present under any of `names`.
pub(super) fn first_property<'n>(node: &'n GraphNode, names: &[&str]) -> Option<&'n PropertyValue> {
    names.iter().find_map(|name| node.property(name))
}

/// Reads a structured block and returns it as JSON text for an extension element.
///
/// Text holding JSON is decoded first. Other shapes are reported and dropped.
pub(super) fn pass_through(
    node: &GraphNode,
    property_names: &[&str],
    expect: Expect,
    element_id: &str,
    scope: &mut ConversionScope<'_>,
) -> Option<String> {
    let value = first_property(node, property_names)?;
    match value.structured() {
        Some(structured) if expect.accepts(&structured) => Some(structured.to_json_string()),
        _ => {
            scope.malformed(element_id, property_names[0], expect.describe(), value);
            None
        }
    }
}

/// Writes an extension's JSON text back as a structured property.
pub(super) fn restore_block(node: &mut GraphNode, name: &str, extensions: &ExtensionElements, extension: &str) {
    let Some(json) = extensions.first_text(extension) else {
        return;
    };
    match PropertyValue::parse_json(json) {
        Ok(value) => node.set_property(name, value),
        Err(err) => log::debug!("Extension '{extension}' does not hold JSON ({err}), skipped"),
    }
}

/// Resolves the form a shape refers to and returns its form key.
///
/// A `formreference` triple wins when it yields a key, either its own or
/// one found through the context. Otherwise `formkey` is used as given,
/// as text or as an `{id, name}` object.
pub(super) fn read_form_key(
    node: &GraphNode,
    element_id: &str,
    extensions: &mut ExtensionElements,
    scope: &mut ConversionScope<'_>,
) -> Option<String> {
    if let Some(reference) = node.property(property::FORM_REFERENCE) {
        if let Some(id) = reference.field_text("id") {
            let key = reference.field_text("key").or_else(|| {
                scope
                    .context()
                    .form_by_id(&id)
                    .map(|form| form.key.clone())
            });
            if let Some(key) = key {
                match reference.field_text("name") {
                    Some(name) => extensions.add_with_attribute(names::FORM_REFERENCE, id, "name", name),
                    None => extensions.add(names::FORM_REFERENCE, id),
                }
                return Some(key);
            }
            log::debug!("Form reference '{id}' on '{element_id}' did not resolve to a key");
        }
    }

    let form_key = first_property(
        node,
        &[property::FORM_KEY_SHORT, property::FORM_KEY, property::FORM_KEY_CAMEL],
    )?;
    match form_key {
        PropertyValue::Object(_) => {
            let key = form_key.field_text("id");
            if key.is_some() {
                extensions.add_non_empty(names::FORM_NAME, form_key.field_text("name").as_deref());
            }
            key
        }
        PropertyValue::Scalar(_) => form_key.non_empty_text(),
        other => {
            scope.malformed(element_id, property::FORM_KEY_SHORT, "text or an {id, name} object", other);
            None
        }
    }
}

/// Inverse of [`read_form_key`].
pub(super) fn write_form_key(
    node: &mut GraphNode,
    form_key: Option<&str>,
    extensions: &ExtensionElements,
    scope: &RenderScope<'_>,
) {
    let Some(form_key) = form_key.filter(|key| !key.is_empty()) else {
        return;
    };

    let stored = extensions.first(names::FORM_REFERENCE).map(|reference| {
        (
            reference.text.clone(),
            reference.attribute("name").map(str::to_string),
        )
    });
    let known = scope
        .context()
        .form_by_key(form_key)
        .map(|form| (form.id.clone(), Some(form.name.clone())));

    if let Some((id, name)) = stored.or(known) {
        let mut fields = vec![("id", PropertyValue::text(id))];
        if let Some(name) = name {
            fields.push(("name", PropertyValue::text(name)));
        }
        fields.push(("key", PropertyValue::text(form_key)));
        node.set_property(property::FORM_REFERENCE, PropertyValue::object(fields));
        return;
    }

    match extensions.first_text(names::FORM_NAME) {
        Some(name) => node.set_property(
            property::FORM_KEY_SHORT,
            PropertyValue::object([
                ("id", PropertyValue::text(form_key)),
                ("name", PropertyValue::text(name)),
            ]),
        ),
        None => node.set_property(property::FORM_KEY_SHORT, form_key),
    }
}
