//! Rewrites date, date-time and time-of-day literals inside condition expressions
//! into numbers the engine can compare.
//!
//! The save path runs [`normalize_document`] before persisting; the load path runs
//! [`editor_view`] to give the editor back a plain expression string. Both passes
//! are idempotent.

mod literal;

pub use literal::LiteralShape;

use crate::error::{ConversionWarning, Diagnostics};
use crate::graph::vocabulary::{property, stencil};
use crate::graph::{GraphDocument, GraphNode, PropertyMap, PropertyValue};
use crate::model::ConditionOperand;

/// Object key holding the expression inside a condition property.
pub const EXPRESSION_KEY: &str = "expression";
/// Object key holding the operand list inside a condition property.
pub const DATA_KEY: &str = "data";
/// Object key of the rewritten expression text.
pub const STATIC_VALUE_KEY: &str = "staticValue";
/// Object key of the document-level schedule record's condition.
pub const CONDITION_KEY: &str = "condition";

/// Rewrites every operand literal of a recognized shape inside `expression`.
pub fn rewrite_expression(expression: &str, operands: &[ConditionOperand]) -> String {
    rewrite_expression_with(expression, operands, &mut Diagnostics::default())
}

/// [`rewrite_expression`], reporting unparseable literals into `diagnostics`.
pub fn rewrite_expression_with(
    expression: &str,
    operands: &[ConditionOperand],
    diagnostics: &mut Diagnostics,
) -> String {
    let mut rewritten = expression.to_string();
    for operand in operands {
        let Some(shape) = LiteralShape::detect(&operand.value) else {
            continue;
        };
        match shape.normalize(&operand.value) {
            Some(number) => {
                let replacement = format!("{}{}{}", operand.key, operand.symbol, number);
                rewritten = rewritten.replace(&operand.token(), &replacement);
            }
            None => diagnostics.report(ConversionWarning::LiteralParseFailure {
                literal: operand.value.clone(),
                shape: shape.describe(),
            }),
        }
    }
    rewritten
}

/// Reads an operand list. Non-object entries are skipped.
pub fn operands_from(value: &PropertyValue) -> Vec<ConditionOperand> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(ConditionOperand::from_property).collect())
        .unwrap_or_default()
}

/// Save-path pass: normalizes document-level schedule blocks and every flow condition.
pub fn normalize_document(document: &mut GraphDocument) -> Vec<ConversionWarning> {
    let mut diagnostics = Diagnostics::default();
    for name in [property::SLA, property::SPT] {
        normalize_schedule(&mut document.properties, name, &mut diagnostics);
    }
    normalize_nodes(&mut document.child_shapes, &mut diagnostics);
    diagnostics.into_warnings()
}

/// Load-path pass: turns `{type, staticValue}` expression objects back into plain text.
pub fn editor_view(document: &mut GraphDocument) {
    fn walk(nodes: &mut [GraphNode]) {
        for node in nodes {
            if node.stencil_id() == stencil::SEQUENCE_FLOW {
                if let Some(PropertyValue::Object(condition)) =
                    node.properties.get_mut(property::CONDITION)
                {
                    let static_text = condition
                        .get(EXPRESSION_KEY)
                        .and_then(|expression| expression.get(STATIC_VALUE_KEY))
                        .and_then(PropertyValue::as_text);
                    if let Some(text) = static_text {
                        condition.insert(EXPRESSION_KEY.to_string(), PropertyValue::text(text));
                    }
                }
            }
            walk(&mut node.child_shapes);
        }
    }
    walk(&mut document.child_shapes);
}

/// Document-level SLA/SPT blocks: `[{condition, expression: [operand..]}]`,
/// possibly stored as JSON text.
fn normalize_schedule(properties: &mut PropertyMap, name: &str, diagnostics: &mut Diagnostics) {
    let Some(value) = properties.get(name) else {
        return;
    };
    let Some(PropertyValue::Array(mut records)) = value.structured() else {
        return;
    };
    for record in &mut records {
        let PropertyValue::Object(fields) = record else {
            continue;
        };
        let Some(condition) = fields.get(CONDITION_KEY).and_then(PropertyValue::as_text) else {
            continue;
        };
        let operands = fields
            .get(EXPRESSION_KEY)
            .map(operands_from)
            .unwrap_or_default();
        let rewritten = rewrite_expression_with(&condition, &operands, diagnostics);
        fields.insert(CONDITION_KEY.to_string(), PropertyValue::text(rewritten));
    }
    properties.insert(name.to_string(), PropertyValue::Array(records));
}

fn normalize_nodes(nodes: &mut [GraphNode], diagnostics: &mut Diagnostics) {
    for node in nodes {
        if node.stencil_id() == stencil::SUB_PROCESS {
            normalize_nodes(&mut node.child_shapes, diagnostics);
        } else if node.stencil_id() == stencil::SEQUENCE_FLOW {
            normalize_condition(node, diagnostics);
        }
    }
}

/// Rewrites `{expression, data}` into `{expression: {type: "static", staticValue}, data}`.
fn normalize_condition(node: &mut GraphNode, diagnostics: &mut Diagnostics) {
    let Some(PropertyValue::Object(condition)) = node.properties.get_mut(property::CONDITION)
    else {
        return;
    };
    let expression = match condition.get(EXPRESSION_KEY) {
        Some(value @ PropertyValue::Object(_)) => value.field_text(STATIC_VALUE_KEY),
        Some(value) => value.non_empty_text(),
        None => None,
    };
    let Some(expression) = expression.filter(|e| !e.trim().is_empty()) else {
        return;
    };
    let operands = condition.get(DATA_KEY).map(operands_from).unwrap_or_default();
    let rewritten = rewrite_expression_with(&expression, &operands, diagnostics);
    condition.insert(
        EXPRESSION_KEY.to_string(),
        PropertyValue::object([
            ("type", PropertyValue::text("static")),
            (STATIC_VALUE_KEY, PropertyValue::text(rewritten)),
        ]),
    );
}
