//! BPMN 2.0 XML output for a typed model, in the dialect the engine deploys.

mod xml;

use crate::error::ExportError;
use crate::model::{
    BaseElement, EventDefinition, ExtensionElements, MODELER_NAMESPACE, MODELER_PREFIX,
    ProcessDefinitionModel, ServiceImplementation, StartEvent, TypedElement,
};
use std::fmt::Write;
use xml::{Attributes, cdata, indent, xml_escape};

pub const BPMN_NAMESPACE: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
pub const ACTIVITI_NAMESPACE: &str = "http://activiti.org/bpmn";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const TARGET_NAMESPACE: &str = "http://www.activiti.org/processdef";

/// Serializes `model` as a deployable BPMN 2.0 document.
///
/// Element order follows the model. Extension elements are written as
/// `<modeler:name>` children of `extensionElements`, text in CDATA.
pub fn to_bpmn_xml(model: &ProcessDefinitionModel) -> Result<String, ExportError> {
    let mut xml = String::new();

    writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(xml, r#"<definitions xmlns="{}""#, BPMN_NAMESPACE)?;
    writeln!(xml, r#"             xmlns:xsi="{}""#, XSI_NAMESPACE)?;
    writeln!(xml, r#"             xmlns:activiti="{}""#, ACTIVITI_NAMESPACE)?;
    writeln!(
        xml,
        r#"             xmlns:{}="{}""#,
        MODELER_PREFIX, MODELER_NAMESPACE
    )?;
    writeln!(
        xml,
        r#"             typeLanguage="http://www.w3.org/2001/XMLSchema""#
    )?;
    writeln!(
        xml,
        r#"             expressionLanguage="http://www.w3.org/1999/XPath""#
    )?;
    writeln!(xml, r#"             targetNamespace="{}">"#, TARGET_NAMESPACE)?;

    let mut process = Attributes::new();
    process.push("id", Some(&model.id));
    process.push("name", model.name.as_deref());
    process.push("isExecutable", Some("true"));
    writeln!(xml, "  <process{}>", process)?;
    if let Some(documentation) = &model.documentation {
        writeln!(
            xml,
            "    <documentation>{}</documentation>",
            xml_escape(documentation)
        )?;
    }
    for element in &model.elements {
        write_element(&mut xml, element, 2)?;
    }
    writeln!(xml, "  </process>")?;
    writeln!(xml, "</definitions>")?;

    log::debug!("Exported process '{}' ({} bytes)", model.id, xml.len());
    Ok(xml)
}

fn write_element(xml: &mut String, element: &TypedElement, depth: usize) -> Result<(), ExportError> {
    let base = element.base();
    let mut attributes = Attributes::new();
    attributes.push("id", Some(&base.id));
    attributes.push("name", base.name.as_deref());

    let mut body = String::new();
    write_common_children(&mut body, base, depth + 1)?;

    let tag = match element {
        TypedElement::StartEvent(event) => {
            attributes.push("activiti:initiator", event.initiator.as_deref());
            attributes.push("activiti:formKey", event.form_key.as_deref());
            write_event_definitions(&mut body, event, depth + 1)?;
            "startEvent"
        }
        TypedElement::EndEvent(_) => "endEvent",
        TypedElement::UserTask(task) => {
            let candidate_users = task.candidate_users.join(",");
            let candidate_groups = task.candidate_groups.join(",");
            attributes.push("activiti:assignee", task.assignee.as_deref());
            attributes.push("activiti:candidateUsers", Some(&candidate_users));
            attributes.push("activiti:candidateGroups", Some(&candidate_groups));
            attributes.push("activiti:dueDate", task.due_date.as_deref());
            attributes.push("activiti:formKey", task.form_key.as_deref());
            attributes.push("activiti:priority", task.priority.as_deref());
            attributes.push("activiti:category", task.category.as_deref());
            "userTask"
        }
        TypedElement::ServiceTask(task) => {
            match &task.implementation {
                Some(ServiceImplementation::Class(class)) => {
                    attributes.push("activiti:class", Some(class))
                }
                Some(ServiceImplementation::Expression(expression)) => {
                    attributes.push("activiti:expression", Some(expression))
                }
                Some(ServiceImplementation::DelegateExpression(expression)) => {
                    attributes.push("activiti:delegateExpression", Some(expression))
                }
                None => {}
            }
            attributes.push("activiti:resultVariableName", task.result_variable.as_deref());
            if task.asynchronous {
                attributes.push("activiti:async", Some("true"));
            }
            "serviceTask"
        }
        TypedElement::SequenceFlow(flow) => {
            attributes.push("sourceRef", Some(&flow.source_ref));
            attributes.push("targetRef", Some(&flow.target_ref));
            if let Some(expression) = flow.condition_expression.as_deref() {
                writeln!(
                    body,
                    r#"{}<conditionExpression xsi:type="tFormalExpression">{}</conditionExpression>"#,
                    indent(depth + 1),
                    cdata(expression)
                )?;
            }
            "sequenceFlow"
        }
        TypedElement::ExclusiveGateway(_) => "exclusiveGateway",
        TypedElement::ParallelGateway(_) => "parallelGateway",
        TypedElement::SubProcess(sub_process) => {
            for child in &sub_process.elements {
                write_element(&mut body, child, depth + 1)?;
            }
            "subProcess"
        }
    };

    let pad = indent(depth);
    if body.is_empty() {
        writeln!(xml, "{pad}<{tag}{attributes}/>")?;
    } else {
        writeln!(xml, "{pad}<{tag}{attributes}>")?;
        xml.push_str(&body);
        writeln!(xml, "{pad}</{tag}>")?;
    }
    Ok(())
}

fn write_common_children(xml: &mut String, base: &BaseElement, depth: usize) -> Result<(), ExportError> {
    let pad = indent(depth);
    if let Some(documentation) = &base.documentation {
        writeln!(
            xml,
            "{pad}<documentation>{}</documentation>",
            xml_escape(documentation)
        )?;
    }
    write_extensions(xml, &base.extensions, depth)
}

fn write_extensions(
    xml: &mut String,
    extensions: &ExtensionElements,
    depth: usize,
) -> Result<(), ExportError> {
    if extensions.is_empty() {
        return Ok(());
    }
    let pad = indent(depth);
    let inner = indent(depth + 1);
    writeln!(xml, "{pad}<extensionElements>")?;
    for element in extensions.iter() {
        let mut attributes = Attributes::new();
        if element.namespace != MODELER_NAMESPACE {
            attributes.push(&format!("xmlns:{}", element.prefix), Some(&element.namespace));
        }
        for attribute in &element.attributes {
            attributes.push(
                &format!("{}:{}", attribute.prefix, attribute.name),
                Some(&attribute.value),
            );
        }
        writeln!(
            xml,
            "{inner}<{prefix}:{name}{attributes}>{text}</{prefix}:{name}>",
            prefix = element.prefix,
            name = element.name,
            text = cdata(&element.text),
        )?;
    }
    writeln!(xml, "{pad}</extensionElements>")?;
    Ok(())
}

fn write_event_definitions(
    xml: &mut String,
    event: &StartEvent,
    depth: usize,
) -> Result<(), ExportError> {
    let pad = indent(depth);
    for definition in &event.event_definitions {
        match definition {
            EventDefinition::Timer(timer) => {
                writeln!(xml, "{pad}<timerEventDefinition>")?;
                for (tag, value) in [
                    ("timeDate", &timer.time_date),
                    ("timeDuration", &timer.time_duration),
                    ("timeCycle", &timer.time_cycle),
                ] {
                    if let Some(value) = value {
                        writeln!(xml, "{pad}  <{tag}>{}</{tag}>", xml_escape(value))?;
                    }
                }
                writeln!(xml, "{pad}</timerEventDefinition>")?;
            }
            EventDefinition::Error { error_ref } => {
                let mut attributes = Attributes::new();
                attributes.push("errorRef", error_ref.as_deref());
                writeln!(xml, "{pad}<errorEventDefinition{attributes}/>")?;
            }
            EventDefinition::Message { message_ref } => {
                let mut attributes = Attributes::new();
                attributes.push("messageRef", message_ref.as_deref());
                writeln!(xml, "{pad}<messageEventDefinition{attributes}/>")?;
            }
            EventDefinition::Signal { signal_ref } => {
                let mut attributes = Attributes::new();
                attributes.push("signalRef", signal_ref.as_deref());
                writeln!(xml, "{pad}<signalEventDefinition{attributes}/>")?;
            }
        }
    }
    Ok(())
}
