//! Tests for graph to model conversion and back.
mod common;
use common::*;
use procmodel::config::DEFAULT_SERVICE_DELEGATE;
use procmodel::converter::{ConversionContext, ConversionScope, ConverterRegistry, ModelInfo};
use procmodel::graph::GraphNode;
use procmodel::model::extension::names;
use procmodel::model::{
    BaseElement, ElementKind, EndEvent, EventDefinition, ServiceImplementation, TypedElement,
};
use procmodel::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn only_element(document: &GraphDocument) -> TypedElement {
    let output = convert(document);
    assert_eq!(output.model.elements.len(), 1);
    output.model.elements[0].clone()
}

fn assert_round_trip(document: &GraphDocument) {
    let converter = Converter::new();
    let model = converter.to_typed_model(document).expect("converts");
    let rendered = converter.to_graph_document(&model);
    let reconverted = converter.to_typed_model(&rendered).expect("reconverts");
    assert_eq!(reconverted, model);
}

/// Converts a canonical editor document and renders it back; the result must be the input.
fn assert_graph_round_trip_with(converter: &Converter, document: serde_json::Value) {
    let model = converter
        .to_typed_model(&load(document.clone()))
        .expect("converts");
    let rendered =
        serde_json::to_value(converter.to_graph_document(&model)).expect("rendered graph serializes");
    assert_eq!(rendered, document);
}

fn assert_graph_round_trip(document: serde_json::Value) {
    assert_graph_round_trip_with(&Converter::new(), document);
}

/// A document in the shape the converter renders: canvas id, diagram stencil, process id `test`.
fn canonical(shapes: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "resourceId": "canvas",
        "stencil": { "id": "BPMNDiagram" },
        "properties": { "process_id": "test" },
        "childShapes": shapes
    })
}

#[test]
fn test_approval_process_converts() {
    let output = convert(&load(approval_process()));
    let model = output.model;

    assert!(output.diagnostics.is_empty());
    assert_eq!(model.id, "approval");
    assert_eq!(model.name, Some("Approval".to_string()));
    assert_eq!(model.elements.len(), 10);

    let kinds: Vec<ElementKind> = model.elements.iter().map(TypedElement::kind).collect();
    assert_eq!(kinds[0], ElementKind::StartEvent);
    assert_eq!(kinds[2], ElementKind::ExclusiveGateway);
    assert_eq!(kinds[5], ElementKind::SequenceFlow);
}

#[test]
fn test_flow_endpoints_use_element_ids() {
    let model = convert(&load(approval_process())).model;
    let flows = model.sequence_flows();

    assert_eq!(flows[0].source_ref, "startEvent");
    assert_eq!(flows[0].target_ref, "review");
    assert_eq!(flows[2].source_ref, "gw");
    assert_eq!(flows[2].condition_expression, Some("amount>1000".to_string()));
    assert_eq!(flows[2].operands.len(), 1);
    assert_eq!(
        flows[2].base.extensions.first_text(names::EXPRESSION_DISPLAY),
        Some("amount>1000")
    );
    assert_eq!(flows[3].condition_expression, Some("${amount<=1000}".to_string()));
    assert!(flows[3].operands.is_empty());
}

#[test]
fn test_plain_form_key_without_mapping() {
    let model = convert(&load(approval_process())).model;
    let start = model.primary_start_event().expect("start event");

    assert_eq!(start.base.id, "startEvent");
    assert_eq!(start.base.resource_id, "start");
    assert_eq!(start.form_key, Some("f1".to_string()));
    assert!(!start.base.extensions.contains(names::FORM_REFERENCE));
}

#[test]
fn test_condition_keys_land_on_start_event() {
    let model = convert(&load(approval_process())).model;
    let start = model.primary_start_event().expect("start event");
    assert_eq!(start.base.extensions.get(names::CONDITION_KEYS).len(), 1);
    assert_eq!(start.base.extensions.first_text(names::CONDITION_KEYS), Some("amount"));
}

#[test]
fn test_unknown_stencil_aborts() {
    let document = document_with(vec![
        json!({ "resourceId": "s", "stencil": { "id": "StartNoneEvent" }, "properties": {} }),
        json!({ "resourceId": "x", "stencil": { "id": "mystery-node" }, "properties": {} }),
    ]);
    let result = Converter::new().to_typed_model(&document);
    assert_eq!(
        result,
        Err(ConversionError::UnknownElementType("mystery-node".to_string()))
    );
}

#[test]
fn test_missing_identifier_aborts() {
    let document = document_with(vec![user_task("", json!({}))]);
    let result = Converter::new().to_typed_model(&document);
    assert_eq!(
        result,
        Err(ConversionError::MissingIdentifier {
            stencil: "UserTask".to_string()
        })
    );
}

#[test]
fn test_missing_process_id_uses_default() {
    let document = load(json!({ "properties": {}, "childShapes": [] }));
    let model = Converter::new().to_typed_model(&document).expect("converts");
    assert_eq!(model.id, "process");
    assert!(model.elements.is_empty());
}

#[test]
fn test_sub_process_contents_and_scope() {
    let document = load(json!({
        "properties": {
            "process_id": "nested",
            "sla": [{ "condition": "x", "expression": [] }]
        },
        "childShapes": [
            {
                "resourceId": "start",
                "stencil": { "id": "StartNoneEvent" },
                "properties": {},
                "outgoing": [{ "resourceId": "toSub" }]
            },
            flow("toSub", "sub", serde_json::Value::Null),
            {
                "resourceId": "sub",
                "stencil": { "id": "SubProcess" },
                "properties": { "name": "Inner" },
                "childShapes": [
                    {
                        "resourceId": "innerStart",
                        "stencil": { "id": "StartNoneEvent" },
                        "properties": {},
                        "outgoing": [{ "resourceId": "innerFlow" }]
                    },
                    flow(
                        "innerFlow",
                        "innerEnd",
                        json!({
                            "expression": "region==north",
                            "data": [{ "key": "region", "symbol": "==", "value": "north" }]
                        })
                    ),
                    { "resourceId": "innerEnd", "stencil": { "id": "EndNoneEvent" }, "properties": {} }
                ]
            }
        ]
    }));
    let model = convert(&document).model;

    assert_eq!(model.elements.len(), 3);
    assert_eq!(model.iter_elements().len(), 6);

    let Some(TypedElement::SubProcess(sub)) = model.find("sub") else {
        panic!("sub-process missing");
    };
    assert_eq!(sub.elements.len(), 3);
    let Some(TypedElement::StartEvent(inner)) = model.find("innerStart") else {
        panic!("inner start missing");
    };
    assert!(!inner.base.extensions.contains(names::SLA));
    assert!(!inner.base.extensions.contains(names::CONDITION_KEYS));

    let Some(TypedElement::SequenceFlow(inner_flow)) = model.find("innerFlow") else {
        panic!("inner flow missing");
    };
    assert_eq!(inner_flow.source_ref, "innerStart");

    let start = model.primary_start_event().expect("top-level start");
    assert_eq!(start.base.id, "start");
    assert!(start.base.extensions.contains(names::SLA));
    assert_eq!(start.base.extensions.first_text(names::CONDITION_KEYS), Some("region"));

    assert_round_trip(&document);
}

#[test]
fn test_typed_start_events() {
    let document = document_with(vec![json!({
        "resourceId": "timer",
        "stencil": { "id": "StartTimerEvent" },
        "properties": { "timercycledefinition": "R3/PT10H" }
    })]);
    let TypedElement::StartEvent(event) = only_element(&document) else {
        panic!("expected a start event");
    };
    match event.event_definitions.as_slice() {
        [EventDefinition::Timer(timer)] => {
            assert_eq!(timer.time_cycle, Some("R3/PT10H".to_string()));
            assert_eq!(timer.time_date, None);
        }
        other => panic!("unexpected definitions {other:?}"),
    }
    assert_round_trip(&document);
}

#[test]
fn test_message_start_round_trip() {
    let document = document_with(vec![json!({
        "resourceId": "msg",
        "stencil": { "id": "StartMessageEvent" },
        "properties": { "messageref": "orderReceived", "initiator": "starter" }
    })]);
    let TypedElement::StartEvent(event) = only_element(&document) else {
        panic!("expected a start event");
    };
    assert_eq!(event.initiator, Some("starter".to_string()));
    assert_eq!(
        event.event_definitions,
        vec![EventDefinition::Message {
            message_ref: Some("orderReceived".to_string())
        }]
    );
    assert_round_trip(&document);
}

#[test]
fn test_user_task_fields_and_blocks() {
    let document = document_with(vec![user_task(
        "t1",
        json!({
            "name": "Approve",
            "prioritydefinition": "50",
            "duedatedefinition": "P2D",
            "categorydefinition": "finance",
            "formkey": { "id": "approve-form", "name": "Approve form" },
            "slanode": [{ "hours": 4 }],
            "sptnode": { "limit": 2 },
            "submitpattern": { "value": 1, "name": "Any" },
            "usertaskassignment": {
                "assignment": {
                    "type": "idm",
                    "idm": { "type": "users", "candidateUsers": [{ "id": "u1" }] }
                }
            }
        }),
    )]);
    let TypedElement::UserTask(task) = only_element(&document) else {
        panic!("expected a user task");
    };

    assert_eq!(task.priority, Some("50".to_string()));
    assert_eq!(task.due_date, Some("P2D".to_string()));
    assert_eq!(task.category, Some("finance".to_string()));
    assert_eq!(task.form_key, Some("approve-form".to_string()));
    assert_eq!(task.candidate_users, vec!["u1"]);

    let extensions = &task.base.extensions;
    assert_eq!(extensions.first_text(names::FORM_NAME), Some("Approve form"));
    assert_eq!(extensions.first_text(names::SLA_NODE), Some(r#"[{"hours":4}]"#));
    assert_eq!(extensions.first_text(names::SPT_NODE), Some(r#"{"limit":2}"#));
    assert_eq!(extensions.first_text(names::SUBMIT_PATTERN), Some("1"));

    assert_round_trip(&document);
}

#[test]
fn test_double_encoded_block_is_decoded() {
    let encoded = json!(json!([{ "a": 1 }]).to_string()).to_string();
    let document = document_with(vec![user_task("t1", json!({ "sopnode": encoded }))]);
    let TypedElement::UserTask(task) = only_element(&document) else {
        panic!("expected a user task");
    };
    assert_eq!(task.base.extensions.first_text(names::SOP_NODE), Some(r#"[{"a":1}]"#));
}

#[test]
fn test_malformed_block_is_reported_and_skipped() {
    let document = document_with(vec![user_task(
        "t1",
        json!({ "overrideid": "approve", "winode": "not json at all" }),
    )]);
    let output = convert(&document);

    let TypedElement::UserTask(task) = &output.model.elements[0] else {
        panic!("expected a user task");
    };
    assert!(!task.base.extensions.contains(names::WI_NODE));
    assert_eq!(
        output.diagnostics,
        vec![ConversionWarning::MalformedProperty {
            element_id: "approve".to_string(),
            property: "winode".to_string(),
            expected: "an array",
            found: "text",
        }]
    );
}

#[test]
fn test_assignment_as_json_text() {
    let wrapper = json!({ "assignment": { "type": "static", "assignee": "carol" } }).to_string();
    let document = document_with(vec![user_task("t1", json!({ "usertaskassignment": wrapper }))]);
    let TypedElement::UserTask(task) = only_element(&document) else {
        panic!("expected a user task");
    };
    assert_eq!(task.assignee, Some("carol".to_string()));
}

#[test]
fn test_form_reference_resolved_through_context() {
    let document = document_with(vec![user_task(
        "t1",
        json!({ "formreference": { "id": "form-7", "name": "Leave" } }),
    )]);
    let context = ConversionContext::new().with_form(ModelInfo::new("form-7", "Leave", "leave"));
    let converter = Converter::new();
    let output = converter
        .to_typed_model_with(&document, &context)
        .expect("converts");

    let TypedElement::UserTask(task) = &output.model.elements[0] else {
        panic!("expected a user task");
    };
    assert_eq!(task.form_key, Some("leave".to_string()));
    let reference = task.base.extensions.first(names::FORM_REFERENCE).expect("reference kept");
    assert_eq!(reference.text, "form-7");
    assert_eq!(reference.attribute("name"), Some("Leave"));

    let rendered = converter.to_graph_document_with(&output.model, &context);
    let form = rendered.child_shapes[0]
        .property("formreference")
        .expect("form reference rendered");
    assert_eq!(form.field_text("id"), Some("form-7".to_string()));
    assert_eq!(form.field_text("key"), Some("leave".to_string()));
}

#[test]
fn test_service_delegate_override_by_default() {
    let document = document_with(vec![json!({
        "resourceId": "svc",
        "stencil": { "id": "ServiceTask" },
        "properties": {
            "servicetaskexpression": "${mailer.send()}",
            "servicetaskresultvariable": "sent",
            "asynchronousdefinition": "true",
            "formkey": "svc-form"
        }
    })]);
    let TypedElement::ServiceTask(task) = only_element(&document) else {
        panic!("expected a service task");
    };
    assert_eq!(
        task.implementation,
        Some(ServiceImplementation::Class(DEFAULT_SERVICE_DELEGATE.to_string()))
    );
    assert_eq!(task.result_variable, Some("sent".to_string()));
    assert!(task.asynchronous);
    assert_eq!(task.base.extensions.first_text(names::FORM_KEY), Some("svc-form"));

    assert_round_trip(&document);
}

#[test]
fn test_service_delegate_preserved_when_configured() {
    let config = ConverterConfig {
        service_delegate: ServiceDelegatePolicy::Preserve,
        ..Default::default()
    };
    let document = document_with(vec![json!({
        "resourceId": "svc",
        "stencil": { "id": "ServiceTask" },
        "properties": { "servicetaskexpression": "${mailer.send()}" }
    })]);
    let model = Converter::builder(config)
        .build()
        .to_typed_model(&document)
        .expect("converts");

    let TypedElement::ServiceTask(task) = &model.elements[0] else {
        panic!("expected a service task");
    };
    assert_eq!(
        task.implementation,
        Some(ServiceImplementation::Expression("${mailer.send()}".to_string()))
    );
}

#[test]
fn test_stencil_alias() {
    let document = document_with(vec![json!({
        "resourceId": "t1",
        "stencil": { "id": "ApprovalTask" },
        "properties": { "name": "Approve" }
    })]);
    assert!(Converter::new().to_typed_model(&document).is_err());

    let converter = Converter::builder(ConverterConfig::default())
        .with_stencil_alias("ApprovalTask", "UserTask")
        .build();
    let model = converter.to_typed_model(&document).expect("converts");
    assert_eq!(model.elements[0].kind(), ElementKind::UserTask);
}

#[test]
fn test_stencil_alias_from_config() {
    let config = ConverterConfig::from_json_str(
        r#"{ "stencilAliases": [["DecisionGateway", "ExclusiveGateway"]] }"#,
    )
    .expect("valid config");
    let document = document_with(vec![json!({
        "resourceId": "g",
        "stencil": { "id": "DecisionGateway" },
        "properties": {}
    })]);
    let model = Converter::builder(config)
        .build()
        .to_typed_model(&document)
        .expect("converts");
    assert_eq!(model.elements[0].kind(), ElementKind::ExclusiveGateway);
}

struct TerminateAsEnd;

impl ElementConverter for TerminateAsEnd {
    fn stencil_id(&self) -> &str {
        "EndTerminateEvent"
    }

    fn element_kind(&self) -> ElementKind {
        ElementKind::EndEvent
    }

    fn to_typed(
        &self,
        node: &GraphNode,
        _scope: &mut ConversionScope<'_>,
    ) -> std::result::Result<TypedElement, ConversionError> {
        Ok(TypedElement::EndEvent(EndEvent {
            base: BaseElement::new(node.resource_id.clone()),
        }))
    }
}

#[test]
fn test_custom_converter() {
    let document = document_with(vec![json!({
        "resourceId": "stop",
        "stencil": { "id": "EndTerminateEvent" },
        "properties": {}
    })]);
    let converter = Converter::builder(ConverterConfig::default())
        .with_custom_converter(Arc::new(TerminateAsEnd))
        .build();
    let model = converter.to_typed_model(&document).expect("converts");
    assert_eq!(model.elements[0].kind(), ElementKind::EndEvent);
    assert_eq!(model.elements[0].id(), "stop");
}

#[test]
fn test_shared_registry_contents() {
    let registry = ConverterRegistry::shared();
    assert_eq!(registry.stencil_ids().count(), 12);
    let gateway = registry.lookup("ParallelGateway").expect("registered");
    assert_eq!(gateway.element_kind(), ElementKind::ParallelGateway);
    assert!(registry.lookup("mystery-node").is_none());
}

#[test]
fn test_approval_process_round_trip() {
    let document = load(approval_process());
    assert_round_trip(&document);

    let converter = Converter::new();
    let model = converter.to_typed_model(&document).expect("converts");
    let rendered = converter.to_graph_document(&model);
    assert_eq!(rendered.resource_id, Some("canvas".to_string()));
    assert_eq!(rendered.property_text("process_id"), Some("approval".to_string()));

    let start = &rendered.child_shapes[0];
    assert_eq!(start.property_text("overrideid"), Some("startEvent".to_string()));
    assert_eq!(start.outgoing[0].resource_id, "flow1");
    assert_eq!(start.property_text("conditionKeys"), Some("amount".to_string()));
}

#[test]
fn test_structured_condition_without_operands() {
    let document = document_with(vec![
        json!({
            "resourceId": "s",
            "stencil": { "id": "StartNoneEvent" },
            "properties": {},
            "outgoing": [{ "resourceId": "f" }]
        }),
        flow("f", "e", json!({ "expression": "${ok}", "data": [] })),
        json!({ "resourceId": "e", "stencil": { "id": "EndNoneEvent" }, "properties": {} }),
    ]);
    let model = convert(&document).model;
    let flow = &model.sequence_flows()[0];
    assert_eq!(flow.condition_expression, Some("${ok}".to_string()));
    assert!(flow.operands.is_empty());
    assert!(flow.structured_condition);

    let rendered = Converter::new().to_graph_document(&model);
    let condition = rendered.child_shapes[1]
        .property("conditionsequenceflow")
        .expect("condition rendered");
    assert_eq!(condition, &property(json!({ "expression": "${ok}", "data": [] })));
}

#[test]
fn test_graph_round_trip_events_gateways_and_flows() {
    let mut document = canonical(vec![
        json!({
            "resourceId": "start",
            "stencil": { "id": "StartNoneEvent" },
            "properties": {
                "overrideid": "begin",
                "name": "Begin",
                "documentation": "Kick off",
                "initiator": "starter",
                "formkey": "f1",
                "conditionKeys": "amount"
            },
            "outgoing": [{ "resourceId": "f1" }]
        }),
        flow("f1", "gw", serde_json::Value::Null),
        json!({
            "resourceId": "gw",
            "stencil": { "id": "ExclusiveGateway" },
            "properties": { "name": "Route?" },
            "outgoing": [{ "resourceId": "f2" }, { "resourceId": "f3" }]
        }),
        flow(
            "f2",
            "fork",
            json!({
                "expression": "amount>1000",
                "data": [{ "key": "amount", "symbol": ">", "value": "1000" }]
            }),
        ),
        flow("f3", "end", json!({ "expression": "${ok}", "data": [] })),
        json!({
            "resourceId": "fork",
            "stencil": { "id": "ParallelGateway" },
            "properties": {},
            "outgoing": [{ "resourceId": "f4" }]
        }),
        flow("f4", "end", json!("${done}")),
        json!({
            "resourceId": "end",
            "stencil": { "id": "EndNoneEvent" },
            "properties": { "documentation": "Done" }
        }),
    ]);
    document["childShapes"][3]["properties"]["name"] = json!("big");
    document["properties"]["name"] = json!("Routing");
    document["properties"]["sla"] = json!([{ "condition": "amount>1000", "expression": [] }]);
    document["properties"]["processtasktitle"] = json!([{ "field": "title" }]);

    assert_graph_round_trip(document);
}

#[test]
fn test_graph_round_trip_typed_start_events() {
    assert_graph_round_trip(canonical(vec![
        json!({
            "resourceId": "timer",
            "stencil": { "id": "StartTimerEvent" },
            "properties": { "timerdurationdefinition": "PT5M", "timercycledefinition": "R3/PT10H" }
        }),
        json!({
            "resourceId": "error",
            "stencil": { "id": "StartErrorEvent" },
            "properties": { "errorref": "E42" }
        }),
        json!({
            "resourceId": "msg",
            "stencil": { "id": "StartMessageEvent" },
            "properties": { "messageref": "orderReceived", "initiator": "starter" }
        }),
        json!({
            "resourceId": "signal",
            "stencil": { "id": "StartSignalEvent" },
            "properties": { "signalref": "go" }
        }),
    ]));
}

#[test]
fn test_graph_round_trip_service_tasks() {
    assert_graph_round_trip(canonical(vec![json!({
        "resourceId": "svc",
        "stencil": { "id": "ServiceTask" },
        "properties": {
            "name": "Notify",
            "servicetaskclass": DEFAULT_SERVICE_DELEGATE,
            "servicetaskresultvariable": "sent",
            "asynchronousdefinition": true,
            "formkey": "svc-form"
        }
    })]));

    let preserving = Converter::builder(ConverterConfig {
        service_delegate: ServiceDelegatePolicy::Preserve,
        ..Default::default()
    })
    .build();
    assert_graph_round_trip_with(
        &preserving,
        canonical(vec![json!({
            "resourceId": "svc",
            "stencil": { "id": "ServiceTask" },
            "properties": { "servicetaskdelegateexpression": "${mailer}" }
        })]),
    );
}

#[test]
fn test_graph_round_trip_static_user_task() {
    assert_graph_round_trip(canonical(vec![user_task(
        "review",
        json!({
            "name": "Review",
            "prioritydefinition": "50",
            "duedatedefinition": "P2D",
            "categorydefinition": "finance",
            "formkey": { "id": "approve-form", "name": "Approve form" },
            "usertaskassignment": {
                "assignment": {
                    "type": "static",
                    "assignee": {
                        "value": "alice",
                        "name": "Alice",
                        "organizationId": "org1",
                        "organizationName": "Head Office"
                    },
                    "candidateUsers": [{ "value": "u1" }, { "value": "u2" }],
                    "candidateGroups": [
                        { "value": "g1", "name": "Sales, North" },
                        { "value": "g2" }
                    ],
                    "apply": { "value": "2", "name": "Applicant" },
                    "superior": { "value": "1", "name": "Direct manager" },
                    "candidatePosition": [{ "id": "p1" }],
                    "initiatorCanCompleteTask": true
                }
            },
            "slanode": [{ "hours": 4 }],
            "sptnode": { "limit": 2 },
            "sopnode": [{ "step": 1 }],
            "winode": [{ "doc": "guide" }],
            "executionCondition": [{ "key": "region" }],
            "submitpattern": { "value": 1, "name": "Any" },
            "taskactivatepattern": { "value": "manual", "name": "Manual" }
        }),
    )]));
}

#[test]
fn test_graph_round_trip_directory_bound_user_tasks() {
    let idm = |directory: serde_json::Value, can_complete: Option<bool>| {
        let mut assignment = json!({ "type": "idm", "idm": directory });
        if let Some(flag) = can_complete {
            assignment["initiatorCanCompleteTask"] = json!(flag);
        }
        json!({ "usertaskassignment": { "assignment": assignment } })
    };

    assert_graph_round_trip(canonical(vec![
        user_task(
            "person",
            idm(
                json!({
                    "type": "user",
                    "assignee": {
                        "id": "u7",
                        "email": "u7@example.com",
                        "firstName": "Una",
                        "lastName": "Seven",
                        "externalId": "ext-7"
                    }
                }),
                Some(false),
            ),
        ),
        user_task(
            "people",
            idm(
                json!({
                    "type": "users",
                    "candidateUsers": [
                        { "id": "u1", "firstName": "Ann" },
                        { "email": "x@example.com" }
                    ]
                }),
                Some(false),
            ),
        ),
        user_task(
            "groups",
            idm(
                json!({
                    "type": "groups",
                    "candidateGroups": [{ "id": "g1", "name": "Sales", "externalId": "x1" }],
                    "candidateGroupFields": [{ "id": "dept", "name": "Department" }]
                }),
                Some(true),
            ),
        ),
        user_task(
            "field",
            idm(
                json!({ "type": "user", "assigneeField": { "id": "approver", "name": "Approver" } }),
                Some(false),
            ),
        ),
        user_task("initiator", idm(json!({ "type": "initiator" }), None)),
    ]));
}

#[test]
fn test_graph_round_trip_sub_process() {
    assert_graph_round_trip(canonical(vec![
        json!({
            "resourceId": "start",
            "stencil": { "id": "StartNoneEvent" },
            "properties": {},
            "outgoing": [{ "resourceId": "toSub" }]
        }),
        flow("toSub", "sub", serde_json::Value::Null),
        json!({
            "resourceId": "sub",
            "stencil": { "id": "SubProcess" },
            "properties": { "name": "Inner" },
            "childShapes": [
                {
                    "resourceId": "innerStart",
                    "stencil": { "id": "StartNoneEvent" },
                    "properties": {},
                    "outgoing": [{ "resourceId": "innerFlow" }]
                },
                flow("innerFlow", "innerEnd", serde_json::Value::Null),
                { "resourceId": "innerEnd", "stencil": { "id": "EndNoneEvent" }, "properties": {} }
            ],
            "outgoing": [{ "resourceId": "fromSub" }]
        }),
        flow("fromSub", "end", serde_json::Value::Null),
        json!({ "resourceId": "end", "stencil": { "id": "EndNoneEvent" }, "properties": {} }),
    ]));
}
