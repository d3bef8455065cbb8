//! Tests for the model save, load and deploy entry points.
mod common;
use common::*;
use procmodel::converter::{Converter, ModelInfo};
use procmodel::error::{ConversionError, ServiceError};
use procmodel::model::TypedElement;
use procmodel::service::{ConflictResolution, ModelEditor, SaveOutcome, SaveRequest};
use serde_json::json;

type Editor = ModelEditor<MemoryRepository, RecordingDeployment>;

fn editor_with(models: Vec<procmodel::service::StoredModel>) -> Editor {
    ModelEditor::new(
        Converter::new(),
        MemoryRepository::with(models),
        RecordingDeployment::default(),
    )
}

fn dated_condition_json() -> String {
    json!({
        "resourceId": "canvas",
        "properties": { "process_id": "dated" },
        "childShapes": [
            flow(
                "f1",
                "end",
                json!({
                    "expression": "deadline<2024-01-01",
                    "data": [{ "key": "deadline", "symbol": "<", "value": "2024-01-01" }]
                })
            ),
            { "resourceId": "end", "stencil": { "id": "EndNoneEvent" }, "properties": {} }
        ]
    })
    .to_string()
}

fn request(model_id: &str, loaded_hour: u32, user_id: &str) -> SaveRequest {
    SaveRequest {
        model_id: model_id.to_string(),
        last_updated: timestamp(loaded_hour),
        json: dated_condition_json(),
        name: "Renamed".to_string(),
        key: "dated".to_string(),
        description: Some("edited".to_string()),
        conflict_resolution: None,
        save_as_name: None,
        new_version: false,
        comment: Some("second draft".to_string()),
        user_id: user_id.to_string(),
    }
}

#[test]
fn test_save_with_current_timestamp() {
    let mut editor = editor_with(vec![stored_model("m1", "dated", "")]);
    let outcome = editor.save_model(request("m1", 9, "owner")).expect("saves");

    let SaveOutcome::Saved(saved) = outcome else {
        panic!("expected a plain save");
    };
    assert_eq!(saved.name, "Renamed");
    assert_eq!(saved.version, 1);
    assert_eq!(saved.comment, None);
    assert!(saved.editor_json.contains("staticValue"));
    assert_eq!(editor.repository().models[0].description, Some("edited".to_string()));
}

#[test]
fn test_stale_save_by_someone_else_conflicts() {
    let mut editor = editor_with(vec![stored_model("m1", "dated", "")]);
    let outcome = editor.save_model(request("m1", 8, "intruder")).expect("answers");

    match outcome {
        SaveOutcome::Conflict(report) => {
            assert_eq!(report.model_name, "Renamed");
            assert_eq!(report.last_updated_by, "owner");
            assert!(!report.new_version_allowed);
        }
        other => panic!("expected a conflict, got {other:?}"),
    }
    assert_eq!(editor.repository().models[0].name, "Model m1");
}

#[test]
fn test_stale_save_by_owner_without_new_version_conflicts() {
    let mut editor = editor_with(vec![stored_model("m1", "dated", "")]);
    let outcome = editor.save_model(request("m1", 8, "owner")).expect("answers");
    assert!(matches!(
        outcome,
        SaveOutcome::Conflict(report) if report.new_version_allowed
    ));
}

#[test]
fn test_owner_may_force_new_version() {
    let mut editor = editor_with(vec![stored_model("m1", "dated", "")]);
    let mut save = request("m1", 8, "owner");
    save.new_version = true;

    let SaveOutcome::Saved(saved) = editor.save_model(save).expect("saves") else {
        panic!("expected a save");
    };
    assert_eq!(saved.version, 2);
    assert_eq!(saved.comment, Some("second draft".to_string()));
}

#[test]
fn test_overwrite_resolution() {
    let mut editor = editor_with(vec![stored_model("m1", "dated", "")]);
    let mut save = request("m1", 8, "intruder");
    save.conflict_resolution = Some(ConflictResolution::Overwrite);

    let SaveOutcome::Saved(saved) = editor.save_model(save).expect("saves") else {
        panic!("expected a save");
    };
    assert_eq!(saved.version, 1);
    assert_eq!(saved.last_updated_by, "intruder");
}

#[test]
fn test_save_as_creates_a_copy() {
    let mut editor = editor_with(vec![stored_model("m1", "dated", "")]);
    let mut save = request("m1", 8, "intruder");
    save.conflict_resolution = Some(ConflictResolution::SaveAs);
    save.save_as_name = Some("Copy".to_string());

    let SaveOutcome::Created(created) = editor.save_model(save).expect("creates") else {
        panic!("expected a new model");
    };
    assert_eq!(created.id, "model-2");
    assert_eq!(created.name, "Copy");
    assert_eq!(created.version, 1);
    assert_eq!(created.description, Some("stored".to_string()));
    assert_eq!(editor.repository().models.len(), 2);
    assert_eq!(editor.repository().models[0].name, "Model m1");
}

#[test]
fn test_save_as_needs_a_name() {
    let mut editor = editor_with(vec![stored_model("m1", "dated", "")]);
    let mut save = request("m1", 8, "intruder");
    save.conflict_resolution = Some(ConflictResolution::SaveAs);
    save.save_as_name = Some("  ".to_string());

    assert_eq!(
        editor.save_model(save),
        Err(ServiceError::MissingSaveAsName("m1".to_string()))
    );
}

#[test]
fn test_key_in_use_is_rejected() {
    let mut editor = editor_with(vec![
        stored_model("m1", "first", ""),
        stored_model("m2", "dated", ""),
    ]);
    assert_eq!(
        editor.save_model(request("m1", 9, "owner")),
        Err(ServiceError::KeyAlreadyExists("dated".to_string()))
    );
}

#[test]
fn test_unknown_model() {
    let mut editor = editor_with(Vec::new());
    assert_eq!(
        editor.save_model(request("missing", 9, "owner")),
        Err(ServiceError::ModelNotFound("missing".to_string()))
    );
    assert_eq!(
        editor.load_editor_json("missing"),
        Err(ServiceError::ModelNotFound("missing".to_string()))
    );
}

#[test]
fn test_invalid_json_is_not_stored() {
    let mut editor = editor_with(vec![stored_model("m1", "dated", "")]);
    let mut save = request("m1", 9, "owner");
    save.json = "{ broken".to_string();

    assert!(matches!(
        editor.save_model(save),
        Err(ServiceError::Conversion(ConversionError::JsonParse(_)))
    ));
    assert!(editor.repository().models[0].editor_json.is_empty());
}

#[test]
fn test_save_keeps_editor_layout() {
    let mut editor = editor_with(vec![stored_model("m1", "dated", "")]);
    let mut save = request("m1", 9, "owner");
    save.json = json!({
        "resourceId": "canvas",
        "stencil": { "id": "BPMNDiagram" },
        "stencilset": { "url": "stencilsets/bpmn2.0/bpmn2.0.json" },
        "ssextensions": [],
        "bounds": { "lowerRight": { "x": 1200, "y": 1050 }, "upperLeft": { "x": 0, "y": 0 } },
        "properties": { "process_id": "dated" },
        "childShapes": [
            {
                "resourceId": "start",
                "stencil": { "id": "StartNoneEvent" },
                "properties": {},
                "bounds": { "lowerRight": { "x": 130, "y": 193 }, "upperLeft": { "x": 100, "y": 163 } },
                "dockers": [],
                "outgoing": [{ "resourceId": "f1" }]
            },
            {
                "resourceId": "f1",
                "stencil": { "id": "SequenceFlow" },
                "properties": {},
                "dockers": [{ "x": 15, "y": 15 }, { "x": 50, "y": 40 }],
                "target": { "resourceId": "end" },
                "outgoing": [{ "resourceId": "end" }]
            },
            { "resourceId": "end", "stencil": { "id": "EndNoneEvent" }, "properties": {} }
        ]
    })
    .to_string();
    editor.save_model(save).expect("saves");

    let stored: serde_json::Value =
        serde_json::from_str(&editor.repository().models[0].editor_json).expect("stored JSON");
    assert_eq!(stored["stencilset"]["url"], json!("stencilsets/bpmn2.0/bpmn2.0.json"));
    assert_eq!(stored["ssextensions"], json!([]));
    assert_eq!(stored["bounds"]["lowerRight"]["x"], json!(1200));
    assert_eq!(stored["childShapes"][0]["bounds"]["upperLeft"]["y"], json!(163));
    assert_eq!(stored["childShapes"][1]["dockers"][1], json!({ "x": 50, "y": 40 }));

    let loaded = editor.load_editor_json("m1").expect("loads");
    assert_eq!(loaded["model"]["childShapes"][0]["bounds"], stored["childShapes"][0]["bounds"]);
    assert_eq!(loaded["model"]["stencilset"], stored["stencilset"]);
}

#[test]
fn test_load_restores_editor_text() {
    let mut editor = editor_with(vec![stored_model("m1", "dated", "")]);
    editor.save_model(request("m1", 9, "owner")).expect("saves");

    let loaded = editor.load_editor_json("m1").expect("loads");
    assert_eq!(loaded["modelId"], json!("m1"));
    assert_eq!(loaded["name"], json!("Renamed"));
    assert_eq!(loaded["model"]["modelType"], json!("model"));

    let expression =
        &loaded["model"]["childShapes"][0]["properties"]["conditionsequenceflow"]["expression"];
    let text = expression.as_str().expect("expression is text again");
    assert!(text.starts_with("deadline<"));
    assert!(!text.contains("2024-01-01"));
}

#[test]
fn test_load_empty_model_gives_blank_canvas() {
    let editor = editor_with(vec![stored_model("m1", "dated", "")]);
    let loaded = editor.load_editor_json("m1").expect("loads");
    assert_eq!(
        loaded["model"],
        json!({ "id": "canvas", "resourceId": "canvas", "modelType": "model" })
    );
    assert_eq!(loaded["lastUpdatedBy"], json!("owner"));
}

#[test]
fn test_deploy_resolves_forms() {
    let stored_json = document_json(vec![user_task(
        "apply",
        json!({ "formreference": { "id": "form-7" } }),
    )]);
    let mut editor = editor_with(vec![stored_model("m1", "leave", &stored_json)]);
    let forms = StaticForms {
        forms: vec![ModelInfo::new("form-7", "Leave", "leave-form")],
    };

    let output = editor
        .deploy("m1", &forms, &StaticDirectory::default())
        .expect("deploys");

    let Some(TypedElement::UserTask(task)) = output.model.find("apply") else {
        panic!("user task missing");
    };
    assert_eq!(task.form_key, Some("leave-form".to_string()));
    assert_eq!(editor.deployment().deployed, vec!["test".to_string()]);
}

fn document_json(shapes: Vec<serde_json::Value>) -> String {
    json!({
        "resourceId": "canvas",
        "properties": { "process_id": "test" },
        "childShapes": shapes
    })
    .to_string()
}
