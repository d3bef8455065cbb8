//! Common test fixtures: editor documents and in-memory collaborators.
use chrono::{DateTime, TimeZone, Utc};
use procmodel::converter::{GroupInfo, ModelInfo, UserInfo};
use procmodel::error::ServiceError;
use procmodel::converter::{ConversionOutput, Converter};
use procmodel::graph::{GraphDocument, PropertyValue};
use procmodel::model::ProcessDefinitionModel;
use procmodel::service::{
    DeploymentTrigger, FormLookup, IdentityLookup, ModelRepository, StoredModel,
};
use serde_json::{Value as JsonValue, json};

/// A small approval process.
///
/// Start (override id `startEvent`, form `f1`) -> Review (static assignee `alice`)
/// -> exclusive gateway -> Notify (service task) or End. The gateway's first
/// branch carries an `amount>1000` condition with one operand.
#[allow(dead_code)]
pub fn approval_process() -> JsonValue {
    json!({
        "resourceId": "canvas",
        "stencil": { "id": "BPMNDiagram" },
        "properties": { "process_id": "approval", "name": "Approval" },
        "childShapes": [
            {
                "resourceId": "start",
                "stencil": { "id": "StartNoneEvent" },
                "properties": { "overrideid": "startEvent", "formkey": "f1" },
                "outgoing": [{ "resourceId": "flow1" }]
            },
            {
                "resourceId": "review",
                "stencil": { "id": "UserTask" },
                "properties": {
                    "name": "Review",
                    "usertaskassignment": {
                        "assignment": { "type": "static", "assignee": "alice" }
                    }
                },
                "outgoing": [{ "resourceId": "flow2" }]
            },
            {
                "resourceId": "gw",
                "stencil": { "id": "ExclusiveGateway" },
                "properties": {},
                "outgoing": [{ "resourceId": "flow3" }, { "resourceId": "flow4" }]
            },
            {
                "resourceId": "notify",
                "stencil": { "id": "ServiceTask" },
                "properties": { "name": "Notify" },
                "outgoing": [{ "resourceId": "flow5" }]
            },
            {
                "resourceId": "end",
                "stencil": { "id": "EndNoneEvent" },
                "properties": {}
            },
            flow("flow1", "review", JsonValue::Null),
            flow("flow2", "gw", JsonValue::Null),
            flow(
                "flow3",
                "notify",
                json!({
                    "expression": "amount>1000",
                    "data": [{ "key": "amount", "symbol": ">", "value": "1000" }]
                })
            ),
            flow("flow4", "end", json!("${amount<=1000}")),
            flow("flow5", "end", JsonValue::Null)
        ]
    })
}

/// A sequence flow shape; a null condition is left out.
#[allow(dead_code)]
pub fn flow(resource_id: &str, target: &str, condition: JsonValue) -> JsonValue {
    let mut properties = serde_json::Map::new();
    if !condition.is_null() {
        properties.insert("conditionsequenceflow".to_string(), condition);
    }
    json!({
        "resourceId": resource_id,
        "stencil": { "id": "SequenceFlow" },
        "properties": properties,
        "target": { "resourceId": target },
        "outgoing": [{ "resourceId": target }]
    })
}

/// A document holding `shapes` under a canvas with process id `test`.
#[allow(dead_code)]
pub fn document_with(shapes: Vec<JsonValue>) -> GraphDocument {
    load(json!({
        "resourceId": "canvas",
        "properties": { "process_id": "test" },
        "childShapes": shapes
    }))
}

/// A single user task shape with the given properties.
#[allow(dead_code)]
pub fn user_task(resource_id: &str, properties: JsonValue) -> JsonValue {
    json!({
        "resourceId": resource_id,
        "stencil": { "id": "UserTask" },
        "properties": properties
    })
}

#[allow(dead_code)]
pub fn load(value: JsonValue) -> GraphDocument {
    GraphDocument::from_value(value).expect("fixture is a valid graph document")
}

#[allow(dead_code)]
pub fn convert(document: &GraphDocument) -> ConversionOutput {
    Converter::new()
        .to_typed_model_with_diagnostics(document)
        .expect("fixture converts")
}

#[allow(dead_code)]
pub fn property(value: JsonValue) -> PropertyValue {
    PropertyValue::from(value)
}

#[allow(dead_code)]
pub fn timestamp(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[allow(dead_code)]
pub fn stored_model(id: &str, key: &str, editor_json: &str) -> StoredModel {
    StoredModel {
        id: id.to_string(),
        name: format!("Model {id}"),
        key: key.to_string(),
        description: Some("stored".to_string()),
        editor_json: editor_json.to_string(),
        version: 1,
        last_updated: timestamp(9),
        last_updated_by: "owner".to_string(),
        comment: None,
    }
}

/// Vec-backed repository. Created models get sequential ids.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MemoryRepository {
    pub models: Vec<StoredModel>,
}

#[allow(dead_code)]
impl MemoryRepository {
    pub fn with(models: Vec<StoredModel>) -> Self {
        Self { models }
    }
}

impl ModelRepository for MemoryRepository {
    fn find(&self, id: &str) -> Option<StoredModel> {
        self.models.iter().find(|model| model.id == id).cloned()
    }

    fn key_in_use(&self, key: &str, excluding_id: &str) -> bool {
        self.models
            .iter()
            .any(|model| model.key == key && model.id != excluding_id)
    }

    fn update(&mut self, mut model: StoredModel, new_version: bool) -> Result<StoredModel, ServiceError> {
        let slot = self
            .models
            .iter_mut()
            .find(|stored| stored.id == model.id)
            .ok_or_else(|| ServiceError::Storage(format!("no model '{}'", model.id)))?;
        if new_version {
            model.version += 1;
        }
        *slot = model.clone();
        Ok(model)
    }

    fn create(&mut self, mut model: StoredModel) -> Result<StoredModel, ServiceError> {
        model.id = format!("model-{}", self.models.len() + 1);
        if model.key.is_empty() {
            model.key = model.id.clone();
        }
        self.models.push(model.clone());
        Ok(model)
    }
}

/// Records the process ids it was asked to deploy.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingDeployment {
    pub deployed: Vec<String>,
}

impl DeploymentTrigger for RecordingDeployment {
    fn deploy(&mut self, model: &ProcessDefinitionModel) -> Result<(), ServiceError> {
        self.deployed.push(model.id.clone());
        Ok(())
    }
}

#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct StaticForms {
    pub forms: Vec<ModelInfo>,
}

impl FormLookup for StaticForms {
    fn lookup_form(&self, id: &str) -> Option<ModelInfo> {
        self.forms.iter().find(|form| form.id == id).cloned()
    }

    fn lookup_model(&self, id: &str) -> Option<ModelInfo> {
        self.lookup_form(id)
    }
}

#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct StaticDirectory {
    pub users: Vec<UserInfo>,
    pub groups: Vec<GroupInfo>,
    pub organizations: Vec<(String, String)>,
}

impl IdentityLookup for StaticDirectory {
    fn lookup_user(&self, id: &str) -> Option<UserInfo> {
        self.users.iter().find(|user| user.id == id).cloned()
    }

    fn lookup_group(&self, id: &str) -> Option<GroupInfo> {
        self.groups.iter().find(|group| group.id == id).cloned()
    }

    fn lookup_organization(&self, id: &str) -> Option<String> {
        self.organizations
            .iter()
            .find(|(org, _)| org == id)
            .map(|(_, name)| name.clone())
    }
}
