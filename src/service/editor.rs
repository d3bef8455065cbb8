use super::lookup::{DeploymentTrigger, FormLookup, IdentityLookup, ModelRepository, StoredModel};
use crate::converter::{ConversionContext, ConversionOutput, Converter};
use crate::error::{ConversionError, ServiceError};
use crate::graph::GraphDocument;
use crate::normalizer::{editor_view, normalize_document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

/// How the user chose to settle a save against a model changed in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictResolution {
    Overwrite,
    SaveAs,
    NewVersion,
}

/// A save from the editor, carrying the timestamp the editor last loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub model_id: String,
    pub last_updated: DateTime<Utc>,
    pub json: String,
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub conflict_resolution: Option<ConflictResolution>,
    #[serde(default)]
    pub save_as_name: Option<String>,
    #[serde(default)]
    pub new_version: bool,
    #[serde(default)]
    pub comment: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub model_name: String,
    pub last_updated_by: String,
    /// Only the user who last updated the model may force a new version.
    pub new_version_allowed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(StoredModel),
    Created(StoredModel),
    Conflict(ConflictReport),
}

/// Save, load and deploy entry points over a model repository.
pub struct ModelEditor<R, D> {
    converter: Converter,
    repository: R,
    deployment: D,
}

impl<R: ModelRepository, D: DeploymentTrigger> ModelEditor<R, D> {
    pub fn new(converter: Converter, repository: R, deployment: D) -> Self {
        Self {
            converter,
            repository,
            deployment,
        }
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn deployment(&self) -> &D {
        &self.deployment
    }

    /// Saves editor JSON, resolving concurrent edits.
    ///
    /// When the stored model changed after the editor loaded it, the request's
    /// resolution decides. Without one, the last updater may still force a new
    /// version; anyone else gets a conflict report and nothing is stored.
    pub fn save_model(&mut self, request: SaveRequest) -> Result<SaveOutcome, ServiceError> {
        let stored = self
            .repository
            .find(&request.model_id)
            .ok_or_else(|| ServiceError::ModelNotFound(request.model_id.clone()))?;

        if stored.last_updated == request.last_updated {
            return self.update(stored, request, false).map(SaveOutcome::Saved);
        }

        let is_owner = stored.last_updated_by == request.user_id;
        match request.conflict_resolution {
            Some(ConflictResolution::SaveAs) => self.save_as(&stored, request).map(SaveOutcome::Created),
            Some(ConflictResolution::Overwrite) => {
                self.update(stored, request, false).map(SaveOutcome::Saved)
            }
            Some(ConflictResolution::NewVersion) => {
                self.update(stored, request, true).map(SaveOutcome::Saved)
            }
            None if is_owner && request.new_version => {
                self.update(stored, request, true).map(SaveOutcome::Saved)
            }
            None => {
                log::info!(
                    "Model '{}' was updated by '{}' since it was loaded",
                    stored.id,
                    stored.last_updated_by
                );
                Ok(SaveOutcome::Conflict(ConflictReport {
                    model_name: request.name,
                    last_updated_by: stored.last_updated_by,
                    new_version_allowed: is_owner,
                }))
            }
        }
    }

    /// The stored graph as the editor expects it, wrapped in the model metadata.
    pub fn load_editor_json(&self, model_id: &str) -> Result<JsonValue, ServiceError> {
        let stored = self
            .repository
            .find(model_id)
            .ok_or_else(|| ServiceError::ModelNotFound(model_id.to_string()))?;

        let mut model = if stored.editor_json.trim().is_empty() {
            json!({ "id": "canvas", "resourceId": "canvas" })
        } else {
            let mut document = GraphDocument::from_json(&stored.editor_json)?;
            editor_view(&mut document);
            serde_json::to_value(&document)
                .map_err(|e| ConversionError::JsonParse(e.to_string()))?
        };
        if let JsonValue::Object(fields) = &mut model {
            fields.insert("modelType".to_string(), json!("model"));
        }

        Ok(json!({
            "modelId": stored.id,
            "name": stored.name,
            "key": stored.key,
            "description": stored.description,
            "lastUpdated": stored.last_updated,
            "lastUpdatedBy": stored.last_updated_by,
            "model": model,
        }))
    }

    /// Converts the stored graph with every reference pre-resolved and deploys it.
    pub fn deploy(
        &mut self,
        model_id: &str,
        forms: &dyn FormLookup,
        identities: &dyn IdentityLookup,
    ) -> Result<ConversionOutput, ServiceError> {
        let stored = self
            .repository
            .find(model_id)
            .ok_or_else(|| ServiceError::ModelNotFound(model_id.to_string()))?;
        let document = GraphDocument::from_json(&stored.editor_json)?;
        let context = ConversionContext::from_lookups(&document, forms, identities);
        let output = self.converter.to_typed_model_with(&document, &context)?;
        self.deployment.deploy(&output.model)?;
        log::info!("Deployed model '{}' as process '{}'", stored.id, output.model.id);
        Ok(output)
    }

    fn update(
        &mut self,
        stored: StoredModel,
        request: SaveRequest,
        force_new_version: bool,
    ) -> Result<StoredModel, ServiceError> {
        if self.repository.key_in_use(&request.key, &stored.id) {
            return Err(ServiceError::KeyAlreadyExists(request.key));
        }
        let new_version = force_new_version || request.new_version;
        let updated = StoredModel {
            id: stored.id,
            name: request.name,
            key: request.key,
            description: request.description,
            editor_json: normalized_json(&request.json)?,
            version: stored.version,
            last_updated: Utc::now(),
            last_updated_by: request.user_id,
            comment: if new_version { request.comment } else { None },
        };
        self.repository.update(updated, new_version)
    }

    fn save_as(
        &mut self,
        stored: &StoredModel,
        request: SaveRequest,
    ) -> Result<StoredModel, ServiceError> {
        let name = request
            .save_as_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ServiceError::MissingSaveAsName(stored.id.clone()))?;
        let created = StoredModel {
            id: String::new(),
            name,
            key: String::new(),
            description: stored.description.clone(),
            editor_json: normalized_json(&request.json)?,
            version: 1,
            last_updated: Utc::now(),
            last_updated_by: request.user_id,
            comment: None,
        };
        self.repository.create(created)
    }
}

fn normalized_json(json: &str) -> Result<String, ServiceError> {
    let mut document = GraphDocument::from_json(json)?;
    let warnings = normalize_document(&mut document);
    if !warnings.is_empty() {
        log::debug!("Normalized editor JSON with {} warnings", warnings.len());
    }
    Ok(document.to_json_string()?)
}
