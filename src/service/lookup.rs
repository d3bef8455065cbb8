use crate::converter::{GroupInfo, ModelInfo, UserInfo};
use crate::error::ServiceError;
use crate::model::ProcessDefinitionModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resolves form references from the form service.
pub trait FormLookup {
    fn lookup_form(&self, id: &str) -> Option<ModelInfo>;
    fn lookup_model(&self, id: &str) -> Option<ModelInfo>;
}

/// Resolves directory references for assignment display metadata.
pub trait IdentityLookup {
    fn lookup_user(&self, id: &str) -> Option<UserInfo>;
    fn lookup_group(&self, id: &str) -> Option<GroupInfo>;
    fn lookup_organization(&self, id: &str) -> Option<String>;
}

/// A stored editor model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredModel {
    pub id: String,
    pub name: String,
    pub key: String,
    pub description: Option<String>,
    /// Raw editor JSON; empty for a model that was never edited.
    pub editor_json: String,
    pub version: u32,
    pub last_updated: DateTime<Utc>,
    pub last_updated_by: String,
    pub comment: Option<String>,
}

/// Persistence for editor models, keyed by opaque id.
pub trait ModelRepository {
    fn find(&self, id: &str) -> Option<StoredModel>;

    /// Whether another model than `excluding_id` already uses `key`.
    fn key_in_use(&self, key: &str, excluding_id: &str) -> bool;

    /// Stores an update, bumping the version when `new_version` is set.
    fn update(&mut self, model: StoredModel, new_version: bool) -> Result<StoredModel, ServiceError>;

    /// Stores a new model and returns it with its assigned id.
    fn create(&mut self, model: StoredModel) -> Result<StoredModel, ServiceError>;
}

/// Hands a converted model to the runtime engine.
pub trait DeploymentTrigger {
    fn deploy(&mut self, model: &ProcessDefinitionModel) -> Result<(), ServiceError>;
}
