//! Collaborator seams and the model editing entry points built on them.

mod editor;
mod lookup;

pub use editor::{ConflictReport, ConflictResolution, ModelEditor, SaveOutcome, SaveRequest};
pub use lookup::{DeploymentTrigger, FormLookup, IdentityLookup, ModelRepository, StoredModel};
