use super::walker::{RenderIndex, ShapeIndex};
use crate::config::ConverterConfig;
use crate::error::{ConversionWarning, Diagnostics};
use crate::graph::vocabulary::property;
use crate::graph::{GraphDocument, GraphNode, PropertyValue, ShapeRef};
use crate::service::{FormLookup, IdentityLookup};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A form or form model as the form service describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub key: String,
}

impl ModelInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            key: key.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub external_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    pub id: String,
    pub name: Option<String>,
    pub external_id: Option<String>,
}

/// Everything a conversion may need from outside the document, resolved up front.
///
/// Lookup misses are not errors: converters fall back to the raw ids.
#[derive(Debug, Clone, Default)]
pub struct ConversionContext {
    forms_by_id: AHashMap<String, ModelInfo>,
    forms_by_key: AHashMap<String, ModelInfo>,
    users: AHashMap<String, UserInfo>,
    groups: AHashMap<String, GroupInfo>,
    organizations: AHashMap<String, String>,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, form: ModelInfo) -> Self {
        self.forms_by_key.insert(form.key.clone(), form.clone());
        self.forms_by_id.insert(form.id.clone(), form);
        self
    }

    pub fn with_user(mut self, user: UserInfo) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    pub fn with_group(mut self, group: GroupInfo) -> Self {
        self.groups.insert(group.id.clone(), group);
        self
    }

    pub fn with_organization(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.organizations.insert(id.into(), name.into());
        self
    }

    pub fn form_by_id(&self, id: &str) -> Option<&ModelInfo> {
        self.forms_by_id.get(id)
    }

    pub fn form_by_key(&self, key: &str) -> Option<&ModelInfo> {
        self.forms_by_key.get(key)
    }

    pub fn user(&self, id: &str) -> Option<&UserInfo> {
        self.users.get(id)
    }

    pub fn group(&self, id: &str) -> Option<&GroupInfo> {
        self.groups.get(id)
    }

    pub fn organization_name(&self, id: &str) -> Option<&str> {
        self.organizations.get(id).map(String::as_str)
    }

    /// Pre-resolves every form, user, group and organization `document` mentions.
    pub fn from_lookups(
        document: &GraphDocument,
        forms: &dyn FormLookup,
        identities: &dyn IdentityLookup,
    ) -> Self {
        let mut references = References::default();
        document.visit_nodes(&mut |node| references.collect(node));

        let mut context = Self::new();
        for id in references.forms {
            match forms.lookup_form(&id) {
                Some(form) => context = context.with_form(form),
                None => log::debug!("Form '{id}' is unknown to the form service"),
            }
        }
        for id in references.form_models {
            if let Some(model) = forms.lookup_model(&id) {
                context = context.with_form(model);
            }
        }
        for id in references.users {
            if let Some(user) = identities.lookup_user(&id) {
                context = context.with_user(user);
            }
        }
        for id in references.groups {
            if let Some(group) = identities.lookup_group(&id) {
                context = context.with_group(group);
            }
        }
        for id in references.organizations {
            if let Some(name) = identities.lookup_organization(&id) {
                context = context.with_organization(id, name);
            }
        }
        context
    }
}

/// Ids a document refers to, in first-seen order.
#[derive(Default)]
struct References {
    forms: Vec<String>,
    form_models: Vec<String>,
    users: Vec<String>,
    groups: Vec<String>,
    organizations: Vec<String>,
}

impl References {
    fn collect(&mut self, node: &GraphNode) {
        if let Some(id) = node
            .property(property::FORM_REFERENCE)
            .and_then(|reference| reference.field_text("id"))
        {
            push_unique(&mut self.forms, id);
        }
        if let Some(id) = node
            .property(property::FORM_KEY_SHORT)
            .and_then(|form| form.field_text("id"))
        {
            push_unique(&mut self.form_models, id);
        }

        let Some(assignment) = node
            .property(property::USER_TASK_ASSIGNMENT)
            .and_then(|value| value.get(property::ASSIGNMENT))
        else {
            return;
        };
        if let Some(id) = assignment
            .get("assignee")
            .and_then(|assignee| assignee.field_text("organizationId"))
        {
            push_unique(&mut self.organizations, id);
        }
        let Some(idm) = assignment.get("idm") else {
            return;
        };
        let ids = |value: Option<&PropertyValue>| -> Vec<String> {
            match value {
                Some(PropertyValue::Array(items)) => {
                    items.iter().filter_map(|item| item.field_text("id")).collect()
                }
                Some(single) => single.field_text("id").into_iter().collect(),
                None => Vec::new(),
            }
        };
        for id in ids(idm.get("assignee"))
            .into_iter()
            .chain(ids(idm.get("candidateUsers")))
        {
            push_unique(&mut self.users, id);
        }
        for id in ids(idm.get("candidateGroups")) {
            push_unique(&mut self.groups, id);
        }
    }
}

fn push_unique(ids: &mut Vec<String>, id: String) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

/// Per-call state threaded through the graph-to-model converters.
pub struct ConversionScope<'a> {
    context: &'a ConversionContext,
    config: &'a ConverterConfig,
    document: &'a GraphDocument,
    index: &'a ShapeIndex,
    depth: usize,
    diagnostics: Diagnostics,
}

impl<'a> ConversionScope<'a> {
    pub(crate) fn new(
        context: &'a ConversionContext,
        config: &'a ConverterConfig,
        document: &'a GraphDocument,
        index: &'a ShapeIndex,
    ) -> Self {
        Self {
            context,
            config,
            document,
            index,
            depth: 0,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn context(&self) -> &'a ConversionContext {
        self.context
    }

    pub fn config(&self) -> &'a ConverterConfig {
        self.config
    }

    /// Whether the current shape sits directly on the canvas rather than in a sub-process.
    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }

    pub fn document_property(&self, name: &str) -> Option<&'a PropertyValue> {
        self.document.property(name)
    }

    /// Element id of the shape with `resource_id`; unknown shapes keep their resource id.
    pub fn element_id_of<'r>(&self, resource_id: &'r str) -> &'r str
    where
        'a: 'r,
    {
        self.index.element_id(resource_id).unwrap_or(resource_id)
    }

    /// Resource id of the shape whose `outgoing` lists the flow `flow_resource_id`.
    pub fn source_of(&self, flow_resource_id: &str) -> Option<&'a str> {
        self.index.source_of(flow_resource_id)
    }

    pub fn report(&mut self, warning: ConversionWarning) {
        self.diagnostics.report(warning);
    }

    pub fn malformed(
        &mut self,
        element_id: &str,
        property: &str,
        expected: &'static str,
        found: &PropertyValue,
    ) {
        self.report(ConversionWarning::MalformedProperty {
            element_id: element_id.to_string(),
            property: property.to_string(),
            expected,
            found: found.kind(),
        });
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub(crate) fn enter(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

/// Per-call state threaded through the model-to-graph converters.
pub struct RenderScope<'a> {
    context: &'a ConversionContext,
    index: &'a RenderIndex,
}

impl<'a> RenderScope<'a> {
    pub(crate) fn new(context: &'a ConversionContext, index: &'a RenderIndex) -> Self {
        Self { context, index }
    }

    pub fn context(&self) -> &'a ConversionContext {
        self.context
    }

    /// Resource id for an element id; elements without a shape reuse their id.
    pub fn resource_id_of<'r>(&self, element_id: &'r str) -> &'r str
    where
        'a: 'r,
    {
        self.index.resource_id(element_id).unwrap_or(element_id)
    }

    /// Outgoing flow references of the element with `element_id`, in model order.
    pub fn outgoing_of(&self, element_id: &str) -> Vec<ShapeRef> {
        self.index
            .outgoing(element_id)
            .iter()
            .map(|flow| ShapeRef::new(flow.as_str()))
            .collect()
    }
}
