use serde::Serialize;

pub const MODELER_NAMESPACE: &str = "http://activiti.com/modeler";
pub const MODELER_PREFIX: &str = "modeler";

/// Extension element names written by the converters.
pub mod names {
    pub const CONDITION_KEYS: &str = "conditionKeys";
    pub const SLA: &str = "sla";
    pub const SPT: &str = "spt";
    pub const PROCESS_TITLE: &str = "processTitle";

    pub const FORM_KEY: &str = "formKey";
    pub const FORM_NAME: &str = "formName";
    pub const FORM_REFERENCE: &str = "formReference";

    pub const SLA_NODE: &str = "slaNode";
    pub const SPT_NODE: &str = "sptNode";
    pub const SOP_NODE: &str = "sopNode";
    pub const WI_NODE: &str = "wiNode";
    pub const SUBMIT_PATTERN: &str = "submitPattern";
    pub const TASK_ACTIVATE_PATTERN: &str = "taskActivatePattern";
    pub const EXECUTION_CONDITION: &str = "executionCondition";

    pub const ASSIGNEE_NAME: &str = "assigneeName";
    pub const ORGANIZATION_ID: &str = "organizationId";
    pub const ORGANIZATION_NAME: &str = "organizationName";
    pub const APPLY: &str = "apply";
    pub const SUPERIOR: &str = "superior";
    pub const CANDIDATE_POSITION: &str = "candidatePosition";
    pub const ROLE_NAMES: &str = "roleNames";

    pub const IDM_ASSIGNEE: &str = "activiti-idm-assignee";
    pub const IDM_ASSIGNEE_FIELD: &str = "activiti-idm-assignee-field";
    pub const IDM_CANDIDATE_USER: &str = "activiti-idm-candidate-user";
    pub const IDM_CANDIDATE_GROUP: &str = "activiti-idm-candidate-group";
    pub const IDM_INITIATOR: &str = "activiti-idm-initiator";
    pub const ASSIGNEE_EMAIL: &str = "activiti-assignee-email";
    pub const CANDIDATE_USERS_EMAILS: &str = "activiti-candidate-users-emails";
    pub const INITIATOR_CAN_COMPLETE: &str = "initiator-can-complete";

    pub const ASSIGNEE_FIELD_INFO_NAME: &str = "assignee-field-info-name";
    pub const ASSIGNEE_INFO_EMAIL: &str = "assignee-info-email";
    pub const ASSIGNEE_INFO_FIRSTNAME: &str = "assignee-info-firstname";
    pub const ASSIGNEE_INFO_LASTNAME: &str = "assignee-info-lastname";
    pub const ASSIGNEE_INFO_EXTERNAL_ID: &str = "assignee-info-externalid";

    pub const USER_INFO_EMAIL: &str = "user-info-email-";
    pub const USER_INFO_FIRSTNAME: &str = "user-info-firstname-";
    pub const USER_INFO_LASTNAME: &str = "user-info-lastname-";
    pub const USER_INFO_EXTERNAL_ID: &str = "user-info-externalid-";
    pub const USER_FIELD_INFO_NAME: &str = "user-field-info-name-";
    pub const GROUP_INFO_NAME: &str = "group-info-name-";
    pub const GROUP_INFO_EXTERNAL_ID: &str = "group-info-externalid-";
    pub const GROUP_FIELD_INFO_NAME: &str = "group-field-info-name-";

    pub const EXPRESSION_DISPLAY: &str = "expressionDisplay";
    pub const NAME: &str = "name";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionAttribute {
    pub name: String,
    pub value: String,
    pub namespace: String,
    pub prefix: String,
}

/// A namespaced name/text pair attached to a typed element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionElement {
    pub name: String,
    pub text: String,
    pub namespace: String,
    pub prefix: String,
    pub attributes: Vec<ExtensionAttribute>,
}

impl ExtensionElement {
    /// An element in the modeler namespace.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            namespace: MODELER_NAMESPACE.to_string(),
            prefix: MODELER_PREFIX.to_string(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(ExtensionAttribute {
            name: name.into(),
            value: value.into(),
            namespace: MODELER_NAMESPACE.to_string(),
            prefix: MODELER_PREFIX.to_string(),
        });
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// Multi-map of extension elements keyed by name.
///
/// Names keep their first-insertion order and adding under an existing name
/// appends; nothing is ever overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionElements {
    groups: Vec<(String, Vec<ExtensionElement>)>,
}

impl ExtensionElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: ExtensionElement) {
        match self.groups.iter_mut().find(|(name, _)| *name == element.name) {
            Some((_, elements)) => elements.push(element),
            None => self.groups.push((element.name.clone(), vec![element])),
        }
    }

    pub fn add(&mut self, name: &str, text: impl Into<String>) {
        self.push(ExtensionElement::new(name, text));
    }

    pub fn add_with_attribute(
        &mut self,
        name: &str,
        text: impl Into<String>,
        attribute: &str,
        value: impl Into<String>,
    ) {
        self.push(ExtensionElement::new(name, text).with_attribute(attribute, value));
    }

    /// Adds `text` under `name` unless it is empty.
    pub fn add_non_empty(&mut self, name: &str, text: Option<&str>) {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            self.add(name, text);
        }
    }

    /// All elements stored under `name`; empty when there are none.
    pub fn get(&self, name: &str) -> &[ExtensionElement] {
        self.groups
            .iter()
            .find(|(group, _)| group == name)
            .map(|(_, elements)| elements.as_slice())
            .unwrap_or(&[])
    }

    pub fn first(&self, name: &str) -> Option<&ExtensionElement> {
        self.get(name).first()
    }

    pub fn first_text(&self, name: &str) -> Option<&str> {
        self.first(name).map(|e| e.text.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.get(name).is_empty()
    }

    /// Drops every element stored under `name`, returning how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        match self.groups.iter().position(|(group, _)| group == name) {
            Some(index) => self.groups.remove(index).1.len(),
            None => 0,
        }
    }

    /// Every element, grouped by name in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ExtensionElement> {
        self.groups.iter().flat_map(|(_, elements)| elements.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, elements)| elements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for ExtensionElements {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
