//! Task assignment: who may claim or complete a user task.
//!
//! The editor stores assignment either as static literals or as references
//! into an identity directory (`type: "idm"`). [`resolve`] turns the editor
//! JSON into an [`Assignment`], [`Assignment::apply_to`] writes it onto a typed
//! task, and [`Assignment::from_task`] plus [`render`] go the other way.

mod task;
pub mod template;

pub(crate) use task::{read_labeled, write_labeled};

use crate::converter::ConversionContext;
use crate::error::{ConversionWarning, Diagnostics};
use crate::graph::PropertyValue;
use template::{CallTemplate, collapse, field_placeholder};

/// Assignee value that binds a task to the process initiator.
pub const INITIATOR_ASSIGNEE: &str = "$INITIATOR";

const TYPE_KEY: &str = "type";
const IDM_KEY: &str = "idm";
const CAN_COMPLETE_KEY: &str = "initiatorCanCompleteTask";
const ASSIGNEE_KEY: &str = "assignee";
const ASSIGNEE_FIELD_KEY: &str = "assigneeField";
const CANDIDATE_USERS_KEY: &str = "candidateUsers";
const CANDIDATE_USER_FIELDS_KEY: &str = "candidateUserFields";
const CANDIDATE_GROUPS_KEY: &str = "candidateGroups";
const CANDIDATE_GROUP_FIELDS_KEY: &str = "candidateGroupFields";
const APPLY_KEY: &str = "apply";
const SUPERIOR_KEY: &str = "superior";
const CANDIDATE_POSITION_KEY: &str = "candidatePosition";

const STATIC_KEYS: &[&str] = &[ASSIGNEE_KEY, CANDIDATE_USERS_KEY, CANDIDATE_GROUPS_KEY];
const ASSIGNMENT_PROPERTY: &str = "usertaskassignment.assignment";

/// A `{value, name}` pair as the editor's pickers produce it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabeledValue {
    pub value: String,
    pub name: Option<String>,
}

impl LabeledValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: None,
        }
    }

    pub fn named(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: Some(name.into()),
        }
    }

    /// Accepts `{value, name}` or bare text.
    pub fn from_property(property: &PropertyValue) -> Option<Self> {
        match property {
            PropertyValue::Object(_) => Some(Self {
                value: property.field_text("value")?,
                name: property.field_text("name"),
            }),
            other => other.non_empty_text().map(Self::new),
        }
    }

    pub fn to_property(&self) -> PropertyValue {
        let mut fields = vec![("value", PropertyValue::text(&self.value))];
        if let Some(name) = &self.name {
            fields.push(("name", PropertyValue::text(name)));
        }
        PropertyValue::object(fields)
    }
}

/// Static assignee with optional display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StaticAssignee {
    pub value: String,
    pub name: Option<String>,
    pub organization_id: Option<String>,
    pub organization_name: Option<String>,
}

impl StaticAssignee {
    fn from_property(property: &PropertyValue) -> Option<Self> {
        match property {
            PropertyValue::Object(_) => Some(Self {
                value: property.field_text("value")?,
                name: property.field_text("name"),
                organization_id: property.field_text("organizationId"),
                organization_name: property.field_text("organizationName"),
            }),
            other => other.non_empty_text().map(|value| Self {
                value,
                ..Default::default()
            }),
        }
    }

    fn to_property(&self) -> PropertyValue {
        if self.name.is_none() && self.organization_id.is_none() && self.organization_name.is_none()
        {
            return PropertyValue::text(&self.value);
        }
        let optional = [
            ("name", &self.name),
            ("organizationId", &self.organization_id),
            ("organizationName", &self.organization_name),
        ];
        let mut fields = vec![("value", PropertyValue::text(&self.value))];
        fields.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.as_ref().map(|v| (key, PropertyValue::text(v)))),
        );
        PropertyValue::object(fields)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticAssignment {
    pub assignee: Option<StaticAssignee>,
    pub candidate_users: Vec<String>,
    pub candidate_groups: Vec<LabeledValue>,
    pub applicant: Option<LabeledValue>,
    pub superior: Option<LabeledValue>,
    /// Opaque position picker payload, kept verbatim.
    pub candidate_positions: Option<PropertyValue>,
}

impl StaticAssignment {
    pub fn is_empty(&self) -> bool {
        self.assignee.is_none()
            && self.candidate_users.is_empty()
            && self.candidate_groups.is_empty()
            && self.applicant.is_none()
            && self.superior.is_none()
            && self.candidate_positions.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryKind {
    /// One user picked by id or email.
    Person,
    /// One user taken from a form field at runtime.
    PersonField,
    /// Candidate users, literal and/or from form fields.
    People,
    /// Candidate groups, literal and/or from form fields.
    Groups,
    /// No usable selection; the task goes to the process initiator.
    Initiator,
}

impl DirectoryKind {
    fn editor_type(self) -> &'static str {
        match self {
            DirectoryKind::Person | DirectoryKind::PersonField => "user",
            DirectoryKind::People => "users",
            DirectoryKind::Groups => "groups",
            DirectoryKind::Initiator => "initiator",
        }
    }
}

/// A user or group picked from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryRef {
    pub id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub external_id: Option<String>,
    /// Group display name.
    pub name: Option<String>,
}

impl DirectoryRef {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    /// The value the engine sees: the id, or the email for email-only refs.
    pub fn identity(&self) -> Option<&str> {
        self.id.as_deref().or(self.email.as_deref())
    }

    pub fn is_email_only(&self) -> bool {
        self.id.is_none() && self.email.is_some()
    }

    fn from_property(property: &PropertyValue) -> Option<Self> {
        property.as_object()?;
        let reference = Self {
            id: property.field_text("id"),
            email: property.field_text("email"),
            first_name: property.field_text("firstName"),
            last_name: property.field_text("lastName"),
            external_id: property.field_text("externalId"),
            name: property.field_text("name"),
        };
        reference.identity().is_some().then_some(reference)
    }

    fn to_property(&self) -> PropertyValue {
        let fields = [
            ("id", &self.id),
            ("email", &self.email),
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("externalId", &self.external_id),
            ("name", &self.name),
        ];
        PropertyValue::object(
            fields
                .into_iter()
                .filter_map(|(key, value)| value.as_ref().map(|v| (key, PropertyValue::text(v)))),
        )
    }
}

/// A form field whose runtime value names the assignee(s).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldRef {
    pub id: String,
    pub name: Option<String>,
}

impl FieldRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    fn from_property(property: &PropertyValue) -> Option<Self> {
        Some(Self {
            id: property.field_text("id")?,
            name: property.field_text("name"),
        })
    }

    fn to_property(&self) -> PropertyValue {
        let mut fields = vec![("id", PropertyValue::text(&self.id))];
        if let Some(name) = &self.name {
            fields.push(("name", PropertyValue::text(name)));
        }
        PropertyValue::object(fields)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryAssignment {
    pub kind: DirectoryKind,
    pub refs: Vec<DirectoryRef>,
    pub fields: Vec<FieldRef>,
}

impl DirectoryAssignment {
    pub fn new(kind: DirectoryKind) -> Self {
        Self {
            kind,
            refs: Vec::new(),
            fields: Vec::new(),
        }
    }

    fn literal_ids(&self) -> Vec<String> {
        self.refs
            .iter()
            .filter_map(DirectoryRef::identity)
            .map(str::to_string)
            .collect()
    }

    fn field_ids(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.id.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentSpec {
    Static(StaticAssignment),
    DirectoryBound(DirectoryAssignment),
}

impl Default for AssignmentSpec {
    fn default() -> Self {
        AssignmentSpec::Static(StaticAssignment::default())
    }
}

impl AssignmentSpec {
    /// Engine-side assignee.
    pub fn assignee(&self) -> Option<String> {
        match self {
            AssignmentSpec::Static(assignment) => {
                assignment.assignee.as_ref().map(|a| a.value.clone())
            }
            AssignmentSpec::DirectoryBound(directory) => match directory.kind {
                DirectoryKind::Person => directory
                    .refs
                    .first()
                    .and_then(DirectoryRef::identity)
                    .map(str::to_string),
                DirectoryKind::PersonField => directory
                    .fields
                    .first()
                    .map(|field| CallTemplate::Assignee.wrap(&field_placeholder(&field.id))),
                DirectoryKind::Initiator => Some(INITIATOR_ASSIGNEE.to_string()),
                DirectoryKind::People | DirectoryKind::Groups => None,
            },
        }
    }

    /// Engine-side candidate users: a plain list, or one templated call when fields are involved.
    pub fn candidate_users(&self) -> Vec<String> {
        match self {
            AssignmentSpec::Static(assignment) => assignment.candidate_users.clone(),
            AssignmentSpec::DirectoryBound(directory) if directory.kind == DirectoryKind::People => {
                collapse(
                    CallTemplate::CandidateUsers,
                    &directory.literal_ids(),
                    &directory.field_ids(),
                )
            }
            AssignmentSpec::DirectoryBound(_) => Vec::new(),
        }
    }

    pub fn candidate_groups(&self) -> Vec<String> {
        match self {
            AssignmentSpec::Static(assignment) => assignment
                .candidate_groups
                .iter()
                .map(|group| group.value.clone())
                .collect(),
            AssignmentSpec::DirectoryBound(directory) if directory.kind == DirectoryKind::Groups => {
                collapse(
                    CallTemplate::CandidateGroups,
                    &directory.literal_ids(),
                    &directory.field_ids(),
                )
            }
            AssignmentSpec::DirectoryBound(_) => Vec::new(),
        }
    }
}

/// A resolved assignment plus the initiator-can-complete flag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Assignment {
    pub spec: AssignmentSpec,
    pub initiator_can_complete: Option<bool>,
}

/// Resolves the editor's `assignment` object, discarding warnings.
pub fn resolve(value: &PropertyValue) -> Option<Assignment> {
    resolve_with(value, "", &mut Diagnostics::default())
}

/// Resolves the editor's `assignment` object.
///
/// An explicit `type: "idm"` selects the directory-bound shape and anything
/// else without a type is read as static. Mixed shapes are reported as
/// ambiguous; unknown types yield no assignment.
pub fn resolve_with(
    value: &PropertyValue,
    element_id: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Assignment> {
    if value.as_object().is_none() {
        diagnostics.report(ConversionWarning::MalformedProperty {
            element_id: element_id.to_string(),
            property: ASSIGNMENT_PROPERTY.to_string(),
            expected: "an object",
            found: value.kind(),
        });
        return None;
    }

    let requested_can_complete = value.get(CAN_COMPLETE_KEY).and_then(PropertyValue::as_flag);
    let spec = match value.field_text(TYPE_KEY) {
        Some(kind) if kind.eq_ignore_ascii_case("idm") => {
            if STATIC_KEYS.iter().any(|key| value.get(key).is_some()) {
                diagnostics.report(ConversionWarning::AssignmentAmbiguous {
                    element_id: element_id.to_string(),
                    chosen: "directory-bound",
                });
            }
            let Some(directory) = value.get(IDM_KEY).and_then(resolve_directory) else {
                diagnostics.report(ConversionWarning::MalformedProperty {
                    element_id: element_id.to_string(),
                    property: format!("{ASSIGNMENT_PROPERTY}.idm"),
                    expected: "an object with a type",
                    found: value.get(IDM_KEY).map_or("null", PropertyValue::kind),
                });
                return None;
            };
            AssignmentSpec::DirectoryBound(directory)
        }
        None => {
            if value.get(IDM_KEY).is_some() {
                diagnostics.report(ConversionWarning::AssignmentAmbiguous {
                    element_id: element_id.to_string(),
                    chosen: "static",
                });
            }
            AssignmentSpec::Static(resolve_static(value))
        }
        Some(kind) if kind.eq_ignore_ascii_case("static") => {
            AssignmentSpec::Static(resolve_static(value))
        }
        Some(kind) => {
            log::debug!("Unknown assignment type '{kind}' on '{element_id}'");
            diagnostics.report(ConversionWarning::MalformedProperty {
                element_id: element_id.to_string(),
                property: format!("{ASSIGNMENT_PROPERTY}.type"),
                expected: "\"static\" or \"idm\"",
                found: "text",
            });
            return None;
        }
    };

    let initiator_can_complete = match &spec {
        AssignmentSpec::Static(assignment) => match assignment.assignee.as_ref() {
            Some(assignee) if assignee.value == INITIATOR_ASSIGNEE => Some(true),
            Some(_) => Some(requested_can_complete.unwrap_or(false)),
            None => None,
        },
        AssignmentSpec::DirectoryBound(directory) => match directory.kind {
            DirectoryKind::Initiator => None,
            DirectoryKind::Person | DirectoryKind::PersonField => {
                Some(requested_can_complete.unwrap_or(false))
            }
            DirectoryKind::People | DirectoryKind::Groups => {
                let empty = directory.refs.is_empty() && directory.fields.is_empty();
                (!empty).then(|| requested_can_complete.unwrap_or(false))
            }
        },
    };

    Some(Assignment {
        spec,
        initiator_can_complete,
    })
}

fn list_of<T>(value: Option<&PropertyValue>, parse: impl Fn(&PropertyValue) -> Option<T>) -> Vec<T> {
    value
        .and_then(PropertyValue::as_array)
        .map(|items| items.iter().filter_map(parse).collect())
        .unwrap_or_default()
}

fn resolve_static(value: &PropertyValue) -> StaticAssignment {
    StaticAssignment {
        assignee: value.get(ASSIGNEE_KEY).and_then(StaticAssignee::from_property),
        candidate_users: list_of(value.get(CANDIDATE_USERS_KEY), |item| {
            LabeledValue::from_property(item).map(|user| user.value)
        }),
        candidate_groups: list_of(value.get(CANDIDATE_GROUPS_KEY), LabeledValue::from_property),
        applicant: value.get(APPLY_KEY).and_then(LabeledValue::from_property),
        superior: value.get(SUPERIOR_KEY).and_then(LabeledValue::from_property),
        candidate_positions: value
            .get(CANDIDATE_POSITION_KEY)
            .filter(|positions| positions.as_array().is_some())
            .cloned(),
    }
}

fn resolve_directory(idm: &PropertyValue) -> Option<DirectoryAssignment> {
    let kind = idm.field_text(TYPE_KEY)?;
    let has = |key: &str| idm.get(key).is_some();

    let directory = match kind.as_str() {
        "user" if has(ASSIGNEE_KEY) => DirectoryAssignment {
            kind: DirectoryKind::Person,
            refs: idm
                .get(ASSIGNEE_KEY)
                .and_then(DirectoryRef::from_property)
                .into_iter()
                .collect(),
            fields: Vec::new(),
        },
        "user" if has(ASSIGNEE_FIELD_KEY) => DirectoryAssignment {
            kind: DirectoryKind::PersonField,
            refs: Vec::new(),
            fields: idm
                .get(ASSIGNEE_FIELD_KEY)
                .and_then(FieldRef::from_property)
                .into_iter()
                .collect(),
        },
        "users" if has(CANDIDATE_USERS_KEY) || has(CANDIDATE_USER_FIELDS_KEY) => {
            DirectoryAssignment {
                kind: DirectoryKind::People,
                refs: list_of(idm.get(CANDIDATE_USERS_KEY), DirectoryRef::from_property),
                fields: list_of(idm.get(CANDIDATE_USER_FIELDS_KEY), FieldRef::from_property),
            }
        }
        "groups" if has(CANDIDATE_GROUPS_KEY) || has(CANDIDATE_GROUP_FIELDS_KEY) => {
            DirectoryAssignment {
                kind: DirectoryKind::Groups,
                // groups are only addressable by id
                refs: list_of(idm.get(CANDIDATE_GROUPS_KEY), |item| {
                    DirectoryRef::from_property(item).filter(|group| group.id.is_some())
                }),
                fields: list_of(idm.get(CANDIDATE_GROUP_FIELDS_KEY), FieldRef::from_property),
            }
        }
        _ => DirectoryAssignment::new(DirectoryKind::Initiator),
    };
    Some(directory)
}

/// Renders an assignment back to the editor's `assignment` object.
pub fn render(assignment: &Assignment) -> PropertyValue {
    render_with(assignment, &ConversionContext::default())
}

/// [`render`], filling missing display metadata from the context's directory maps.
pub fn render_with(assignment: &Assignment, context: &ConversionContext) -> PropertyValue {
    let mut fields: Vec<(&str, PropertyValue)> = Vec::new();
    match &assignment.spec {
        AssignmentSpec::Static(assignment) => {
            fields.push((TYPE_KEY, PropertyValue::text("static")));
            if let Some(assignee) = &assignment.assignee {
                let mut assignee = assignee.clone();
                if assignee.organization_name.is_none() {
                    assignee.organization_name = assignee
                        .organization_id
                        .as_deref()
                        .and_then(|id| context.organization_name(id))
                        .map(str::to_string);
                }
                fields.push((ASSIGNEE_KEY, assignee.to_property()));
            }
            if !assignment.candidate_users.is_empty() {
                let users = assignment
                    .candidate_users
                    .iter()
                    .map(|user| LabeledValue::new(user).to_property())
                    .collect();
                fields.push((CANDIDATE_USERS_KEY, PropertyValue::Array(users)));
            }
            if !assignment.candidate_groups.is_empty() {
                let groups = assignment
                    .candidate_groups
                    .iter()
                    .map(LabeledValue::to_property)
                    .collect();
                fields.push((CANDIDATE_GROUPS_KEY, PropertyValue::Array(groups)));
            }
            if let Some(applicant) = &assignment.applicant {
                fields.push((APPLY_KEY, applicant.to_property()));
            }
            if let Some(superior) = &assignment.superior {
                fields.push((SUPERIOR_KEY, superior.to_property()));
            }
            if let Some(positions) = &assignment.candidate_positions {
                fields.push((CANDIDATE_POSITION_KEY, positions.clone()));
            }
        }
        AssignmentSpec::DirectoryBound(directory) => {
            fields.push((TYPE_KEY, PropertyValue::text("idm")));
            fields.push((IDM_KEY, render_directory(directory, context)));
        }
    }
    if let Some(can_complete) = assignment.initiator_can_complete {
        fields.push((CAN_COMPLETE_KEY, PropertyValue::bool(can_complete)));
    }
    PropertyValue::object(fields)
}

fn render_directory(directory: &DirectoryAssignment, context: &ConversionContext) -> PropertyValue {
    let enrich = |reference: &DirectoryRef| -> PropertyValue {
        let mut reference = reference.clone();
        if let Some(id) = reference.id.as_deref() {
            match directory.kind {
                DirectoryKind::Groups => {
                    if let Some(group) = context.group(id) {
                        reference.name = reference.name.or_else(|| group.name.clone());
                        reference.external_id =
                            reference.external_id.or_else(|| group.external_id.clone());
                    }
                }
                _ => {
                    if let Some(user) = context.user(id) {
                        reference.email = reference.email.or_else(|| user.email.clone());
                        reference.first_name =
                            reference.first_name.or_else(|| user.first_name.clone());
                        reference.last_name = reference.last_name.or_else(|| user.last_name.clone());
                        reference.external_id =
                            reference.external_id.or_else(|| user.external_id.clone());
                    }
                }
            }
        }
        reference.to_property()
    };
    let refs = || PropertyValue::Array(directory.refs.iter().map(|r| enrich(r)).collect());
    let fields = || PropertyValue::Array(directory.fields.iter().map(FieldRef::to_property).collect());

    let mut idm = vec![(TYPE_KEY, PropertyValue::text(directory.kind.editor_type()))];
    match directory.kind {
        DirectoryKind::Person => {
            if let Some(reference) = directory.refs.first() {
                idm.push((ASSIGNEE_KEY, enrich(reference)));
            }
        }
        DirectoryKind::PersonField => {
            if let Some(field) = directory.fields.first() {
                idm.push((ASSIGNEE_FIELD_KEY, field.to_property()));
            }
        }
        DirectoryKind::People => {
            if !directory.refs.is_empty() {
                idm.push((CANDIDATE_USERS_KEY, refs()));
            }
            if !directory.fields.is_empty() {
                idm.push((CANDIDATE_USER_FIELDS_KEY, fields()));
            }
        }
        DirectoryKind::Groups => {
            if !directory.refs.is_empty() {
                idm.push((CANDIDATE_GROUPS_KEY, refs()));
            }
            if !directory.fields.is_empty() {
                idm.push((CANDIDATE_GROUP_FIELDS_KEY, fields()));
            }
        }
        DirectoryKind::Initiator => {}
    }
    PropertyValue::object(idm)
}
