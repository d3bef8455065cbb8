use super::template::{CallTemplate, TemplateEntry, split_entries};
use super::{
    Assignment, AssignmentSpec, DirectoryAssignment, DirectoryKind, DirectoryRef, FieldRef,
    INITIATOR_ASSIGNEE, LabeledValue, StaticAssignee, StaticAssignment,
};
use crate::graph::PropertyValue;
use crate::model::extension::names;
use crate::model::{ExtensionElements, UserTask};

const TRUE: &str = "true";
const NAME_ATTRIBUTE: &str = "name";
const LEGACY_ROLE_NAME_SEPARATOR: &str = ", ";

impl Assignment {
    /// Writes the engine-side assignee/candidates and the extension metadata onto `task`.
    pub fn apply_to(&self, task: &mut UserTask) {
        task.assignee = self.spec.assignee();
        task.candidate_users = self.spec.candidate_users();
        task.candidate_groups = self.spec.candidate_groups();

        let extensions = &mut task.base.extensions;
        match &self.spec {
            AssignmentSpec::Static(assignment) => write_static(assignment, extensions),
            AssignmentSpec::DirectoryBound(directory) => write_directory(directory, extensions),
        }
        if let Some(can_complete) = self.initiator_can_complete {
            extensions.add(names::INITIATOR_CAN_COMPLETE, can_complete.to_string());
        }
    }

    /// Reconstructs the assignment of a typed task from its fields and extension metadata.
    pub fn from_task(task: &UserTask) -> Option<Assignment> {
        let extensions = &task.base.extensions;
        let initiator_can_complete = extensions
            .first_text(names::INITIATOR_CAN_COMPLETE)
            .map(|flag| flag.eq_ignore_ascii_case(TRUE));

        let spec = if let Some(directory) = read_directory(task) {
            AssignmentSpec::DirectoryBound(directory)
        } else {
            let assignment = read_static(task);
            if assignment.is_empty() {
                return None;
            }
            AssignmentSpec::Static(assignment)
        };

        Some(Assignment {
            spec,
            initiator_can_complete,
        })
    }
}

fn write_static(assignment: &StaticAssignment, extensions: &mut ExtensionElements) {
    if let Some(assignee) = &assignment.assignee {
        extensions.add_non_empty(names::ASSIGNEE_NAME, assignee.name.as_deref());
        extensions.add_non_empty(names::ORGANIZATION_ID, assignee.organization_id.as_deref());
        extensions.add_non_empty(names::ORGANIZATION_NAME, assignee.organization_name.as_deref());
    }
    for (name, labeled) in [
        (names::APPLY, &assignment.applicant),
        (names::SUPERIOR, &assignment.superior),
    ] {
        if let Some(labeled) = labeled {
            write_labeled(extensions, name, labeled);
        }
    }
    if let Some(positions) = &assignment.candidate_positions {
        extensions.add(names::CANDIDATE_POSITION, positions.to_json_string());
    }
    // one slot per candidate group, null where unnamed
    let groups = &assignment.candidate_groups;
    if groups.iter().any(|group| group.name.is_some()) {
        let role_names: Vec<Option<&str>> = groups.iter().map(|group| group.name.as_deref()).collect();
        match serde_json::to_string(&role_names) {
            Ok(json) => extensions.add(names::ROLE_NAMES, json),
            Err(err) => log::debug!("Role names not written: {err}"),
        }
    }
}

pub(crate) fn write_labeled(extensions: &mut ExtensionElements, name: &str, labeled: &LabeledValue) {
    match &labeled.name {
        Some(display) => extensions.add_with_attribute(name, &labeled.value, NAME_ATTRIBUTE, display),
        None => extensions.add(name, &labeled.value),
    }
}

pub(crate) fn read_labeled(extensions: &ExtensionElements, name: &str) -> Option<LabeledValue> {
    extensions.first(name).map(|element| LabeledValue {
        value: element.text.clone(),
        name: element.attribute(NAME_ATTRIBUTE).map(str::to_string),
    })
}

fn write_directory(directory: &DirectoryAssignment, extensions: &mut ExtensionElements) {
    match directory.kind {
        DirectoryKind::Person => {
            let Some(reference) = directory.refs.first() else {
                return;
            };
            extensions.add(names::IDM_ASSIGNEE, TRUE);
            match reference.id.as_deref() {
                Some(_) => {
                    extensions.add_non_empty(names::ASSIGNEE_INFO_EMAIL, reference.email.as_deref());
                    extensions.add_non_empty(
                        names::ASSIGNEE_INFO_FIRSTNAME,
                        reference.first_name.as_deref(),
                    );
                    extensions
                        .add_non_empty(names::ASSIGNEE_INFO_LASTNAME, reference.last_name.as_deref());
                    extensions.add_non_empty(
                        names::ASSIGNEE_INFO_EXTERNAL_ID,
                        reference.external_id.as_deref(),
                    );
                }
                None => extensions.add_non_empty(names::ASSIGNEE_EMAIL, reference.email.as_deref()),
            }
        }
        DirectoryKind::PersonField => {
            let Some(field) = directory.fields.first() else {
                return;
            };
            extensions.add(names::IDM_ASSIGNEE_FIELD, &field.id);
            extensions.add_non_empty(names::ASSIGNEE_FIELD_INFO_NAME, field.name.as_deref());
        }
        DirectoryKind::People => {
            let mut emails = Vec::new();
            for reference in &directory.refs {
                match reference.id.as_deref() {
                    Some(id) => {
                        for (prefix, value) in [
                            (names::USER_INFO_EMAIL, &reference.email),
                            (names::USER_INFO_FIRSTNAME, &reference.first_name),
                            (names::USER_INFO_LASTNAME, &reference.last_name),
                            (names::USER_INFO_EXTERNAL_ID, &reference.external_id),
                        ] {
                            extensions.add_non_empty(&format!("{prefix}{id}"), value.as_deref());
                        }
                    }
                    None => emails.extend(reference.email.iter().cloned()),
                }
            }
            for field in &directory.fields {
                extensions.add_non_empty(
                    &format!("{}{}", names::USER_FIELD_INFO_NAME, field.id),
                    field.name.as_deref(),
                );
            }
            if !emails.is_empty() {
                extensions.add(names::CANDIDATE_USERS_EMAILS, emails.join(","));
            }
            if !directory.refs.is_empty() || !directory.fields.is_empty() {
                extensions.add(names::IDM_CANDIDATE_USER, TRUE);
            }
        }
        DirectoryKind::Groups => {
            for reference in &directory.refs {
                let Some(id) = reference.id.as_deref() else {
                    continue;
                };
                extensions.add_non_empty(
                    &format!("{}{}", names::GROUP_INFO_NAME, id),
                    reference.name.as_deref(),
                );
                extensions.add_non_empty(
                    &format!("{}{}", names::GROUP_INFO_EXTERNAL_ID, id),
                    reference.external_id.as_deref(),
                );
            }
            for field in &directory.fields {
                extensions.add_non_empty(
                    &format!("{}{}", names::GROUP_FIELD_INFO_NAME, field.id),
                    field.name.as_deref(),
                );
            }
            if !directory.refs.is_empty() || !directory.fields.is_empty() {
                extensions.add(names::IDM_CANDIDATE_GROUP, TRUE);
            }
        }
        DirectoryKind::Initiator => extensions.add(names::IDM_INITIATOR, TRUE),
    }
}

fn read_static(task: &UserTask) -> StaticAssignment {
    let extensions = &task.base.extensions;
    let text = |name: &str| extensions.first_text(name).map(str::to_string);

    let role_names = extensions
        .first_text(names::ROLE_NAMES)
        .map(parse_role_names)
        .unwrap_or_default();
    let paired = role_names.len() == task.candidate_groups.len();

    StaticAssignment {
        assignee: task.assignee.as_ref().map(|value| StaticAssignee {
            value: value.clone(),
            name: text(names::ASSIGNEE_NAME),
            organization_id: text(names::ORGANIZATION_ID),
            organization_name: text(names::ORGANIZATION_NAME),
        }),
        candidate_users: task.candidate_users.clone(),
        candidate_groups: task
            .candidate_groups
            .iter()
            .enumerate()
            .map(|(index, value)| LabeledValue {
                value: value.clone(),
                name: if paired { role_names[index].clone() } else { None },
            })
            .collect(),
        applicant: read_labeled(extensions, names::APPLY),
        superior: read_labeled(extensions, names::SUPERIOR),
        candidate_positions: extensions
            .first_text(names::CANDIDATE_POSITION)
            .and_then(|json| PropertyValue::parse_json(json).ok()),
    }
}

/// Role names as written by [`write_static`], or the legacy `", "`-joined text
/// where every group carried a name.
fn parse_role_names(stored: &str) -> Vec<Option<String>> {
    match serde_json::from_str::<Vec<Option<String>>>(stored) {
        Ok(parsed) => parsed,
        Err(_) => stored
            .split(LEGACY_ROLE_NAME_SEPARATOR)
            .map(|name| Some(name.to_string()))
            .collect(),
    }
}

fn read_directory(task: &UserTask) -> Option<DirectoryAssignment> {
    let extensions = &task.base.extensions;

    if extensions.contains(names::IDM_INITIATOR) {
        return Some(DirectoryAssignment::new(DirectoryKind::Initiator));
    }

    if let Some(assignee) = task.assignee.as_deref() {
        if let Some(field_id) = extensions.first_text(names::IDM_ASSIGNEE_FIELD) {
            return Some(DirectoryAssignment {
                kind: DirectoryKind::PersonField,
                refs: Vec::new(),
                fields: vec![FieldRef {
                    id: field_id.to_string(),
                    name: extensions
                        .first_text(names::ASSIGNEE_FIELD_INFO_NAME)
                        .map(str::to_string),
                }],
            });
        }
        if extensions.contains(names::IDM_ASSIGNEE) && assignee != INITIATOR_ASSIGNEE {
            let reference = if extensions.first_text(names::ASSIGNEE_EMAIL) == Some(assignee) {
                DirectoryRef::with_email(assignee)
            } else {
                let text = |name: &str| extensions.first_text(name).map(str::to_string);
                DirectoryRef {
                    id: Some(assignee.to_string()),
                    email: text(names::ASSIGNEE_INFO_EMAIL),
                    first_name: text(names::ASSIGNEE_INFO_FIRSTNAME),
                    last_name: text(names::ASSIGNEE_INFO_LASTNAME),
                    external_id: text(names::ASSIGNEE_INFO_EXTERNAL_ID),
                    name: None,
                }
            };
            return Some(DirectoryAssignment {
                kind: DirectoryKind::Person,
                refs: vec![reference],
                fields: Vec::new(),
            });
        }
    }

    if extensions.contains(names::IDM_CANDIDATE_USER) && !task.candidate_users.is_empty() {
        let emails: Vec<&str> = extensions
            .first_text(names::CANDIDATE_USERS_EMAILS)
            .map(|joined| joined.split(',').collect())
            .unwrap_or_default();
        let (literals, fields) = entries(&task.candidate_users, CallTemplate::CandidateUsers);
        let refs = literals
            .into_iter()
            .map(|id| {
                if emails.contains(&id.as_str()) {
                    return DirectoryRef::with_email(id);
                }
                let info = |prefix: &str| {
                    extensions
                        .first_text(&format!("{prefix}{id}"))
                        .map(str::to_string)
                };
                DirectoryRef {
                    email: info(names::USER_INFO_EMAIL),
                    first_name: info(names::USER_INFO_FIRSTNAME),
                    last_name: info(names::USER_INFO_LASTNAME),
                    external_id: info(names::USER_INFO_EXTERNAL_ID),
                    id: Some(id),
                    name: None,
                }
            })
            .collect();
        return Some(DirectoryAssignment {
            kind: DirectoryKind::People,
            refs,
            fields: named_fields(extensions, fields, names::USER_FIELD_INFO_NAME),
        });
    }

    if extensions.contains(names::IDM_CANDIDATE_GROUP) && !task.candidate_groups.is_empty() {
        let (literals, fields) = entries(&task.candidate_groups, CallTemplate::CandidateGroups);
        let refs = literals
            .into_iter()
            .map(|id| {
                let info = |prefix: &str| {
                    extensions
                        .first_text(&format!("{prefix}{id}"))
                        .map(str::to_string)
                };
                DirectoryRef {
                    name: info(names::GROUP_INFO_NAME),
                    external_id: info(names::GROUP_INFO_EXTERNAL_ID),
                    id: Some(id),
                    ..Default::default()
                }
            })
            .collect();
        return Some(DirectoryAssignment {
            kind: DirectoryKind::Groups,
            refs,
            fields: named_fields(extensions, fields, names::GROUP_FIELD_INFO_NAME),
        });
    }

    None
}

/// Splits an engine-side candidate list into literal ids and field ids.
fn entries(values: &[String], template: CallTemplate) -> (Vec<String>, Vec<String>) {
    let mut literals = Vec::new();
    let mut fields = Vec::new();
    for value in values {
        match template.unwrap(value) {
            Some(body) => {
                for entry in split_entries(body) {
                    match entry {
                        TemplateEntry::Literal(id) => literals.push(id.to_string()),
                        TemplateEntry::Field(id) => fields.push(id.to_string()),
                    }
                }
            }
            None => literals.push(value.clone()),
        }
    }
    (literals, fields)
}

fn named_fields(extensions: &ExtensionElements, ids: Vec<String>, prefix: &str) -> Vec<FieldRef> {
    ids.into_iter()
        .map(|id| FieldRef {
            name: extensions
                .first_text(&format!("{prefix}{id}"))
                .map(str::to_string),
            id,
        })
        .collect()
}
