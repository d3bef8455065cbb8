use itertools::Itertools;

const TEMPLATE_SUFFIX: &str = "', execution)}";

/// The engine-side call expressions that defer resolution to runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTemplate {
    Assignee,
    CandidateUsers,
    CandidateGroups,
}

impl CallTemplate {
    fn prefix(self) -> &'static str {
        match self {
            CallTemplate::Assignee => "${taskAssignmentBean.assignTaskToAssignee('",
            CallTemplate::CandidateUsers => "${taskAssignmentBean.assignTaskToCandidateUsers('",
            CallTemplate::CandidateGroups => "${taskAssignmentBean.assignTaskToCandidateGroups('",
        }
    }

    pub fn wrap(self, body: &str) -> String {
        format!("{}{}{}", self.prefix(), body, TEMPLATE_SUFFIX)
    }

    /// The argument of a templated call, if `expression` is one.
    pub fn unwrap(self, expression: &str) -> Option<&str> {
        expression
            .strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_suffix(TEMPLATE_SUFFIX))
    }

    pub fn matches(self, expression: &str) -> bool {
        self.unwrap(expression).is_some()
    }
}

/// One comma-separated entry of a templated candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateEntry<'a> {
    Literal(&'a str),
    Field(&'a str),
}

pub fn field_placeholder(id: &str) -> String {
    format!("field({id})")
}

pub fn parse_field_placeholder(entry: &str) -> Option<&str> {
    entry.strip_prefix("field(").and_then(|rest| rest.strip_suffix(')'))
}

pub fn split_entries(body: &str) -> Vec<TemplateEntry<'_>> {
    body.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match parse_field_placeholder(entry) {
            Some(id) => TemplateEntry::Field(id),
            None => TemplateEntry::Literal(entry),
        })
        .collect()
}

/// Engine-side candidate list.
///
/// With no field references the literal ids stay a plain list. Any field
/// reference collapses literals and placeholders into one templated call.
pub fn collapse(template: CallTemplate, literals: &[String], fields: &[String]) -> Vec<String> {
    if fields.is_empty() {
        return literals.to_vec();
    }
    let body = literals
        .iter()
        .cloned()
        .chain(fields.iter().map(|id| field_placeholder(id)))
        .join(",");
    vec![template.wrap(&body)]
}
