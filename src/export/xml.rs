use std::fmt;

pub(super) fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Wraps text in a CDATA section, splitting any embedded terminator.
pub(super) fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

pub(super) fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// Attribute list rendered as ` name="value"` pairs. Empty values are skipped.
#[derive(Debug, Default)]
pub(super) struct Attributes {
    pairs: Vec<(String, String)>,
}

impl Attributes {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn push<S: AsRef<str>>(&mut self, name: &str, value: Option<S>) {
        let Some(value) = value else {
            return;
        };
        let value: &str = value.as_ref();
        if !value.is_empty() {
            self.pairs.push((name.to_string(), xml_escape(value)));
        }
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.pairs {
            write!(f, r#" {}="{}""#, name, value)?;
        }
        Ok(())
    }
}
