//! Placeholder-based email template rendering
//!
//! Two placeholder forms are supported:
//! - `${msg("key", attr1, attr2)}` looks `key` up in the message bundle and
//!   fills `{0}`, `{1}`, ... with the named attributes
//! - `${attr}` is replaced by the attribute value
//!
//! Unknown message keys render as the key itself and unknown attributes as
//! `[[name]]`; both are logged.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static MESSAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\$\{msg\("([^"]+)"(?:,\s*([^}]*))?\)\}"#).expect("valid message pattern")
});

static ATTRIBUTE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid attribute pattern"));

static ARGUMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("valid argument pattern"));

const ENGLISH_MESSAGES: &str = include_str!("templates/messages_en.properties");

/// Key/value message bundle in `.properties` form
#[derive(Debug, Clone, Default)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl MessageBundle {
    /// Parse `key=value` lines; blank lines and `#` comments are skipped
    pub fn parse(source: &str) -> Self {
        let messages = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();
        Self { messages }
    }

    /// The built-in English bundle
    pub fn english() -> Self {
        Self::parse(ENGLISH_MESSAGES)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Resolve `key` and substitute positional arguments
    pub fn format(&self, key: &str, args: &[String]) -> String {
        match self.get(key) {
            Some(pattern) => ARGUMENT_PATTERN
                .replace_all(pattern, |caps: &Captures| {
                    caps[1]
                        .parse::<usize>()
                        .ok()
                        .and_then(|index| args.get(index))
                        .cloned()
                        .unwrap_or_else(|| caps[0].to_string())
                })
                .into_owned(),
            None => {
                tracing::warn!(key = key, "Missing message key");
                key.to_string()
            }
        }
    }
}

/// Renders templates against a bundle and an attribute map
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    bundle: MessageBundle,
}

impl TemplateRenderer {
    pub fn new(bundle: MessageBundle) -> Self {
        Self { bundle }
    }

    pub fn bundle(&self) -> &MessageBundle {
        &self.bundle
    }

    /// Render a plain-text template
    pub fn render(&self, template: &str, attributes: &HashMap<String, String>) -> String {
        self.render_with(template, attributes, str::to_string)
    }

    /// Render an HTML template, escaping every substituted value
    pub fn render_html(&self, template: &str, attributes: &HashMap<String, String>) -> String {
        self.render_with(template, attributes, escape_html)
    }

    /// Subject line for a message key
    pub fn subject(&self, key: &str) -> String {
        self.bundle.format(key, &[])
    }

    fn render_with(
        &self,
        template: &str,
        attributes: &HashMap<String, String>,
        escape: fn(&str) -> String,
    ) -> String {
        let with_messages = MESSAGE_PATTERN.replace_all(template, |caps: &Captures| {
            let args: Vec<String> = caps
                .get(2)
                .map(|group| {
                    group
                        .as_str()
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(|name| resolve_attribute(attributes, name))
                        .collect()
                })
                .unwrap_or_default();
            escape(&self.bundle.format(&caps[1], &args))
        });

        ATTRIBUTE_PATTERN
            .replace_all(&with_messages, |caps: &Captures| {
                escape(&resolve_attribute(attributes, caps[1].trim()))
            })
            .into_owned()
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(MessageBundle::english())
    }
}

fn resolve_attribute(attributes: &HashMap<String, String>, name: &str) -> String {
    match attributes.get(name) {
        Some(value) => value.clone(),
        None => {
            tracing::warn!(attribute = name, "Missing template attribute");
            format!("[[{}]]", name)
        }
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
