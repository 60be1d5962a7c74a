use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashSet, VecDeque};

use super::code::{StatusCode, DEFAULT_LABEL};
use super::normalize::normalize_text;
use super::source::{JsonNode, Shape, StatusSource};
use crate::record::Record;

/// Tunables for status extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Fields probed on the top-level mapping, in order, before any deep search.
    pub candidate_fields: Vec<String>,
    /// Fields read from a nested mapping found under a candidate field.
    pub text_fields: Vec<String>,
    /// Substrings of normalized text that mark a string as a status during deep search.
    pub needles: Vec<String>,
    /// Deepest level the fallback search looks at; the root is level 0.
    pub max_depth: usize,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            candidate_fields: owned(&[
                "situacao",
                "situacaoCredito",
                "situacaoAtual",
                "status",
                "statusCredito",
                "statusAtual",
            ]),
            text_fields: owned(&["descricao", "label", "nome", "name", "value", "texto", "text"]),
            needles: owned(&["APROV", "REPROV", "ANALISE", "CONSTITU"]),
            max_depth: 4,
        }
    }
}

/// Extracts, normalizes and presents credit statuses.
///
/// Every operation is total: a missing or unrecognized status comes back as an
/// empty string or [`StatusCode::Unknown`], never as an error.
#[derive(Debug, Clone)]
pub struct StatusResolver {
    config: ResolverConfig,
    needles: Vec<String>,
}

impl Default for StatusResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusResolver {
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        let needles = config
            .needles
            .iter()
            .map(|n| normalize_text(n))
            .filter(|n| !n.is_empty())
            .collect();
        Self { config, needles }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Raw status text found in `input`, trimmed; empty when nothing is found.
    ///
    /// Accepts a bare string, any JSON value, or a record.
    pub fn resolve<'v>(&self, input: impl Into<JsonNode<'v>>) -> String {
        self.resolve_source(input.into())
    }

    /// [`resolve`](Self::resolve) over any [`StatusSource`] graph.
    pub fn resolve_source<S: StatusSource>(&self, input: S) -> String {
        if let Shape::Text(text) = input.shape() {
            return text.trim().to_string();
        }

        if let Some(text) = self.probe_candidates(&input) {
            return text;
        }

        self.deep_search(input).unwrap_or_default()
    }

    /// Fast path: exact-name candidate fields on the top-level mapping.
    fn probe_candidates<S: StatusSource>(&self, input: &S) -> Option<String> {
        self.config
            .candidate_fields
            .iter()
            .filter_map(|name| input.field(name))
            .find_map(|candidate| self.pick_text(&candidate))
    }

    /// A string directly, or the first non-blank text field of a nested mapping.
    fn pick_text<S: StatusSource>(&self, value: &S) -> Option<String> {
        match value.shape() {
            Shape::Text(text) => non_blank(text),
            Shape::Mapping(_) => self.config.text_fields.iter().find_map(|name| {
                let field = value.field(name)?;
                let text = match field.shape() {
                    Shape::Text(text) => non_blank(text),
                    _ => None,
                };
                text
            }),
            Shape::Sequence(_) | Shape::Other => None,
        }
    }

    /// Breadth-first search for the shallowest string carrying a needle.
    fn deep_search<S: StatusSource>(&self, root: S) -> Option<String> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back((root, 0usize));

        while let Some((node, depth)) = queue.pop_front() {
            if depth > self.config.max_depth || !visited.insert(node.identity()) {
                continue;
            }

            let children = match node.shape() {
                Shape::Text(text) => {
                    if self.has_needle(text) {
                        tracing::debug!(depth, "status found by deep search");
                        return Some(text.trim().to_string());
                    }
                    continue;
                }
                Shape::Sequence(items) => items,
                Shape::Mapping(values) => values,
                Shape::Other => continue,
            };

            if depth < self.config.max_depth {
                queue.extend(children.into_iter().map(|child| (child, depth + 1)));
            }
        }

        None
    }

    fn has_needle(&self, text: &str) -> bool {
        let normalized = normalize_text(text);
        self.needles.iter().any(|n| normalized.contains(n.as_str()))
    }

    /// Normalize raw text to a code. Never fails.
    pub fn normalize(&self, raw: &str) -> StatusCode {
        StatusCode::normalize(raw)
    }

    /// Normalize an optional JSON value; only strings can carry a status.
    pub fn normalize_value(&self, value: Option<&Value>) -> StatusCode {
        match value {
            Some(Value::String(raw)) => StatusCode::normalize(raw),
            _ => StatusCode::Unknown,
        }
    }

    /// Human label for a code or any raw status text.
    pub fn label(&self, status: impl AsRef<str>) -> &'static str {
        StatusCode::normalize(status.as_ref()).label()
    }

    /// Display class for a code or any raw status text.
    pub fn display_class(&self, status: impl AsRef<str>) -> &'static str {
        StatusCode::normalize(status.as_ref()).display_class()
    }

    /// Label for listings: unrecognized text is shown as-is rather than hidden.
    pub fn display_label(&self, raw: &str) -> String {
        match StatusCode::normalize(raw) {
            StatusCode::Unknown => {
                non_blank(raw).unwrap_or_else(|| DEFAULT_LABEL.to_string())
            }
            code => code.label().to_string(),
        }
    }

    /// Resolve and normalize in one step.
    pub fn status_of(&self, record: &Record) -> StatusCode {
        StatusCode::normalize(&self.resolve(record))
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
