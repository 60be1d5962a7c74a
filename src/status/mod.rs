//! Status resolution - find, normalize and present the status of a credit record.
//!
//! Upstream payloads name the status field differently across API versions and
//! sometimes bury it in nested audit data. Resolution probes a fixed list of
//! well-known fields first and only then falls back to a bounded breadth-first
//! search for strings that look like a status.
//!
//! ## Example
//!
//! ```ignore
//! use credit_desk::{StatusCode, StatusResolver};
//! use serde_json::json;
//!
//! let resolver = StatusResolver::new();
//! let payload = json!({ "situacaoCredito": { "descricao": "Em análise" } });
//!
//! let raw = resolver.resolve(&payload);
//! assert_eq!(raw, "Em análise");
//! assert_eq!(resolver.normalize(&raw), StatusCode::EmAnalise);
//! assert_eq!(resolver.display_class(&raw), "status-em-analise");
//! ```

mod code;
mod normalize;
mod resolver;
mod source;

pub use code::{ParseStatusError, StatusCode, DEFAULT_DISPLAY_CLASS, DEFAULT_LABEL};
pub(crate) use normalize::fold_for_collation;
pub use normalize::normalize_text;
pub use resolver::{ResolverConfig, StatusResolver};
pub use source::{JsonNode, Shape, StatusSource};
