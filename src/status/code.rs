use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::normalize::normalize_text;

/// Label shown for anything that does not normalize to a known status.
pub const DEFAULT_LABEL: &str = "Desconhecido";

/// Display class for anything that does not normalize to a known status.
pub const DEFAULT_DISPLAY_CLASS: &str = "status-desconhecido";

/// Canonical lifecycle stage of a credit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Constituido,
    EmAnalise,
    Aprovado,
    Reprovado,
    /// Nothing resolvable, or text outside the known set.
    Unknown,
}

impl StatusCode {
    /// The closed set of defined codes, excluding `Unknown`.
    pub const ALL: [StatusCode; 4] = [
        StatusCode::Constituido,
        StatusCode::EmAnalise,
        StatusCode::Aprovado,
        StatusCode::Reprovado,
    ];

    /// Normalize free text and map it onto a code. Never fails.
    pub fn normalize(raw: &str) -> StatusCode {
        StatusCode::from_normalized(&normalize_text(raw))
    }

    /// Map already-normalized text (see [`normalize_text`]) onto a code.
    pub fn from_normalized(normalized: &str) -> StatusCode {
        match normalized {
            "CONSTITUIDO" => StatusCode::Constituido,
            "EM_ANALISE" => StatusCode::EmAnalise,
            "APROVADO" => StatusCode::Aprovado,
            "REPROVADO" => StatusCode::Reprovado,
            _ => StatusCode::Unknown,
        }
    }

    /// Normalized text form. Normalizing it again yields the same code.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Constituido => "CONSTITUIDO",
            StatusCode::EmAnalise => "EM_ANALISE",
            StatusCode::Aprovado => "APROVADO",
            StatusCode::Reprovado => "REPROVADO",
            StatusCode::Unknown => "UNKNOWN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusCode::Constituido => "Constituído",
            StatusCode::EmAnalise => "Em análise",
            StatusCode::Aprovado => "Aprovado",
            StatusCode::Reprovado => "Reprovado",
            StatusCode::Unknown => DEFAULT_LABEL,
        }
    }

    pub fn display_class(&self) -> &'static str {
        match self {
            StatusCode::Constituido => "status-constituido",
            StatusCode::EmAnalise => "status-em-analise",
            StatusCode::Aprovado => "status-aprovado",
            StatusCode::Reprovado => "status-reprovado",
            StatusCode::Unknown => DEFAULT_DISPLAY_CLASS,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, StatusCode::Unknown)
    }
}

impl AsRef<str> for StatusCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    pub input: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized credit status: {:?}", self.input)
    }
}

impl std::error::Error for ParseStatusError {}

/// Strict parse: text that does not normalize to a defined code is an error.
impl FromStr for StatusCode {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match StatusCode::normalize(s) {
            StatusCode::Unknown => Err(ParseStatusError {
                input: s.to_string(),
            }),
            code => Ok(code),
        }
    }
}
