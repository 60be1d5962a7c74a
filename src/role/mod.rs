//! User role labels - a persisted, observable choice between three admin profiles.
//!
//! Roles only decide which screens and actions are offered. They are a
//! navigation convenience, not an authorization boundary.

mod selector;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::status::StatusCode;

pub use selector::{RoleSelector, ROLE_STORAGE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    AdminFull,
    #[default]
    AdminConsulta,
    AdminSolicitacao,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [
        UserRole::AdminFull,
        UserRole::AdminConsulta,
        UserRole::AdminSolicitacao,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::AdminFull => "admin-full",
            UserRole::AdminConsulta => "admin-consulta",
            UserRole::AdminSolicitacao => "admin-solicitacao",
        }
    }

    /// The full credit listing and the analysis panel.
    pub fn can_view_full_listing(&self) -> bool {
        matches!(self, UserRole::AdminFull)
    }

    /// The requester's own credit requests.
    pub fn can_view_own_requests(&self) -> bool {
        matches!(self, UserRole::AdminFull | UserRole::AdminSolicitacao)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    pub input: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown user role: {:?}", self.input)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for UserRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseRoleError {
                input: s.to_string(),
            })
    }
}

/// Who signs off an analysis, as recorded on the credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Approver {
    AdminFull,
    AdminConsulta,
    AdminCredito,
}

impl From<UserRole> for Approver {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::AdminFull => Approver::AdminFull,
            UserRole::AdminConsulta => Approver::AdminConsulta,
            UserRole::AdminSolicitacao => Approver::AdminCredito,
        }
    }
}

/// Outcome of analysing a credit that is under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisDecision {
    Approve,
    Reject,
}

impl AnalysisDecision {
    pub fn status(&self) -> StatusCode {
        match self {
            AnalysisDecision::Approve => StatusCode::Aprovado,
            AnalysisDecision::Reject => StatusCode::Reprovado,
        }
    }
}

/// Only a full admin may analyse, and only credits currently under review.
pub fn can_analyze(role: UserRole, raw_status: &str) -> bool {
    role == UserRole::AdminFull && StatusCode::normalize(raw_status) == StatusCode::EmAnalise
}
