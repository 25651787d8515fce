//! Resource role enumeration.

use super::ParseResourceRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a resource fills within a project.
///
/// [`ResourceRole::Other`] requires a free-text custom role label on the
/// resource; the rule is enforced by the resource aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceRole {
    /// Software developer.
    Developer,
    /// UI/UX designer.
    Designer,
    /// Quality assurance tester.
    Tester,
    /// Project manager.
    ProjectManager,
    /// Business analyst.
    BusinessAnalyst,
    /// A role outside the fixed enumeration, described by a custom label.
    Other,
}

impl ResourceRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::Designer => "designer",
            Self::Tester => "tester",
            Self::ProjectManager => "project_manager",
            Self::BusinessAnalyst => "business_analyst",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ResourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ResourceRole {
    type Error = ParseResourceRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "developer" => Ok(Self::Developer),
            "designer" => Ok(Self::Designer),
            "tester" => Ok(Self::Tester),
            "project_manager" => Ok(Self::ProjectManager),
            "business_analyst" => Ok(Self::BusinessAnalyst),
            "other" => Ok(Self::Other),
            _ => Err(ParseResourceRoleError(value.to_owned())),
        }
    }
}
