use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::null_as_default;

/// Loosely typed record (a work-experience, education or project item).
pub type FieldMap = Map<String, Value>;

/// Structured résumé profile.
///
/// Every field has a default, so a `Profile` is fully shaped no matter how
/// little was extracted. Missing or `null` fields in generator output
/// deserialize to those defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub work_experience: Vec<FieldMap>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<FieldMap>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Skills,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<FieldMap>,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
}

/// Skills split into exactly two buckets; both keys are always serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    #[serde(deserialize_with = "null_as_default")]
    pub technical: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub soft: Vec<String>,
}

impl Profile {
    /// Which top-level fields carry a value, in field declaration order.
    pub fn populated_fields(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("full_name", is_set(&self.full_name)),
            ("email", is_set(&self.email)),
            ("phone", is_set(&self.phone)),
            ("location", is_set(&self.location)),
            ("headline", is_set(&self.headline)),
            ("summary", is_set(&self.summary)),
            ("work_experience", !self.work_experience.is_empty()),
            ("education", !self.education.is_empty()),
            (
                "skills",
                !self.skills.technical.is_empty() || !self.skills.soft.is_empty(),
            ),
            ("certifications", !self.certifications.is_empty()),
            ("projects", !self.projects.is_empty()),
            ("languages", !self.languages.is_empty()),
            ("achievements", !self.achievements.is_empty()),
        ]
    }
}

fn is_set(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}
