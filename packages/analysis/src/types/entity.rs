//! Named entities surfaced by document analysis.

use serde::{Deserialize, Serialize};

/// Entity categories kept in analysis results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityCategory {
    Person,
    Org,
    Gpe,
    Date,
    /// Statute references found by the pattern pass
    Law,
}

impl EntityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Gpe => "GPE",
            Self::Date => "DATE",
            Self::Law => "LAW",
        }
    }

    /// Map a statistical recognizer label onto the allow-list.
    ///
    /// Only `PERSON`, `ORG`, `GPE` and `DATE` are accepted. `LAW` is reserved
    /// for the pattern pass, so a recognizer reporting it is ignored too.
    pub fn from_statistical_label(label: &str) -> Option<Self> {
        match label {
            "PERSON" => Some(Self::Person),
            "ORG" => Some(Self::Org),
            "GPE" => Some(Self::Gpe),
            "DATE" => Some(Self::Date),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named entity. Identity is the (text, category) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    #[serde(rename = "label")]
    pub category: EntityCategory,
}

impl Entity {
    pub fn new(text: impl Into<String>, category: EntityCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}
