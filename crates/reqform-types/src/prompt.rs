//! Generated prompt documents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four documents assembled from a completed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPrompts {
    pub business: String,
    pub audience: String,
    pub technical: String,
    pub master: String,
}

impl GeneratedPrompts {
    pub fn get(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::Business => &self.business,
            PromptKind::Audience => &self.audience,
            PromptKind::Technical => &self.technical,
            PromptKind::Master => &self.master,
        }
    }

    /// All documents in display order.
    pub fn iter(&self) -> impl Iterator<Item = (PromptKind, &str)> {
        PromptKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// Name of one generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    Business,
    Audience,
    Technical,
    Master,
}

impl PromptKind {
    pub const ALL: [PromptKind; 4] = [
        PromptKind::Business,
        PromptKind::Audience,
        PromptKind::Technical,
        PromptKind::Master,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::Business => "business",
            PromptKind::Audience => "audience",
            PromptKind::Technical => "technical",
            PromptKind::Master => "master",
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "business" => Ok(PromptKind::Business),
            "audience" => Ok(PromptKind::Audience),
            "technical" => Ok(PromptKind::Technical),
            "master" => Ok(PromptKind::Master),
            other => Err(format!("unknown prompt kind: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_kind_roundtrip_through_str() {
        for kind in PromptKind::ALL {
            assert_eq!(kind.to_string().parse::<PromptKind>().unwrap(), kind);
        }
        assert!("summary".parse::<PromptKind>().is_err());
    }

    #[test]
    fn test_iter_follows_display_order() {
        let prompts = GeneratedPrompts {
            business: "b".into(),
            audience: "a".into(),
            technical: "t".into(),
            master: "m".into(),
        };
        let order: Vec<&str> = prompts.iter().map(|(_, text)| text).collect();
        assert_eq!(order, vec!["b", "a", "t", "m"]);
    }
}
