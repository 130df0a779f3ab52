//! Agent card served at `/.well-known/agent.json`.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Name of the one skill this agent offers.
pub const SKILL_NAME: &str = "search_complaints";

/// A named capability advertised by an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill name used in task requests.
    pub name: String,
    /// What the skill does.
    pub description: String,
    /// JSON Schema for task input.
    pub input_schema: Value,
}

/// Agent metadata for discovery by peer agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCard {
    /// Stable agent URN.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the agent does.
    pub description: String,
    /// Agent version.
    pub version: String,
    /// Offered skills.
    pub skills: Vec<Skill>,
}

impl AgentCard {
    /// The CFPB complaint-search agent card.
    #[must_use]
    pub fn complaint_search() -> Self {
        Self {
            id: "urn:agent:cfpb-complaint-search".to_string(),
            name: "CFPB Complaint Search".to_string(),
            description: "Searches the U.S. Consumer Financial Protection Bureau (CFPB) \
                          Consumer Complaint Database via the complaints proxy."
                .to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            skills: vec![Skill {
                name: SKILL_NAME.to_string(),
                description: "Search the CFPB CCDB-5 dataset".to_string(),
                // Any JSON object; members are forwarded as query parameters.
                input_schema: json!({ "type": "object" }),
            }],
        }
    }

    /// Returns the skill with the given name.
    #[must_use]
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_offers_search_skill() {
        let card = AgentCard::complaint_search();
        assert_eq!(card.id, "urn:agent:cfpb-complaint-search");
        let skill = card.skill(SKILL_NAME);
        assert!(skill.is_some());
        assert_eq!(
            skill.map(|s| s.input_schema.clone()),
            Some(json!({"type": "object"}))
        );
        assert!(card.skill("other").is_none());
    }
}
