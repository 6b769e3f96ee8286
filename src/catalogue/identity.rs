use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Versioned key for a catalogue document (e.g., `curriculum_catalogue_v1`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogueKey(pub String);

/// Stable identifier for a learning module.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub String);

/// Stable identifier for a role profile (e.g., `DAN`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleId {
    fn from(value: &str) -> Self {
        RoleId(value.to_string())
    }
}

impl From<&str> for ModuleId {
    fn from(value: &str) -> Self {
        ModuleId(value.to_string())
    }
}

/// Outcome dimension a learning-outcome statement belongs to.
///
/// The three known variants sort first and in this order, so outcome maps keyed
/// by dimension iterate knowledge, skills, competence. `Other` keeps catalogue
/// entries with unrecognised dimension names instead of dropping them.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum OutcomeDimension {
    Knowledge,
    Skills,
    Competence,
    Other(String),
}

impl OutcomeDimension {
    pub const CORE: [OutcomeDimension; 3] = [
        OutcomeDimension::Knowledge,
        OutcomeDimension::Skills,
        OutcomeDimension::Competence,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            OutcomeDimension::Knowledge => "knowledge",
            OutcomeDimension::Skills => "skills",
            OutcomeDimension::Competence => "competence",
            OutcomeDimension::Other(value) => value.as_str(),
        }
    }

    /// Capitalised label used in credential titles and mapping rows.
    pub fn title(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "knowledge" => OutcomeDimension::Knowledge,
            "skills" => OutcomeDimension::Skills,
            "competence" => OutcomeDimension::Competence,
            other => OutcomeDimension::Other(other.to_string()),
        }
    }
}

impl fmt::Display for OutcomeDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OutcomeDimension {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OutcomeDimension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn dimension_round_trips_known_and_unknown() {
        let known = OutcomeDimension::Skills;
        let json = serde_json::to_string(&known).unwrap();
        assert_eq!(json, "\"skills\"");
        let back: OutcomeDimension = serde_json::from_str(&json).unwrap();
        assert_eq!(back, known);

        let parsed: OutcomeDimension = serde_json::from_str("\"attitudes\"").unwrap();
        assert_eq!(parsed, OutcomeDimension::Other("attitudes".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"attitudes\"");
    }

    #[test]
    fn dimension_keyed_maps_iterate_in_core_order() {
        let map: BTreeMap<OutcomeDimension, &str> = serde_json::from_str(
            r#"{"competence": "c", "attitudes": "a", "knowledge": "k", "skills": "s"}"#,
        )
        .unwrap();
        let order: Vec<&str> = map.keys().map(OutcomeDimension::as_str).collect();
        assert_eq!(order, vec!["knowledge", "skills", "competence", "attitudes"]);
    }

    #[test]
    fn dimension_title_capitalises_first_letter() {
        assert_eq!(OutcomeDimension::Competence.title(), "Competence");
        assert_eq!(OutcomeDimension::Other("ethics".into()).title(), "Ethics");
    }
}
