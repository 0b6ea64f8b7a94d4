use serde::{Deserialize, Serialize};
use std::fmt;

const TOPIC_PREFIX: &str = "dc/topic/";
const PEER_GROUP_PREFIX: &str = "dc/svpg/";

/// Identifier of a measurable quantity (statistical series) or a grouping of them.
///
/// Equality and hashing are by identifier only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variable(String);

/// What a detected variable identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// A single statistical series with observations
    StatVar,

    /// A curated topic that expands into many series
    Topic,

    /// A peer group of related series
    PeerGroup,
}

impl Variable {
    pub fn new(dcid: impl Into<String>) -> Self {
        Self(dcid.into())
    }

    pub fn dcid(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> VariableKind {
        if self.0.starts_with(TOPIC_PREFIX) {
            VariableKind::Topic
        } else if self.0.starts_with(PEER_GROUP_PREFIX) {
            VariableKind::PeerGroup
        } else {
            VariableKind::StatVar
        }
    }

    /// Only plain statistical variables can be charted directly.
    pub fn is_stat_var(&self) -> bool {
        self.kind() == VariableKind::StatVar
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Variable {
    fn from(dcid: &str) -> Self {
        Self::new(dcid)
    }
}

impl From<String> for Variable {
    fn from(dcid: String) -> Self {
        Self(dcid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_identifier_prefix() {
        assert_eq!(Variable::new("Count_Person").kind(), VariableKind::StatVar);
        assert_eq!(
            Variable::new("dc/topic/Health").kind(),
            VariableKind::Topic
        );
        assert_eq!(
            Variable::new("dc/svpg/MedicalConditions").kind(),
            VariableKind::PeerGroup
        );
    }

    #[test]
    fn serializes_as_bare_identifier() {
        let v: Variable = serde_json::from_str("\"Median_Income\"").unwrap();
        assert_eq!(v, Variable::new("Median_Income"));
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"Median_Income\"");
    }
}
