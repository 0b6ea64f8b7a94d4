use crate::place::PlaceType;
use serde::{Deserialize, Serialize};

/// Interpretation of a user turn produced by the upstream classifier.
///
/// Every kind the classifier can emit has its own variant. Handlers pick the
/// kinds they care about via [`Intent::kind`] and skip everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    /// Scope the answer to places of a type contained in the detected place
    /// ("counties in California"). The type may be missing when the classifier
    /// only detected the containment phrase.
    ContainedIn {
        #[serde(default)]
        place_type: Option<PlaceType>,
    },

    /// "top 10 counties by ..."
    Ranking {
        #[serde(default)]
        ascending: bool,
    },

    /// "compare X and Y"
    Comparison,

    /// "how does X relate to Y"
    Correlation,

    /// "which places grew fastest"
    TimeDelta { direction: TimeDeltaDirection },

    /// "richest", "poorest"
    Superlative,

    /// "tell me about X"
    Overview,

    /// "fires in ...", "earthquakes near ..."
    Event { event_type: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeDeltaDirection {
    Increase,
    Decrease,
}

/// Discriminator of [`Intent`], one per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    ContainedIn,
    Ranking,
    Comparison,
    Correlation,
    TimeDelta,
    Superlative,
    Overview,
    Event,
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::ContainedIn { .. } => IntentKind::ContainedIn,
            Self::Ranking { .. } => IntentKind::Ranking,
            Self::Comparison => IntentKind::Comparison,
            Self::Correlation => IntentKind::Correlation,
            Self::TimeDelta { .. } => IntentKind::TimeDelta,
            Self::Superlative => IntentKind::Superlative,
            Self::Overview => IntentKind::Overview,
            Self::Event { .. } => IntentKind::Event,
        }
    }

    /// Target place type of a containment intent, `None` for every other
    /// intent and for containment intents without a detected type.
    pub fn contained_place_type(&self) -> Option<PlaceType> {
        match self {
            Self::ContainedIn { place_type } => *place_type,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_tagged_intents() {
        let raw = r#"[
            {"kind": "contained_in", "place_type": "County"},
            {"kind": "contained_in"},
            {"kind": "ranking", "ascending": true},
            {"kind": "time_delta", "direction": "increase"},
            {"kind": "overview"}
        ]"#;
        let intents: Vec<Intent> = serde_json::from_str(raw).unwrap();
        assert_eq!(
            intents,
            vec![
                Intent::ContainedIn {
                    place_type: Some(PlaceType::County)
                },
                Intent::ContainedIn { place_type: None },
                Intent::Ranking { ascending: true },
                Intent::TimeDelta {
                    direction: TimeDeltaDirection::Increase
                },
                Intent::Overview,
            ]
        );
    }

    #[test]
    fn only_containment_carries_place_type() {
        let scoped = Intent::ContainedIn {
            place_type: Some(PlaceType::State),
        };
        assert_eq!(scoped.kind(), IntentKind::ContainedIn);
        assert_eq!(scoped.contained_place_type(), Some(PlaceType::State));
        assert_eq!(Intent::Comparison.contained_place_type(), None);
        assert_eq!(
            Intent::ContainedIn { place_type: None }.contained_place_type(),
            None
        );
    }
}
