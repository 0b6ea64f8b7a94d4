use crate::intent::{Intent, IntentKind};
use crate::place::Place;
use crate::variable::Variable;
use serde::{Deserialize, Serialize};

/// Everything the classifier detected in one user turn.
///
/// A turn is immutable once it joins a conversation's history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Raw user query, kept for logging only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Places detected in this turn, in detection order
    #[serde(default)]
    pub places: Vec<Place>,

    /// Variables detected in this turn, best match first
    #[serde(default)]
    pub variables: Vec<Variable>,

    /// Parsed intents, in classifier order
    #[serde(default)]
    pub intents: Vec<Intent>,
}

impl Turn {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_places(mut self, places: impl IntoIterator<Item = Place>) -> Self {
        self.places.extend(places);
        self
    }

    #[must_use]
    pub fn with_variables<V: Into<Variable>>(mut self, variables: impl IntoIterator<Item = V>) -> Self {
        self.variables.extend(variables.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intents.push(intent);
        self
    }

    pub fn intents_of_kind(&self, kind: IntentKind) -> impl Iterator<Item = &Intent> {
        self.intents.iter().filter(move |intent| intent.kind() == kind)
    }

    /// Detected variables that are plain statistical variables (no topics or
    /// peer groups), in detection order.
    pub fn stat_vars(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| v.is_stat_var())
    }
}
