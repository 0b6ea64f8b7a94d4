use crate::conversation::TurnContext;
use nl_detection::{Intent, IntentKind, Place, Turn, Variable};
use std::collections::HashSet;

/// Reads candidates out of a turn and its history.
///
/// Current-turn detections always come first; history is consulted most
/// recent turn first. `max_history_turns` caps how far back any lookup walks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextResolver {
    max_history_turns: Option<usize>,
}

impl ContextResolver {
    pub fn new(max_history_turns: Option<usize>) -> Self {
        Self { max_history_turns }
    }

    fn history<'a>(&self, ctx: &TurnContext<'a>) -> impl Iterator<Item = &'a Turn> {
        let limit = self.max_history_turns.unwrap_or(usize::MAX);
        ctx.history().take(limit)
    }

    /// Intents of `kind` from the current turn, then from each earlier turn.
    pub fn intents_of_kind<'a>(&self, ctx: &TurnContext<'a>, kind: IntentKind) -> Vec<&'a Intent> {
        std::iter::once(ctx.current())
            .chain(self.history(ctx))
            .flat_map(|turn| turn.intents_of_kind(kind))
            .collect()
    }

    /// Places detected in earlier turns, most recent turn first.
    pub fn places_from_history<'a>(&self, ctx: &TurnContext<'a>) -> Vec<&'a Place> {
        self.history(ctx).flat_map(|turn| turn.places.iter()).collect()
    }

    /// Current turn's places followed by places from history.
    pub fn places<'a>(&self, ctx: &TurnContext<'a>) -> Vec<&'a Place> {
        let mut places: Vec<&Place> = ctx.current().places.iter().collect();
        places.extend(self.places_from_history(ctx));
        places
    }

    /// Statistical variables detected in the current turn only.
    pub fn main_variables<'a>(&self, ctx: &TurnContext<'a>) -> Vec<&'a Variable> {
        ctx.current().stat_vars().collect()
    }

    /// Statistical variables from history, most recent turn first, each
    /// identifier kept once at its most recent position.
    pub fn context_variables<'a>(&self, ctx: &TurnContext<'a>) -> Vec<&'a Variable> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.history(ctx)
            .flat_map(Turn::stat_vars)
            .filter(|v| seen.insert(v.dcid()))
            .collect()
    }
}
