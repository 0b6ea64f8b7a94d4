use crate::config::FulfillmentConfig;
use crate::correlation::CorrelationFulfiller;
use crate::emitter::ChartLog;
use crate::error::Result;
use crate::services::{ExistenceService, PlaceSampler};
use nl_detection::{BlockId, ChartDescriptor, Turn};

/// Hands out block ids in emission order for one conversation.
///
/// An id is only consumed by [`BlockCounter::advance`], so a caller can look
/// at the next id, try to use it, and give it back by not advancing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockCounter {
    issued: u32,
}

impl BlockCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next accepted chart will receive.
    pub fn peek_next(&self) -> BlockId {
        BlockId::new(self.issued.saturating_add(1))
    }

    /// Consumes and returns the next id.
    pub fn advance(&mut self) -> BlockId {
        let id = self.peek_next();
        self.issued = id.get();
        id
    }

    pub fn last_issued(&self) -> Option<BlockId> {
        (self.issued > 0).then(|| BlockId::new(self.issued))
    }
}

/// Read-only view of the current turn and the turns before it.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    current: &'a Turn,
    history: &'a [Turn],
}

impl<'a> TurnContext<'a> {
    /// `history` is ordered oldest first, as turns were appended.
    pub fn new(current: &'a Turn, history: &'a [Turn]) -> Self {
        Self { current, history }
    }

    pub fn current(&self) -> &'a Turn {
        self.current
    }

    /// Prior turns, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &'a Turn> {
        self.history.iter().rev()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

/// A multi-turn conversation: append-only turns plus the charts emitted so far.
#[derive(Debug, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
    block_counter: BlockCounter,
    charts: ChartLog,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &FulfillmentConfig) -> Self {
        Self::with_chart_log(ChartLog::new(config.dedupe_charts))
    }

    pub fn with_chart_log(charts: ChartLog) -> Self {
        Self {
            charts,
            ..Self::default()
        }
    }

    pub fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// View rooted at the newest turn, `None` before the first turn.
    pub fn context(&self) -> Option<TurnContext<'_>> {
        let (current, history) = self.turns.split_last()?;
        Some(TurnContext::new(current, history))
    }

    pub fn charts(&self) -> &[ChartDescriptor] {
        self.charts.charts()
    }

    pub fn block_counter(&self) -> &BlockCounter {
        &self.block_counter
    }

    /// Runs correlation fulfillment for the newest turn, appending any charts
    /// to this conversation.
    pub async fn fulfill_correlation<E, S>(
        &mut self,
        fulfiller: &CorrelationFulfiller<'_, E, S>,
    ) -> Result<bool>
    where
        E: ExistenceService + ?Sized,
        S: PlaceSampler + ?Sized,
    {
        let Some((current, history)) = self.turns.split_last() else {
            return Ok(false);
        };
        let ctx = TurnContext::new(current, history);
        fulfiller
            .populate(ctx, &mut self.block_counter, &mut self.charts)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counter_starts_at_one_and_only_moves_on_advance() {
        let mut counter = BlockCounter::new();
        assert_eq!(counter.last_issued(), None);
        assert_eq!(counter.peek_next(), BlockId::new(1));
        assert_eq!(counter.peek_next(), BlockId::new(1));

        assert_eq!(counter.advance(), BlockId::new(1));
        assert_eq!(counter.advance(), BlockId::new(2));
        assert_eq!(counter.last_issued(), Some(BlockId::new(2)));
        assert_eq!(counter.peek_next(), BlockId::new(3));
    }

    #[test]
    fn context_puts_newest_turn_first() {
        let mut conversation = Conversation::new();
        assert!(conversation.context().is_none());

        conversation.push_turn(Turn::new("first"));
        conversation.push_turn(Turn::new("second"));
        conversation.push_turn(Turn::new("third"));

        let ctx = conversation.context().unwrap();
        assert_eq!(ctx.current().query.as_deref(), Some("third"));
        let history: Vec<_> = ctx
            .history()
            .map(|t| t.query.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(history, vec!["second", "first"]);
        assert_eq!(ctx.history_len(), 2);
    }
}
