use crate::conversation::BlockCounter;
use crate::error::{FulfillmentError, Result};
use crate::services::ChartRegistry;
use async_trait::async_trait;
use nl_detection::{ChartDescriptor, Place, PlaceType, Variable};

/// Builds scatter descriptors and registers them, one block id per accepted chart.
pub struct ChartEmitter<'o, R: ?Sized> {
    counter: &'o mut BlockCounter,
    registry: &'o mut R,
}

impl<'o, R> ChartEmitter<'o, R>
where
    R: ChartRegistry + ?Sized,
{
    pub fn new(counter: &'o mut BlockCounter, registry: &'o mut R) -> Self {
        Self { counter, registry }
    }

    /// Registers a primary `[main, context]` scatter over `place_type`
    /// children of `place`. Returns whether the registry accepted it.
    ///
    /// A rejected chart leaves the block counter untouched.
    pub async fn emit(
        &mut self,
        main: &Variable,
        context: &Variable,
        place: &Place,
        place_type: PlaceType,
    ) -> Result<bool> {
        let block_id = self.counter.peek_next();
        let chart = ChartDescriptor::scatter(
            main.clone(),
            context.clone(),
            place.clone(),
            place_type,
            block_id,
        );

        let accepted = self
            .registry
            .register(chart)
            .await
            .map_err(FulfillmentError::Registration)?;

        if accepted {
            self.counter.advance();
            log::debug!("Registered scatter {main} vs {context} for {place} as block {block_id}");
        } else {
            log::debug!("Registry rejected scatter {main} vs {context} for {place}");
        }
        Ok(accepted)
    }
}

/// A conversation's chart output, in registration order.
#[derive(Debug, Clone)]
pub struct ChartLog {
    charts: Vec<ChartDescriptor>,
    dedupe: bool,
}

impl Default for ChartLog {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ChartLog {
    /// With `dedupe`, a chart showing the same data as a registered one is rejected.
    pub fn new(dedupe: bool) -> Self {
        Self {
            charts: Vec::new(),
            dedupe,
        }
    }

    pub fn charts(&self) -> &[ChartDescriptor] {
        &self.charts
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

#[async_trait]
impl ChartRegistry for ChartLog {
    async fn register(&mut self, chart: ChartDescriptor) -> anyhow::Result<bool> {
        if self.dedupe && self.charts.iter().any(|c| c.shows_same_data(&chart)) {
            return Ok(false);
        }
        self.charts.push(chart);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingRegistry;
    use nl_detection::{BlockId, ChartKind, ChartOrigin};
    use pretty_assertions::assert_eq;

    fn california() -> Place {
        Place::new("geoId/06", "California")
    }

    #[tokio::test]
    async fn emit_builds_primary_scatter() {
        let mut counter = BlockCounter::new();
        let mut log = ChartLog::default();
        let mut emitter = ChartEmitter::new(&mut counter, &mut log);

        let accepted = emitter
            .emit(
                &Variable::new("Count_Person"),
                &Variable::new("Median_Income"),
                &california(),
                PlaceType::County,
            )
            .await
            .unwrap();
        assert!(accepted);

        assert_eq!(
            log.charts(),
            &[ChartDescriptor {
                kind: ChartKind::Scatter,
                variables: [Variable::new("Count_Person"), Variable::new("Median_Income")],
                place: california(),
                place_type: PlaceType::County,
                origin: ChartOrigin::Primary,
                include_per_capita: false,
                block_id: BlockId::new(1),
            }]
        );
        assert_eq!(counter.last_issued(), Some(BlockId::new(1)));
    }

    #[tokio::test]
    async fn block_ids_increase_by_one() {
        let mut counter = BlockCounter::new();
        let mut log = ChartLog::default();
        let mut emitter = ChartEmitter::new(&mut counter, &mut log);

        for main in ["A", "B", "C"] {
            emitter
                .emit(
                    &Variable::new(main),
                    &Variable::new("X"),
                    &california(),
                    PlaceType::County,
                )
                .await
                .unwrap();
        }

        let ids: Vec<u32> = log.charts().iter().map(|c| c.block_id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn rejected_chart_does_not_consume_block_id() {
        let mut counter = BlockCounter::new();
        let mut registry = RecordingRegistry::default().rejecting("A", "X");
        let mut emitter = ChartEmitter::new(&mut counter, &mut registry);

        let first = emitter
            .emit(&Variable::new("A"), &Variable::new("X"), &california(), PlaceType::County)
            .await
            .unwrap();
        let second = emitter
            .emit(&Variable::new("B"), &Variable::new("X"), &california(), PlaceType::County)
            .await
            .unwrap();

        assert!(!first);
        assert!(second);
        assert_eq!(registry.attempts[0].block_id, BlockId::new(1));
        assert_eq!(registry.accepted[0].block_id, BlockId::new(1));
        assert_eq!(counter.last_issued(), Some(BlockId::new(1)));
    }

    #[tokio::test]
    async fn registry_failure_propagates_without_consuming_id() {
        let mut counter = BlockCounter::new();
        let mut registry = RecordingRegistry::failing("registry down");
        let mut emitter = ChartEmitter::new(&mut counter, &mut registry);

        let err = emitter
            .emit(&Variable::new("A"), &Variable::new("X"), &california(), PlaceType::County)
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::Registration(_)));
        assert_eq!(counter.last_issued(), None);
    }

    #[tokio::test]
    async fn chart_log_rejects_duplicates_when_enabled() {
        let chart = ChartDescriptor::scatter(
            Variable::new("A"),
            Variable::new("X"),
            california(),
            PlaceType::County,
            BlockId::new(1),
        );
        let mut again = chart.clone();
        again.block_id = BlockId::new(2);

        let mut deduping = ChartLog::new(true);
        assert!(deduping.register(chart.clone()).await.unwrap());
        assert!(!deduping.register(again.clone()).await.unwrap());
        assert_eq!(deduping.len(), 1);

        let mut permissive = ChartLog::new(false);
        assert!(permissive.register(chart).await.unwrap());
        assert!(permissive.register(again).await.unwrap());
        assert_eq!(permissive.len(), 2);
    }
}
