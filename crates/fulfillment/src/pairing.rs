use crate::emitter::ChartEmitter;
use crate::error::Result;
use crate::services::ChartRegistry;
use nl_detection::{Place, PlaceType, Variable};

/// Pairs main variables with the context variable and emits one chart per pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairSelector;

impl PairSelector {
    /// Every main variable is paired with the first context variable only.
    ///
    /// All pairs are attempted even after one succeeds; the result is true if
    /// any chart was accepted. Returns false when either side is empty.
    pub async fn select_and_emit<R>(
        &self,
        emitter: &mut ChartEmitter<'_, R>,
        place: &Place,
        place_type: PlaceType,
        main_vars: &[Variable],
        context_vars: &[Variable],
    ) -> Result<bool>
    where
        R: ChartRegistry + ?Sized,
    {
        // TODO: consider context variables beyond the most recent survivor.
        let Some(context) = context_vars.first() else {
            return Ok(false);
        };

        let mut found = false;
        for main in main_vars {
            found |= emitter.emit(main, context, place, place_type).await?;
        }
        Ok(found)
    }
}
