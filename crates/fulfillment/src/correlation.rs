//! Correlation (scatter) chart fulfillment.
//!
//! Search order, outermost first:
//!
//! ```text
//! containment intents (current turn, then history)   stop on first success
//!   └─ places (current turn, then history)           stop on first success
//!        ├─ sample child places of the intent's type
//!        ├─ filter main SVs, then context SVs         either empty => next place
//!        └─ emit (main_i, context_0) for every i      no early stop
//! ```

use crate::config::FulfillmentConfig;
use crate::context::ContextResolver;
use crate::conversation::{BlockCounter, TurnContext};
use crate::emitter::ChartEmitter;
use crate::error::Result;
use crate::existence::ExistenceFilter;
use crate::pairing::PairSelector;
use crate::services::{ChartRegistry, ExistenceService, PlaceSampler};
use nl_detection::{IntentKind, Place, PlaceType, Variable};

/// Candidate variables resolved once per search.
struct Candidates {
    main: Vec<Variable>,
    context: Vec<Variable>,
}

pub struct CorrelationFulfiller<'s, E: ?Sized, S: ?Sized> {
    resolver: ContextResolver,
    filter: ExistenceFilter<'s, E, S>,
    pairs: PairSelector,
}

impl<'s, E, S> CorrelationFulfiller<'s, E, S>
where
    E: ExistenceService + ?Sized,
    S: PlaceSampler + ?Sized,
{
    pub fn new(existence: &'s E, sampler: &'s S, config: &FulfillmentConfig) -> Self {
        Self {
            resolver: ContextResolver::new(config.max_history_turns),
            filter: ExistenceFilter::new(existence, sampler, config.sample_limit),
            pairs: PairSelector,
        }
    }

    /// Tries to add correlation charts for the current turn.
    ///
    /// Returns `Ok(true)` once some (intent, place) combination produced at
    /// least one accepted chart. Collaborator failures abort the search.
    pub async fn populate<R>(
        &self,
        ctx: TurnContext<'_>,
        counter: &mut BlockCounter,
        registry: &mut R,
    ) -> Result<bool>
    where
        R: ChartRegistry + ?Sized,
    {
        let intents = self.resolver.intents_of_kind(&ctx, IntentKind::ContainedIn);
        log::info!(
            "Correlation considering {} containment intent(s)",
            intents.len()
        );
        if intents.is_empty() {
            return Ok(false);
        }

        let candidates = Candidates {
            main: self.resolver.main_variables(&ctx).into_iter().cloned().collect(),
            context: self
                .resolver
                .context_variables(&ctx)
                .into_iter()
                .cloned()
                .collect(),
        };
        let places = self.resolver.places(&ctx);
        let mut emitter = ChartEmitter::new(counter, registry);

        for intent in intents {
            let Some(place_type) = intent.contained_place_type() else {
                log::debug!("Skipping containment intent without a place type");
                continue;
            };
            if self
                .populate_for_place_type(&places, place_type, &candidates, &mut emitter)
                .await?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn populate_for_place_type<R>(
        &self,
        places: &[&Place],
        place_type: PlaceType,
        candidates: &Candidates,
        emitter: &mut ChartEmitter<'_, R>,
    ) -> Result<bool>
    where
        R: ChartRegistry + ?Sized,
    {
        for place in places {
            if self
                .populate_for_place(place, place_type, candidates, emitter)
                .await?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn populate_for_place<R>(
        &self,
        place: &Place,
        place_type: PlaceType,
        candidates: &Candidates,
        emitter: &mut ChartEmitter<'_, R>,
    ) -> Result<bool>
    where
        R: ChartRegistry + ?Sized,
    {
        let sample = self.filter.sample_places(place, place_type).await?;

        let main_vars = self.filter.filter_existing(&sample, &candidates.main).await?;
        if main_vars.is_empty() {
            log::info!("Correlation found no Main SV for {place} ({place_type})");
            return Ok(false);
        }

        let context_vars = self
            .filter
            .filter_existing(&sample, &candidates.context)
            .await?;
        if context_vars.is_empty() {
            log::info!("Correlation found no Context SV for {place} ({place_type})");
            return Ok(false);
        }

        log::info!("Correlation Main SVs: {}", join(&main_vars));
        log::info!("Correlation Context SVs: {}", join(&context_vars));

        self.pairs
            .select_and_emit(emitter, place, place_type, &main_vars, &context_vars)
            .await
    }
}

fn join(vars: &[Variable]) -> String {
    vars.iter()
        .map(Variable::dcid)
        .collect::<Vec<_>>()
        .join(", ")
}
