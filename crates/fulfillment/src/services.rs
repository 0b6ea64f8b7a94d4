//! Collaborators the correlation search consumes but does not implement.
//!
//! All calls are awaited one at a time in search order. Implementations own
//! their own retry and timeout policy; an `Err` here aborts the search.

use async_trait::async_trait;
use nl_detection::{ChartDescriptor, Place, PlaceType, Variable};
use std::collections::HashSet;

/// Answers which variables have observed values across a set of places.
#[async_trait]
pub trait ExistenceService: Send + Sync {
    /// Returns the subset of `variables` with at least one observation in any
    /// of `places`. An empty set means "no data", not failure.
    async fn check(
        &self,
        places: &[Place],
        variables: &[Variable],
    ) -> anyhow::Result<HashSet<Variable>>;
}

/// Picks representative children of a place for existence checks.
#[async_trait]
pub trait PlaceSampler: Send + Sync {
    /// Children of `place` having type `place_type`. Must be deterministic for
    /// a given input within one process.
    async fn sample_children(
        &self,
        place: &Place,
        place_type: PlaceType,
    ) -> anyhow::Result<Vec<Place>>;
}

/// Appends charts to a conversation's output.
#[async_trait]
pub trait ChartRegistry: Send {
    /// Returns `Ok(false)` when the chart is rejected (e.g. a duplicate).
    async fn register(&mut self, chart: ChartDescriptor) -> anyhow::Result<bool>;
}
