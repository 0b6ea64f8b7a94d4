use crate::error::{FulfillmentError, Result};
use crate::services::{ExistenceService, PlaceSampler};
use nl_detection::{Place, PlaceType, Variable};

/// Narrows candidate variables to those with observed data under a place.
pub struct ExistenceFilter<'s, E: ?Sized, S: ?Sized> {
    existence: &'s E,
    sampler: &'s S,
    sample_limit: usize,
}

impl<'s, E, S> ExistenceFilter<'s, E, S>
where
    E: ExistenceService + ?Sized,
    S: PlaceSampler + ?Sized,
{
    pub fn new(existence: &'s E, sampler: &'s S, sample_limit: usize) -> Self {
        Self {
            existence,
            sampler,
            sample_limit,
        }
    }

    /// Representative children of `place` at `place_type`, at most
    /// `sample_limit` of them, in sampler order.
    pub async fn sample_places(&self, place: &Place, place_type: PlaceType) -> Result<Vec<Place>> {
        let mut sample = self
            .sampler
            .sample_children(place, place_type)
            .await
            .map_err(|source| FulfillmentError::Sampling {
                place: place.dcid.clone(),
                source,
            })?;
        sample.truncate(self.sample_limit);
        log::debug!(
            "Sampled {} {} places under {}",
            sample.len(),
            place_type,
            place.dcid
        );
        Ok(sample)
    }

    /// Candidates observed in at least one sampled place, in candidate order.
    ///
    /// Issues at most one existence query; none at all when there is nothing
    /// to ask about.
    pub async fn filter_existing(
        &self,
        sample: &[Place],
        candidates: &[Variable],
    ) -> Result<Vec<Variable>> {
        if sample.is_empty() || candidates.is_empty() {
            return Ok(Vec::new());
        }

        let existing = self
            .existence
            .check(sample, candidates)
            .await
            .map_err(FulfillmentError::ExistenceCheck)?;

        Ok(candidates
            .iter()
            .filter(|v| existing.contains(*v))
            .cloned()
            .collect())
    }
}
