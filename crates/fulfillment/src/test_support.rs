//! Recording collaborators for unit tests.

use crate::services::{ChartRegistry, ExistenceService, PlaceSampler};
use async_trait::async_trait;
use nl_detection::{ChartDescriptor, Place, PlaceType, Variable};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistenceCall {
    pub places: Vec<String>,
    pub variables: Vec<String>,
}

/// Existence service over a fixed place → observed variables table.
#[derive(Default)]
pub struct RecordingExistence {
    observed: HashMap<String, HashSet<Variable>>,
    failure: Option<String>,
    calls: Mutex<Vec<ExistenceCall>>,
}

impl RecordingExistence {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_observations<'a>(
        mut self,
        place: &str,
        variables: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.observed
            .entry(place.to_string())
            .or_default()
            .extend(variables.into_iter().map(Variable::new));
        self
    }

    pub fn calls(&self) -> Vec<ExistenceCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExistenceService for RecordingExistence {
    async fn check(
        &self,
        places: &[Place],
        variables: &[Variable],
    ) -> anyhow::Result<HashSet<Variable>> {
        self.calls.lock().unwrap().push(ExistenceCall {
            places: places.iter().map(|p| p.dcid.clone()).collect(),
            variables: variables.iter().map(|v| v.dcid().to_string()).collect(),
        });
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(variables
            .iter()
            .filter(|v| {
                places.iter().any(|p| {
                    self.observed
                        .get(&p.dcid)
                        .is_some_and(|vars| vars.contains(*v))
                })
            })
            .cloned()
            .collect())
    }
}

/// Sampler over a fixed (parent, type) → children table.
#[derive(Default)]
pub struct RecordingSampler {
    children: HashMap<(String, PlaceType), Vec<Place>>,
    failure: Option<String>,
    calls: Mutex<Vec<(String, PlaceType)>>,
}

impl RecordingSampler {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_children<'a>(
        mut self,
        parent: &str,
        place_type: PlaceType,
        children: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.children
            .entry((parent.to_string(), place_type))
            .or_default()
            .extend(
                children
                    .into_iter()
                    .map(|dcid| Place::new(dcid, dcid).with_type(place_type)),
            );
        self
    }

    pub fn calls(&self) -> Vec<(String, PlaceType)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceSampler for RecordingSampler {
    async fn sample_children(
        &self,
        place: &Place,
        place_type: PlaceType,
    ) -> anyhow::Result<Vec<Place>> {
        self.calls
            .lock()
            .unwrap()
            .push((place.dcid.clone(), place_type));
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(self
            .children
            .get(&(place.dcid.clone(), place_type))
            .cloned()
            .unwrap_or_default())
    }
}

/// Registry that accepts everything except listed `(main, context)` pairs.
#[derive(Default)]
pub struct RecordingRegistry {
    rejected_pairs: Vec<(String, String)>,
    failure: Option<String>,
    pub attempts: Vec<ChartDescriptor>,
    pub accepted: Vec<ChartDescriptor>,
}

impl RecordingRegistry {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn rejecting(mut self, main: &str, context: &str) -> Self {
        self.rejected_pairs
            .push((main.to_string(), context.to_string()));
        self
    }

    pub fn attempted_pairs(&self) -> Vec<(String, String)> {
        self.attempts
            .iter()
            .map(|c| {
                (
                    c.main_variable().dcid().to_string(),
                    c.context_variable().dcid().to_string(),
                )
            })
            .collect()
    }
}

#[async_trait]
impl ChartRegistry for RecordingRegistry {
    async fn register(&mut self, chart: ChartDescriptor) -> anyhow::Result<bool> {
        self.attempts.push(chart.clone());
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        let pair = (
            chart.main_variable().dcid().to_string(),
            chart.context_variable().dcid().to_string(),
        );
        if self.rejected_pairs.contains(&pair) {
            return Ok(false);
        }
        self.accepted.push(chart);
        Ok(true)
    }
}
