use crate::services::{ExistenceService, PlaceSampler};
use async_trait::async_trait;
use nl_detection::{Place, PlaceType, Variable};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// A place and the parents it is directly contained in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub dcid: String,
    pub name: String,
    #[serde(default)]
    pub place_type: Option<PlaceType>,
    #[serde(default)]
    pub contained_in: Vec<String>,
}

/// Containment graph plus observation table, serving both existence checks
/// and child sampling.
///
/// Sampling walks descendants breadth-first in insertion order, so results
/// are stable for a given store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataStore {
    places: HashMap<String, Place>,
    children: HashMap<String, Vec<String>>,
    observed: HashMap<String, HashSet<Variable>>,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(
        records: impl IntoIterator<Item = PlaceRecord>,
        observations: impl IntoIterator<Item = (String, Vec<Variable>)>,
    ) -> Self {
        let mut store = Self::new();
        for record in records {
            store.add_record(record);
        }
        for (dcid, variables) in observations {
            store.add_observations(&dcid, variables);
        }
        store
    }

    pub fn add_record(&mut self, record: PlaceRecord) {
        let mut place = Place::new(record.dcid.clone(), record.name);
        place.place_type = record.place_type;
        for parent in record.contained_in {
            let siblings = self.children.entry(parent).or_default();
            if !siblings.contains(&record.dcid) {
                siblings.push(record.dcid.clone());
            }
        }
        self.places.insert(record.dcid, place);
    }

    pub fn add_observations(
        &mut self,
        place_dcid: &str,
        variables: impl IntoIterator<Item = Variable>,
    ) {
        self.observed
            .entry(place_dcid.to_string())
            .or_default()
            .extend(variables);
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    /// Descendants of `root` whose type is `place_type`, nearest first.
    pub fn descendants_of_type(&self, root: &str, place_type: PlaceType) -> Vec<Place> {
        let mut out = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        visited.insert(root);
        queue.push_back(root);

        while let Some(current) = queue.pop_front() {
            let Some(children) = self.children.get(current) else {
                continue;
            };
            for child in children {
                if !visited.insert(child.as_str()) {
                    continue;
                }
                if let Some(place) = self.places.get(child) {
                    if place.place_type == Some(place_type) {
                        out.push(place.clone());
                    }
                }
                queue.push_back(child.as_str());
            }
        }
        out
    }

    fn has_observations(&self, place_dcid: &str, variable: &Variable) -> bool {
        self.observed
            .get(place_dcid)
            .is_some_and(|vars| vars.contains(variable))
    }
}

#[async_trait]
impl ExistenceService for InMemoryDataStore {
    async fn check(
        &self,
        places: &[Place],
        variables: &[Variable],
    ) -> anyhow::Result<HashSet<Variable>> {
        Ok(variables
            .iter()
            .filter(|v| places.iter().any(|p| self.has_observations(&p.dcid, v)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PlaceSampler for InMemoryDataStore {
    async fn sample_children(
        &self,
        place: &Place,
        place_type: PlaceType,
    ) -> anyhow::Result<Vec<Place>> {
        Ok(self.descendants_of_type(&place.dcid, place_type))
    }
}
