use anyhow::{Context, Result};
use nl_detection::{ChartDescriptor, Turn, Variable};
use nl_fulfillment::{
    Conversation, CorrelationFulfiller, FulfillmentConfig, InMemoryDataStore, PlaceRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A recorded conversation plus the data the collaborators should answer from.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Oldest first; the last turn is the one being fulfilled
    pub turns: Vec<Turn>,

    /// Containment graph used for child sampling
    #[serde(default)]
    pub places: Vec<PlaceRecord>,

    /// Place dcid -> variables with at least one observation there
    #[serde(default)]
    pub observations: BTreeMap<String, Vec<Variable>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub found: bool,
    pub charts: Vec<ChartDescriptor>,
}

impl Scenario {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(raw).context("invalid scenario JSON")?;
        if scenario.turns.is_empty() {
            anyhow::bail!("scenario must contain at least one turn");
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("in {}", path.display()))
    }
}

/// Replays the scenario's turns and runs correlation fulfillment on the last one.
pub async fn run_scenario(scenario: Scenario, config: &FulfillmentConfig) -> Result<ScenarioOutcome> {
    let store = InMemoryDataStore::from_records(scenario.places, scenario.observations);
    log::debug!("Loaded {} places into the in-memory store", store.place_count());

    let fulfiller = CorrelationFulfiller::new(&store, &store, config);
    let mut conversation = Conversation::from_config(config);
    for turn in scenario.turns {
        conversation.push_turn(turn);
    }

    let found = conversation
        .fulfill_correlation(&fulfiller)
        .await
        .context("correlation fulfillment failed")?;
    log::info!(
        "Correlation fulfillment {} ({} chart(s))",
        if found { "succeeded" } else { "found nothing" },
        conversation.charts().len()
    );

    Ok(ScenarioOutcome {
        found,
        charts: conversation.charts().to_vec(),
    })
}
