//! # NL Fulfillment
//!
//! Correlation-chart fulfillment for multi-turn natural-language queries:
//! resolve a pair of variables and a place scope that can be plotted against
//! each other, using the current turn and falling back to conversation history.
//!
//! ## Architecture
//!
//! ```text
//! Conversation (turns + block counter + chart log)
//!     │
//!     └──> CorrelationFulfiller
//!            ├─ ContextResolver   intents / places / variables, newest first
//!            ├─ ExistenceFilter   sample child places, keep SVs with data
//!            ├─ PairSelector      every main SV x first context SV
//!            └─ ChartEmitter      block id + scatter descriptor -> ChartRegistry
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use nl_detection::{Intent, Place, PlaceType, Turn};
//! use nl_fulfillment::{Conversation, CorrelationFulfiller, FulfillmentConfig, InMemoryDataStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = InMemoryDataStore::new();
//!     let config = FulfillmentConfig::default();
//!     let fulfiller = CorrelationFulfiller::new(&store, &store, &config);
//!
//!     let mut conversation = Conversation::from_config(&config);
//!     conversation.push_turn(Turn::new("median income").with_variables(["Median_Income"]));
//!     conversation.push_turn(
//!         Turn::new("vs population in california counties")
//!             .with_places([Place::new("geoId/06", "California")])
//!             .with_variables(["Count_Person"])
//!             .with_intent(Intent::ContainedIn { place_type: Some(PlaceType::County) }),
//!     );
//!
//!     if conversation.fulfill_correlation(&fulfiller).await? {
//!         println!("{} chart(s)", conversation.charts().len());
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod context;
mod conversation;
mod correlation;
mod emitter;
mod error;
mod existence;
mod memory;
mod pairing;
mod services;
#[cfg(test)]
mod test_support;

pub use config::{FulfillmentConfig, CONFIG_SCHEMA_VERSION, DEFAULT_SAMPLE_LIMIT, SAMPLE_LIMIT_ENV};
pub use context::ContextResolver;
pub use conversation::{BlockCounter, Conversation, TurnContext};
pub use correlation::CorrelationFulfiller;
pub use emitter::{ChartEmitter, ChartLog};
pub use error::{FulfillmentError, Result};
pub use existence::ExistenceFilter;
pub use memory::{InMemoryDataStore, PlaceRecord};
pub use pairing::PairSelector;
pub use services::{ChartRegistry, ExistenceService, PlaceSampler};
