//! # NL Detection
//!
//! Data model shared by the fulfillment pipeline: what an upstream classifier
//! detected in each conversational turn, and what a fulfillment handler emits.
//!
//! ## Architecture
//!
//! ```text
//! Turn
//!     │
//!     ├──> places     (Place: dcid + display name)
//!     ├──> variables  (Variable: stat var / topic / peer group)
//!     └──> intents    (Intent: ContainedIn, Ranking, Comparison, ...)
//!
//! ChartDescriptor
//!     └──> kind + [main, context] variables + place scope + block id
//! ```

mod chart;
mod error;
mod intent;
mod place;
mod turn;
mod variable;

pub use chart::{BlockId, ChartDescriptor, ChartKind, ChartOrigin};
pub use error::{DetectionError, Result};
pub use intent::{Intent, IntentKind, TimeDeltaDirection};
pub use place::{Place, PlaceType};
pub use turn::Turn;
pub use variable::{Variable, VariableKind};
