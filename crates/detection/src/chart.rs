use crate::place::{Place, PlaceType};
use crate::variable::Variable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visualization a chart descriptor asks the frontend to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Two variables plotted against each other across child places
    Scatter,
}

/// Whether a chart answers the query directly or was derived from context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartOrigin {
    Primary,
    Secondary,
}

/// Groups chart descriptors in emission order within one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(u32);

impl BlockId {
    pub const FIRST: BlockId = BlockId(1);

    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully specified chart, created once and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub kind: ChartKind,

    /// `[main, context]`
    pub variables: [Variable; 2],

    /// Parent place whose children are plotted
    pub place: Place,

    /// Type of the child places being plotted
    pub place_type: PlaceType,

    pub origin: ChartOrigin,

    pub include_per_capita: bool,

    pub block_id: BlockId,
}

impl ChartDescriptor {
    /// Primary scatter of `main` against `context` over children of `place`.
    pub fn scatter(
        main: Variable,
        context: Variable,
        place: Place,
        place_type: PlaceType,
        block_id: BlockId,
    ) -> Self {
        Self {
            kind: ChartKind::Scatter,
            variables: [main, context],
            place,
            place_type,
            origin: ChartOrigin::Primary,
            include_per_capita: false,
            block_id,
        }
    }

    pub fn main_variable(&self) -> &Variable {
        &self.variables[0]
    }

    pub fn context_variable(&self) -> &Variable {
        &self.variables[1]
    }

    /// Same visualization regardless of block id and origin.
    pub fn shows_same_data(&self, other: &ChartDescriptor) -> bool {
        self.kind == other.kind
            && self.variables == other.variables
            && self.place.dcid == other.place.dcid
            && self.place_type == other.place_type
            && self.include_per_capita == other.include_per_capita
    }
}
