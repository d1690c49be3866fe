use tableschema_model::{FieldType, default_missing_values};

/// Number of rows sampled when no limit is configured.
pub const DEFAULT_SAMPLE_LIMIT: usize = 100;

/// Candidate types tried against each cell, narrowest first.
pub const DEFAULT_CANDIDATES: [FieldType; 12] = [
    FieldType::Boolean,
    FieldType::Year,
    FieldType::Integer,
    FieldType::GeoPoint,
    FieldType::Number,
    FieldType::YearMonth,
    FieldType::Date,
    FieldType::DateTime,
    FieldType::Time,
    FieldType::Duration,
    FieldType::Array,
    FieldType::Object,
];

/// Which algorithm assigns column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InferStrategy {
    /// Each cell votes for its narrowest matching type; the most voted type wins.
    #[default]
    TypeVoting,
    /// The first cell picks a type, later cells only ever widen it.
    ImplicitCast,
}

/// Options for schema inference.
#[derive(Debug, Clone, PartialEq)]
pub struct InferOptions {
    /// Maximum rows pulled from a source. `None` reads everything.
    /// Defaults to 100.
    pub sample_limit: Option<usize>,

    /// Defaults to [`InferStrategy::TypeVoting`].
    pub strategy: InferStrategy,

    /// Candidate types in priority order. Defaults to [`DEFAULT_CANDIDATES`].
    pub candidates: Vec<FieldType>,

    /// Cells equal to one of these are skipped and also become the inferred
    /// schema's missing values. Defaults to `[""]`.
    pub missing_values: Vec<String>,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            sample_limit: Some(DEFAULT_SAMPLE_LIMIT),
            strategy: InferStrategy::default(),
            candidates: DEFAULT_CANDIDATES.to_vec(),
            missing_values: default_missing_values(),
        }
    }
}

impl InferOptions {
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = Some(limit);
        self
    }

    /// Sample every row of the source.
    pub fn unlimited(mut self) -> Self {
        self.sample_limit = None;
        self
    }

    pub fn with_strategy(mut self, strategy: InferStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Overrides the candidate priority order.
    pub fn with_candidates(mut self, candidates: impl IntoIterator<Item = FieldType>) -> Self {
        self.candidates = candidates.into_iter().collect();
        self
    }

    pub fn with_missing_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_values = values.into_iter().map(Into::into).collect();
        self
    }
}
