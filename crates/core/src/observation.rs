use serde::{Deserialize, Serialize};

/// One dated data point of an indicator series.
///
/// `date` is kept as the source rendered it (usually `YYYY-MM-DD`); series
/// are ordered ascending by date and may contain repeated dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: String,
    pub value: f64,
}

impl Observation {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}
