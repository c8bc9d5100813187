use std::fmt;
use std::time::Duration;

use crate::core::data::progression_field::ProgressionField;
use crate::core::data::viewport_params::ViewportParams;

/// A finished field for the latest submitted parameters.
#[derive(Debug)]
pub struct FieldDelivery {
    pub generation: u64,
    pub params: ViewportParams,
    pub field: ProgressionField,
    pub compute_duration: Duration,
}

/// The latest computation could not produce a field.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeFailure {
    pub generation: u64,
    pub params: ViewportParams,
    pub message: String,
}

impl fmt::Display for ComputeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "computation {} failed: {}",
            self.generation, self.message
        )
    }
}

impl std::error::Error for ComputeFailure {}
