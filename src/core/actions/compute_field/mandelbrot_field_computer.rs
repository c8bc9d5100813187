use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::compute_field::compute_field_parallel_rayon::compute_field_parallel_rayon_cancelable;
use crate::core::actions::compute_field::ports::field_computer::FieldComputer;
use crate::core::data::progression_field::ProgressionField;
use crate::core::data::viewport_params::ViewportParams;

/// Default [`FieldComputer`]: the escape-time evaluator spread over rayon's pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct MandelbrotFieldComputer;

impl FieldComputer for MandelbrotFieldComputer {
    fn compute(
        &self,
        params: &ViewportParams,
        cancel: &dyn CancelToken,
    ) -> Result<ProgressionField, Cancelled> {
        compute_field_parallel_rayon_cancelable(params, cancel)
    }
}
