use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::data::progression_field::ProgressionField;
use crate::core::data::viewport_params::ViewportParams;

/// Computes a whole progression field for one viewport snapshot.
///
/// Implementations should poll `cancel` and give up with [`Cancelled`] once it
/// fires. Ignoring it is allowed; the caller then discards the late result.
pub trait FieldComputer: Send + Sync {
    fn compute(
        &self,
        params: &ViewportParams,
        cancel: &dyn CancelToken,
    ) -> Result<ProgressionField, Cancelled>;
}
