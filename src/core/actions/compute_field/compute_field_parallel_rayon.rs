use rayon::prelude::*;

use crate::core::actions::cancellation::{
    CancelToken, Cancelled, NeverCancel, CANCEL_CHECK_INTERVAL_PIXELS,
};
use crate::core::actions::compute_field::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::point::Pixel;
use crate::core::data::progression_field::ProgressionField;
use crate::core::data::viewport_params::ViewportParams;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;

/// Computes the progression field in parallel using rayon's work-stealing scheduler.
///
/// Produces exactly the same field as
/// [`compute_field`](crate::core::actions::compute_field::compute_field::compute_field).
/// For cancel-aware computation, use [`compute_field_parallel_rayon_cancelable`].
#[must_use]
pub fn compute_field_parallel_rayon(params: &ViewportParams) -> ProgressionField {
    let algorithm = MandelbrotAlgorithm::new(*params);

    match generate_field_parallel_rayon_cancelable(
        params.width,
        params.height,
        &algorithm,
        &NeverCancel,
    ) {
        Ok(values) => ProgressionField::from_row_major(params.width, params.height, values),
        Err(Cancelled) => unreachable!("NeverCancel token should never signal cancellation"),
    }
}

/// Computes the progression field in parallel with cancellation support.
///
/// Returns [`Cancelled`] instead of a partial field once `cancel` fires. That
/// is expected control flow, not an error to display.
pub fn compute_field_parallel_rayon_cancelable<C>(
    params: &ViewportParams,
    cancel: &C,
) -> Result<ProgressionField, Cancelled>
where
    C: CancelToken + ?Sized,
{
    let algorithm = MandelbrotAlgorithm::new(*params);
    let values =
        generate_field_parallel_rayon_cancelable(params.width, params.height, &algorithm, cancel)?;

    Ok(ProgressionField::from_row_major(
        params.width,
        params.height,
        values,
    ))
}

/// Cancel-aware parallel generation over any [`FractalAlgorithm`].
///
/// Processes rows in parallel, checking for cancellation at the start of each
/// row and every [`CANCEL_CHECK_INTERVAL_PIXELS`] pixels within a row. Uses
/// rayon's try combinators to abort promptly when cancellation is detected.
///
/// Returns row-major ordered results.
pub fn generate_field_parallel_rayon_cancelable<Alg, C>(
    width: u32,
    height: u32,
    algorithm: &Alg,
    cancel: &C,
) -> Result<Vec<Alg::Output>, Cancelled>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Output: Send,
    C: CancelToken + ?Sized,
{
    let rows: Vec<Vec<Alg::Output>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::with_capacity(width as usize);

            for x in 0..width {
                // Check cancellation at row start (x == 0) and every N pixels
                if x as usize % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
                    return Err(Cancelled);
                }

                row.push(algorithm.compute(Pixel { x, y }));
            }

            Ok(row)
        })
        .collect::<Result<_, Cancelled>>()?;

    let mut values = Vec::with_capacity(width as usize * height as usize);
    for row in rows {
        values.extend(row);
    }

    Ok(values)
}
