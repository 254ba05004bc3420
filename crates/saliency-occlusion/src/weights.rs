use ndarray::{s, Array2, ArrayView1, ArrayView3, ArrayViewMut2, Axis};
use num_traits::Float;
use rayon::prelude::*;

use crate::error::SaliencyError;

/// Average per-pixel evidence over the masks that occluded each pixel.
///
/// For every pixel `p` the result is
/// `sum_i (1 - mask_i[p]) * score_i / sum_i (1 - mask_i[p])`: the mean score
/// observed while `p` was occluded. Pixels no mask ever occluded carry no
/// evidence and come out as exactly zero.
///
/// The result is the raw weighted mean; generators follow it with
/// [`normalize_unit_range`].
///
/// # Arguments
///
/// * `masks` - Preservation masks with shape (N, H, W), `true` = preserved.
/// * `scores` - One evidence value per mask, length N.
///
/// # Errors
///
/// [`SaliencyError::InsufficientEvidence`] when N is zero and
/// [`SaliencyError::ShapeMismatch`] when `scores` does not have length N.
pub fn occlusion_weighted_mean<T>(
    masks: &ArrayView3<'_, bool>,
    scores: ArrayView1<'_, T>,
) -> Result<Array2<T>, SaliencyError>
where
    T: Float + Send + Sync,
{
    let (num_masks, height, width) = masks.dim();
    if num_masks == 0 {
        return Err(SaliencyError::InsufficientEvidence);
    }
    if scores.len() != num_masks {
        return Err(SaliencyError::ShapeMismatch {
            context: "perturbation scores",
            expected: num_masks.to_string(),
            found: scores.len().to_string(),
        });
    }

    let mut map = Array2::zeros((height, width));
    weighted_mean_into(masks, scores, &mut map.view_mut());
    Ok(map)
}

/// Shape-checked core of [`occlusion_weighted_mean`], writing into `map`.
///
/// Rows are independent and processed in parallel; within a row the masks
/// accumulate in index order, so results are identical to a serial pass.
pub(crate) fn weighted_mean_into<T>(
    masks: &ArrayView3<'_, bool>,
    scores: ArrayView1<'_, T>,
    map: &mut ArrayViewMut2<'_, T>,
) where
    T: Float + Send + Sync,
{
    let (num_masks, _height, width) = masks.dim();

    map.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            let mut numerator = vec![T::zero(); width];
            let mut denominator = vec![T::zero(); width];

            for i in 0..num_masks {
                let score = scores[i];
                let mask_row = masks.slice(s![i, y, ..]);
                for (x, &keep) in mask_row.iter().enumerate() {
                    if !keep {
                        numerator[x] = numerator[x] + score;
                        denominator[x] = denominator[x] + T::one();
                    }
                }
            }

            for (x, value) in row.iter_mut().enumerate() {
                *value = if denominator[x] > T::zero() {
                    numerator[x] / denominator[x]
                } else {
                    T::zero()
                };
            }
        });
}

/// Normalize a map to `[0, 1]` in place.
///
/// Applies `(value - min) / (max - min)`. Constant maps carry no contrast
/// and collapse to all-zero instead of dividing by zero; the same holds for
/// empty maps.
pub fn normalize_unit_range<T>(map: &mut ArrayViewMut2<'_, T>)
where
    T: Float,
{
    let mut min = T::infinity();
    let mut max = T::neg_infinity();
    for &value in map.iter() {
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }

    let range = max - min;
    if range > T::zero() {
        map.mapv_inplace(|value| (value - min) / range);
    } else {
        map.fill(T::zero());
    }
}
