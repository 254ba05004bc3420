use ndarray::ArrayView1;

/// Compute the cosine similarity between two class-score vectors.
///
/// The cosine similarity is defined as:
///
/// $ cosine_sim = \frac {a \cdot b} {\left\| a\right\| \cdot \left\| b\right\|} $
///
/// For the non-negative confidence vectors detections carry, the result lies
/// in `[0, 1]`: `1.0` for proportional class profiles, `0.0` for disjoint
/// ones. A zero vector on either side yields `0.0` rather than a NaN.
///
/// Vectors longer than their counterpart are truncated to the shorter length;
/// callers compare vectors of one detection width.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use saliency_core::metrics::cosine_similarity;
///
/// let a = array![0.2, 0.8];
/// let sim = cosine_similarity(a.view(), a.view());
/// assert!((sim - 1.0).abs() < 1e-6);
/// ```
pub fn cosine_similarity(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    let (ab, a2, b2) = a.iter().zip(b.iter()).fold(
        (0f32, 0f32, 0f32),
        |(mut ab, mut a2, mut b2), (x, y)| {
            ab += x * y;
            a2 += x * x;
            b2 += y * y;
            (ab, a2, b2)
        },
    );

    if a2 == 0.0 || b2 == 0.0 {
        0.0
    } else {
        ab / (a2.sqrt() * b2.sqrt())
    }
}
