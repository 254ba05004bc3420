use saliency_core::metrics::cosine_similarity;
use saliency_core::{Detection, Detections};

/// Best-matching candidate for one reference detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correspondence {
    /// Row index of the candidate within its detection set.
    pub index: usize,
    /// IoU between the reference and candidate boxes.
    pub iou: f32,
    /// Combined score that ranked the candidate.
    pub score: f32,
}

/// Find the candidate that best continues a reference detection.
///
/// A candidate is eligible when its box overlaps the reference at all and
/// the IoU reaches `min_iou`. Eligible candidates are ranked by
/// `IoU * cosine(class scores) * objectness`; the highest score wins and
/// ties keep the earliest row, so the choice is deterministic. `None` means
/// the reference has no continuation in this perturbation.
pub fn best_correspondence(
    reference: &Detection<'_>,
    candidates: &Detections,
    min_iou: f32,
) -> Option<Correspondence> {
    let reference_box = reference.bbox();
    let reference_classes = reference.class_scores();

    let mut best: Option<Correspondence> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let iou = reference_box.iou(&candidate.bbox());
        if iou <= 0.0 || iou < min_iou {
            continue;
        }

        let score =
            iou * cosine_similarity(reference_classes, candidate.class_scores()) * candidate.objectness();
        let better = match &best {
            None => true,
            Some(current) => score > current.score,
        };
        if better {
            best = Some(Correspondence { index, iou, score });
        }
    }
    best
}

/// How much evidence for the reference detection this perturbation removed.
///
/// With a correspondence the drop is
/// `(reference top-class score - candidate score for that class) *
/// candidate objectness * IoU`: a weakened continuation removes some
/// evidence, an identical one removes none, a stronger one can even be
/// negative. A vanished detection removes all of it, so the drop is the
/// reference's full top-class score.
pub fn evidence_drop(reference: &Detection<'_>, candidates: &Detections, min_iou: f32) -> f32 {
    let (top_class, top_score) = reference.top_class();

    let matched = best_correspondence(reference, candidates, min_iou)
        .and_then(|best| candidates.get(best.index).map(|candidate| (best, candidate)));

    match matched {
        Some((best, candidate)) => {
            let same_class = candidate.class_score(top_class).unwrap_or(0.0);
            (top_score - same_class) * candidate.objectness() * best.iou
        }
        None => top_score,
    }
}
