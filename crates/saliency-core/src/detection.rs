use ndarray::{s, Array2, ArrayView1, ArrayView2};
use thiserror::Error;

use crate::bbox::BoundingBox;

/// Number of leading columns before the class scores: box corners plus
/// objectness.
pub const FIXED_COLS: usize = 5;

/// Errors produced when building a [`Detections`] matrix.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// Rows are narrower than the minimal `[x1, y1, x2, y2, objectness,
    /// class_1]` layout.
    #[error("detection rows require at least 6 columns (4 box + objectness + 1 class), found {found}")]
    InvalidWidth {
        /// Number of columns provided.
        found: usize,
    },

    /// Rows of a single detection set disagree on their width.
    #[error("detection row {row} has {found} columns, expected {expected}")]
    InconsistentWidth {
        /// Index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
}

/// A set of detections for one image as a validated `[n, 5 + K]` matrix.
///
/// Every row is `[x1, y1, x2, y2, objectness, class_1..class_K]` with a
/// shared `K >= 1` across the set. Class scores are per-class confidences;
/// objectness is the detector's confidence that the box contains any object
/// at all (use `1.0` when the detector does not report one).
#[derive(Debug, Clone, PartialEq)]
pub struct Detections {
    data: Array2<f32>,
}

impl Detections {
    /// Wrap an existing `[n, 5 + K]` matrix, validating its width.
    pub fn new(data: Array2<f32>) -> Result<Self, DetectionError> {
        if data.ncols() < FIXED_COLS + 1 {
            return Err(DetectionError::InvalidWidth { found: data.ncols() });
        }
        Ok(Self { data })
    }

    /// An empty detection set that still carries its class count.
    ///
    /// Empty sets keep their width so they can participate in aggregation
    /// (an image where the detector found nothing is valid evidence).
    pub fn empty(num_classes: usize) -> Result<Self, DetectionError> {
        Self::new(Array2::zeros((0, FIXED_COLS + num_classes)))
    }

    /// Build a detection set from row vectors.
    ///
    /// All rows must share one width of at least 6. An empty slice is
    /// rejected because it cannot establish a width; use [`Detections::empty`]
    /// for the no-detections case.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, DetectionError> {
        let width = match rows.first() {
            Some(row) => row.len(),
            None => return Err(DetectionError::InvalidWidth { found: 0 }),
        };
        if width < FIXED_COLS + 1 {
            return Err(DetectionError::InvalidWidth { found: width });
        }
        let mut data = Array2::zeros((rows.len(), width));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(DetectionError::InconsistentWidth {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                data[[i, j]] = value;
            }
        }
        Ok(Self { data })
    }

    /// Number of detections in the set.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    /// Whether the set contains no detections.
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Full row width, `5 + K`.
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// Number of class-score columns `K`.
    pub fn num_classes(&self) -> usize {
        self.data.ncols() - FIXED_COLS
    }

    /// Row view for detection `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Detection<'_>> {
        if index < self.len() {
            Some(Detection {
                row: self.data.row(index),
            })
        } else {
            None
        }
    }

    /// Iterate over the detections as row views.
    pub fn iter(&self) -> impl Iterator<Item = Detection<'_>> {
        self.data.outer_iter().map(|row| Detection { row })
    }

    /// Borrow the underlying `[n, 5 + K]` matrix.
    pub fn as_array(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }
}

/// Zero-copy view of one detection row.
#[derive(Debug, Clone, Copy)]
pub struct Detection<'a> {
    row: ArrayView1<'a, f32>,
}

impl Detection<'_> {
    /// The detection's bounding box.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.row[0], self.row[1], self.row[2], self.row[3])
    }

    /// Detector confidence that the box contains an object.
    pub fn objectness(&self) -> f32 {
        self.row[4]
    }

    /// The `K` per-class confidence scores.
    pub fn class_scores(&self) -> ArrayView1<'_, f32> {
        self.row.slice(s![FIXED_COLS..])
    }

    /// Confidence for class `k`, or `None` when `k >= K`.
    pub fn class_score(&self, k: usize) -> Option<f32> {
        self.class_scores().get(k).copied()
    }

    /// Index and score of the highest-confidence class.
    ///
    /// Ties resolve to the lowest class index.
    pub fn top_class(&self) -> (usize, f32) {
        let scores = self.class_scores();
        let mut best = (0, scores[0]);
        for (k, &score) in scores.iter().enumerate().skip(1) {
            if score > best.1 {
                best = (k, score);
            }
        }
        best
    }
}
