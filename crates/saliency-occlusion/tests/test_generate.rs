use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use saliency_core::Detections;
use saliency_occlusion::{
    DetectionOcclusionSaliency, DetectionSaliencyMapGenerator, SaliencyError,
    ScalarOcclusionSaliency, ScalarSaliencyMapGenerator,
};
use saliency_plugin::Plugin;

fn random_inputs(seed: u64) -> (Array3<bool>, Array1<f32>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut masks = Array3::from_elem((16, 8, 8), true);
    for keep in masks.iter_mut() {
        *keep = rng.random_bool(0.5);
    }
    let scores = Array1::from_iter((0..16).map(|_| rng.random_range(-1.0..1.0)));
    (masks, scores)
}

#[test]
fn maps_stay_in_unit_range() -> Result<(), SaliencyError> {
    let generator = ScalarOcclusionSaliency::new();
    for seed in 0..8 {
        let (masks, scores) = random_inputs(seed);
        let map = generator.generate(masks.view(), scores.view())?;
        assert_eq!(map.dim(), (8, 8));
        assert!(map.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!(map.iter().all(|v| v.is_finite()));
    }
    Ok(())
}

#[test]
fn nothing_occluded_means_nothing_salient() -> Result<(), SaliencyError> {
    let masks = Array3::from_elem((4, 6, 6), true);
    let scores = Array1::from_elem(4, 0.8f32);
    let map = ScalarOcclusionSaliency::new().generate(masks.view(), scores.view())?;
    assert!(map.iter().all(|&v| v == 0.0));
    Ok(())
}

#[test]
fn constant_scores_collapse_to_zero() -> Result<(), SaliencyError> {
    // every pixel occluded by every mask, identical scores: no contrast
    let masks = Array3::from_elem((3, 5, 5), false);
    let scores = Array1::from_elem(3, 0.4f32);
    let map = ScalarOcclusionSaliency::new().generate(masks.view(), scores.view())?;
    assert!(map.iter().all(|&v| v == 0.0));
    Ok(())
}

#[test]
fn single_pixel_occlusion_concentrates_saliency() -> Result<(), SaliencyError> {
    // one mask occludes everything, a second spares all but one pixel;
    // the score stays high only when pixel (2, 3) is the occluded one
    let mut masks = Array3::from_elem((2, 5, 5), false);
    for y in 0..5 {
        for x in 0..5 {
            masks[[1, y, x]] = y != 2 || x != 3;
        }
    }
    let scores = Array1::from_vec(vec![0.1f32, 0.9]);

    let map = ScalarOcclusionSaliency::new().generate(masks.view(), scores.view())?;
    assert_eq!(map[[2, 3]], 1.0);
    for ((y, x), &value) in map.indexed_iter() {
        if (y, x) != (2, 3) {
            assert!(value < 1.0, "pixel ({y}, {x}) should not be maximal");
        }
    }
    Ok(())
}

#[test]
fn repeat_calls_are_bit_identical() -> Result<(), SaliencyError> {
    let (masks, scores) = random_inputs(42);
    let generator = ScalarOcclusionSaliency::new();
    let first = generator.generate(masks.view(), scores.view())?;
    let second = generator.generate(masks.view(), scores.view())?;
    assert_eq!(first, second);

    let reference = detections(&[(0.0, 0.0, 4.0, 4.0, 0.9), (4.0, 4.0, 8.0, 8.0, 0.7)]);
    let perturbed: Vec<Detections> = (0..16)
        .map(|i| {
            if i % 3 == 0 {
                Detections::empty(2).unwrap()
            } else {
                reference.clone()
            }
        })
        .collect();
    let generator = DetectionOcclusionSaliency::new();
    let first = generator.generate(&reference, &perturbed, masks.view())?;
    let second = generator.generate(&reference, &perturbed, masks.view())?;
    assert_eq!(first, second);
    Ok(())
}

fn detections(boxes: &[(f32, f32, f32, f32, f32)]) -> Detections {
    let rows: Vec<Vec<f32>> = boxes
        .iter()
        .map(|&(x1, y1, x2, y2, confidence)| vec![x1, y1, x2, y2, 1.0, confidence, 0.05])
        .collect();
    Detections::from_rows(&rows).unwrap()
}

#[test]
fn per_reference_maps_are_independent() -> Result<(), SaliencyError> {
    // two objects in opposite corners of an 8x8 image
    let reference = detections(&[(0.0, 0.0, 4.0, 4.0, 0.9), (4.0, 4.0, 8.0, 8.0, 0.7)]);

    // mask 0 occludes the top-left quadrant, mask 1 the bottom-right
    let mut masks = Array3::from_elem((2, 8, 8), true);
    for y in 0..4 {
        for x in 0..4 {
            masks[[0, y, x]] = false;
            masks[[1, y + 4, x + 4]] = false;
        }
    }

    // occluding a corner removes exactly the detection living there
    let only_second = detections(&[(4.0, 4.0, 8.0, 8.0, 0.7)]);
    let only_first = detections(&[(0.0, 0.0, 4.0, 4.0, 0.9)]);
    let perturbed = vec![only_second, only_first];

    let maps = DetectionOcclusionSaliency::new().generate(&reference, &perturbed, masks.view())?;
    assert_eq!(maps.dim(), (2, 8, 8));

    // first object: the top-left occlusion removed it
    assert_eq!(maps[[0, 0, 0]], 1.0);
    assert_eq!(maps[[0, 7, 7]], 0.0);
    // second object: the bottom-right occlusion removed it
    assert_eq!(maps[[1, 7, 7]], 1.0);
    assert_eq!(maps[[1, 0, 0]], 0.0);
    Ok(())
}

#[test]
fn error_taxonomy_is_stable() {
    let generator = ScalarOcclusionSaliency::new();

    let empty_masks = Array3::<bool>::from_elem((0, 4, 4), true);
    let no_scores = Array1::<f32>::zeros(0);
    assert!(matches!(
        generator.generate(empty_masks.view(), no_scores.view()),
        Err(SaliencyError::InsufficientEvidence)
    ));

    // zero masks win over the length comparison
    let stray_scores = Array1::from_elem(3, 0.5f32);
    assert!(matches!(
        generator.generate(empty_masks.view(), stray_scores.view()),
        Err(SaliencyError::InsufficientEvidence)
    ));

    let masks = Array3::from_elem((2, 4, 4), false);
    assert!(matches!(
        generator.generate(masks.view(), stray_scores.view()),
        Err(SaliencyError::ShapeMismatch { .. })
    ));
}

struct CountingScalar {
    calls: AtomicUsize,
}

impl Plugin for CountingScalar {
    fn name(&self) -> &'static str {
        "counting-scalar"
    }
}

impl ScalarSaliencyMapGenerator for CountingScalar {
    fn generate(
        &self,
        _masks: ArrayView3<'_, bool>,
        _scores: ArrayView1<'_, f32>,
    ) -> Result<Array2<f32>, SaliencyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Array2::zeros((1, 1)))
    }
}

struct CountingDetection {
    calls: AtomicUsize,
}

impl Plugin for CountingDetection {
    fn name(&self) -> &'static str {
        "counting-detection"
    }
}

impl DetectionSaliencyMapGenerator for CountingDetection {
    fn generate(
        &self,
        _reference: &Detections,
        _perturbed: &[Detections],
        _masks: ArrayView3<'_, bool>,
    ) -> Result<Array3<f32>, SaliencyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Array3::zeros((0, 1, 1)))
    }
}

#[test]
fn call_invokes_generate_exactly_once() -> Result<(), SaliencyError> {
    let scalar = CountingScalar {
        calls: AtomicUsize::new(0),
    };
    let masks = Array3::from_elem((1, 1, 1), false);
    let scores = Array1::from_elem(1, 1.0f32);
    scalar.call(masks.view(), scores.view())?;
    assert_eq!(scalar.calls.load(Ordering::SeqCst), 1);

    let detection = CountingDetection {
        calls: AtomicUsize::new(0),
    };
    let reference = Detections::empty(1).unwrap();
    detection.call(&reference, &[Detections::empty(1).unwrap()], masks.view())?;
    assert_eq!(detection.calls.load(Ordering::SeqCst), 1);
    Ok(())
}
