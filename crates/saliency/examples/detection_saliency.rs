use argh::FromArgs;
use ndarray::{s, Array3, ArrayView2, ArrayView3, Axis};

use saliency::core::{DetectionError, Detections};
use saliency::perturb::{occlude, ImageSize};
use saliency::plugin::PluginDescription;
use saliency::Plugins;

/// Explains a toy two-anchor detector with occlusion saliency
#[derive(Debug, FromArgs)]
struct Args {
    /// image side length in pixels
    #[argh(option, default = "32")]
    side: usize,

    /// occluder side length
    #[argh(option, default = "8")]
    window: usize,

    /// occluder stride
    #[argh(option, default = "4")]
    stride: usize,

    /// minimum IoU for matching perturbed detections
    #[argh(option, default = "0.25")]
    min_iou: f64,
}

struct Anchor {
    x1: usize,
    y1: usize,
    x2: usize,
    y2: usize,
    class: usize,
}

/// Anchor-based toy detector: one candidate box per known location, kept when
/// its patch is still bright enough.
fn detect(
    image: &ArrayView3<'_, f32>,
    anchors: &[Anchor],
) -> Result<Detections, DetectionError> {
    let mut rows = Vec::new();
    for anchor in anchors {
        let patch = image.slice(s![anchor.y1..anchor.y2, anchor.x1..anchor.x2, ..]);
        let brightness = patch.iter().sum::<f32>() / patch.len() as f32;
        if brightness < 0.3 {
            continue;
        }
        let mut class_scores = [0.05f32; 2];
        class_scores[anchor.class] = brightness;
        rows.push(vec![
            anchor.x1 as f32,
            anchor.y1 as f32,
            anchor.x2 as f32,
            anchor.y2 as f32,
            brightness,
            class_scores[0],
            class_scores[1],
        ]);
    }
    match rows.is_empty() {
        true => Detections::empty(2),
        false => Detections::from_rows(&rows),
    }
}

fn render(map: &ArrayView2<'_, f32>) {
    const RAMP: &[u8] = b" .:-=+*#%@";
    for row in map.rows() {
        let line: String = row
            .iter()
            .map(|&v| RAMP[((v * 9.0).round() as usize).min(9)] as char)
            .collect();
        println!("{}", line);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let plugins = Plugins::with_defaults()?;

    // two bright squares, one per quadrant diagonal
    let quarter = args.side / 4;
    let anchors = [
        Anchor {
            x1: quarter,
            y1: quarter,
            x2: 2 * quarter,
            y2: 2 * quarter,
            class: 0,
        },
        Anchor {
            x1: 2 * quarter,
            y1: 2 * quarter,
            x2: 3 * quarter,
            y2: 3 * quarter,
            class: 1,
        },
    ];
    let mut image = Array3::from_elem((args.side, args.side, 1), 0.1f32);
    for anchor in &anchors {
        image
            .slice_mut(s![anchor.y1..anchor.y2, anchor.x1..anchor.x2, ..])
            .fill(1.0);
    }

    let reference = detect(&image.view(), &anchors)?;
    println!("reference detections: {}", reference.len());

    let perturber = plugins.perturbers.create(
        &PluginDescription::named("sliding-window")
            .with_option("window_width", args.window as u64)
            .with_option("window_height", args.window as u64)
            .with_option("stride_width", args.stride as u64)
            .with_option("stride_height", args.stride as u64),
    )?;
    let masks = perturber.masks(ImageSize {
        width: args.side,
        height: args.side,
    })?;

    // re-run the detector on every occluded image
    let mut perturbed = Vec::with_capacity(masks.dim().0);
    for mask in masks.axis_iter(Axis(0)) {
        let occluded_image = occlude(&image.view(), &mask, 0.0)?;
        perturbed.push(detect(&occluded_image.view(), &anchors)?);
    }

    let generator = plugins.detection_generators.create(
        &PluginDescription::named("detection-occlusion").with_option("min_iou", args.min_iou),
    )?;
    let maps = generator.generate(&reference, &perturbed, masks.view())?;

    for (index, map) in maps.axis_iter(Axis(0)).enumerate() {
        let (class, score) = reference
            .get(index)
            .map(|d| d.top_class())
            .unwrap_or((0, 0.0));
        println!("\nobject {} (class {}, score {:.2}):", index, class, score);
        render(&map);
    }

    Ok(())
}
