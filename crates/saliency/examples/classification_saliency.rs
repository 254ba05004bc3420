use argh::FromArgs;
use ndarray::{s, Array1, Array2, Array3, ArrayView3};

use saliency::plugin::PluginDescription;
use saliency::Plugins;

/// Explains a toy classifier with occlusion saliency
#[derive(Debug, FromArgs)]
struct Args {
    /// image side length in pixels
    #[argh(option, default = "32")]
    side: usize,

    /// perturbation strategy: sliding-window or random-grid
    #[argh(option, default = "String::from(\"sliding-window\")")]
    strategy: String,

    /// occluder side length for sliding-window
    #[argh(option, default = "8")]
    window: usize,

    /// occluder stride for sliding-window
    #[argh(option, default = "4")]
    stride: usize,

    /// number of masks for random-grid
    #[argh(option, default = "512")]
    masks: u64,

    /// rng seed for random-grid
    #[argh(option, default = "7")]
    seed: u64,
}

/// Mean brightness over the region the classifier was trained on.
fn confidence(image: &ArrayView3<'_, f32>, region: std::ops::Range<usize>) -> f32 {
    let patch = image.slice(s![region.clone(), region, ..]);
    patch.iter().sum::<f32>() / patch.len() as f32
}

fn render(map: &Array2<f32>) {
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

    // the "object" lives in the second quarter of the image
    let object = args.side / 4..args.side / 2;
    let mut image = Array3::from_elem((args.side, args.side, 1), 0.1f32);
    image.slice_mut(s![object.clone(), object.clone(), ..]).fill(1.0);

    // describe the perturber the same way a config file would
    let description = match args.strategy.as_str() {
        "sliding-window" => PluginDescription::named("sliding-window")
            .with_option("window_width", args.window as u64)
            .with_option("window_height", args.window as u64)
            .with_option("stride_width", args.stride as u64)
            .with_option("stride_height", args.stride as u64),
        "random-grid" => PluginDescription::named("random-grid")
            .with_option("num_masks", args.masks)
            .with_option("seed", args.seed),
        other => return Err(format!("unknown strategy: {}", other).into()),
    };
    let perturber = plugins.perturbers.create(&description)?;

    // occlude, then re-query the classifier for each occluded image
    let (occluded, masks) = perturber.augment(&image.view(), 0.0)?;
    let reference = confidence(&image.view(), object.clone());
    let drops: Array1<f32> = occluded
        .iter()
        .map(|img| reference - confidence(&img.view(), object.clone()))
        .collect();

    let generator = plugins.scalar_generators.create_default("scalar-occlusion")?;
    let map = generator.generate(masks.view(), drops.view())?;

    println!(
        "{} masks from `{}`, reference confidence {:.3}",
        masks.dim().0,
        description.name,
        reference
    );
    render(&map);

    let (peak, value) = map
        .indexed_iter()
        .fold(((0, 0), f32::MIN), |best, (index, &v)| {
            if v > best.1 {
                (index, v)
            } else {
                best
            }
        });
    println!("peak saliency {:.3} at (row {}, col {})", value, peak.0, peak.1);

    Ok(())
}
