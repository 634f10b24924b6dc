use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use glint_core::Scene;
use glint_renderer::{color_to_rgb, render, tone_map, RenderConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        anyhow::bail!("usage: {} <scene.json> <output.png>", args[0]);
    }
    let scene_path = Path::new(&args[1]);
    let output_path = Path::new(&args[2]);

    let scene = Scene::load(scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?;

    let start = Instant::now();
    let frame = render(&scene, &RenderConfig::default());
    log::info!("rendered in {:.2}s", start.elapsed().as_secs_f32());

    // Tone map and quantize; the frame itself is unclamped linear RGB
    let mut image = image::RgbImage::new(frame.width, frame.height);
    for y in 0..frame.height {
        for x in 0..frame.width {
            let mapped = tone_map(scene.tone_map, scene.camera.exposure, frame.get(x, y));
            image.put_pixel(x, y, image::Rgb(color_to_rgb(mapped)));
        }
    }
    image
        .save(output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    log::info!("wrote {}", output_path.display());

    Ok(())
}
