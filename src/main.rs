use anyhow::{Context, bail};
use samosa_vision::core_modules::utils::image_io;
use samosa_vision::logger;
use samosa_vision::pipeline::{CalibrationFactor, DetectionPipeline, PipelineConfig, Report};
use std::env;
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    logger::init();

    // --- 1. Argument Parsing & Setup ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: samosa_vision <input_image> [output_image] [pixels_per_unit]");
        return Ok(());
    }
    let input_path = Path::new(&args[1]);
    let output_path = args.get(2).map(Path::new);
    let pixels_per_unit = match args.get(3) {
        Some(raw) => {
            let value: f64 = raw
                .parse()
                .context("pixels_per_unit must be a positive number")?;
            Some(CalibrationFactor::new(value)?)
        }
        None => None,
    };

    // --- 2. Image Loading ---
    let raster = image_io::load_image(input_path)?;

    // --- 3. Pipeline Initialization & Analysis ---
    let config = PipelineConfig {
        scanner: Default::default(),
        pixels_per_unit,
    };
    let mut pipeline = DetectionPipeline::new(config);
    pipeline.load_image(raster);
    let report = pipeline.analyze()?;

    // --- 4. Reporting ---
    match &report {
        Report::SamosaDetected(data) => {
            info!("Samosa pixel area: {} pixels", data.samosa_pixels);
            info!("Samosa coverage: {:.1}%", data.coverage_percentage);
            match data.physical_area {
                Some(area) => info!("Estimated physical area: {:.2} square units", area),
                None => info!("Estimated physical area: not calibrated"),
            }
        }
        Report::NoSamosaDetected => info!("No samosa detected in the image."),
    }

    // --- 5. Visualization Output ---
    if let Some(output_path) = output_path {
        match pipeline.processed_image() {
            Some(processed) => image_io::save_image(output_path, processed)?,
            None => bail!("no processed image available"),
        }
    }

    Ok(())
}
