use clap::Parser;
use log::{error, info};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use prismray::output::{save_image_as_exr, save_image_as_png, save_image_as_ppm};
use prismray::parser::load_scene;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!("PrismRay - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let scene = match load_scene(&args.scene) {
        Ok(scene) => scene,
        Err(e) => {
            error!("Failed to decode scene '{}': {}", args.scene, e);
            std::process::exit(1);
        }
    };

    info!(
        "Image resolution: {}x{}, {} primitives",
        scene.width,
        scene.height,
        scene.primitives.len()
    );

    let image = scene.render();

    // Save image based on file extension; PPM is the native format
    if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output);
    } else if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output);
    } else {
        save_image_as_ppm(&image, &args.output);
    }
}
