//! Single-image layout command

use crate::LayoutArgs;
use anyhow::{Context, Result};
use tracing::info;
use wallfit_layout::AspectClass;

pub fn run(args: LayoutArgs, verbose: u8) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let detected = AspectClass::classify(image.width(), image.height());
    let class = args.class.map(AspectClass::from).unwrap_or(detected);

    if verbose > 0 {
        println!(
            "{}: {}x{} ({}), using {} layout",
            args.input.display(),
            image.width(),
            image.height(),
            detected,
            class
        );
    }

    let canvas = wallfit_layout::layout_with_class(&image, class)
        .with_context(|| format!("Layout failed for {}", args.input.display()))?;
    super::save_image(&args.output, &canvas)?;

    info!(input = %args.input.display(), output = %args.output.display(), %class, "Wrote wallpaper");
    Ok(())
}
