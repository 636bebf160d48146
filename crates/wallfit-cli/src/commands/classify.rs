//! Aspect classification command

use crate::ClassifyArgs;
use anyhow::Result;
use wallfit_layout::{AspectClass, Placement};

pub fn run(args: ClassifyArgs) -> Result<()> {
    for path in &args.input {
        let image = match super::load_image(path) {
            Ok(image) => image,
            Err(e) => {
                eprintln!("{}: {:#}", path.display(), e);
                continue;
            }
        };
        let (w, h) = image.dimensions();
        let class = AspectClass::classify(w, h);

        print!("{}: {}x{} ratio {:.3} -> {}", path.display(), w, h, image.aspect_ratio(), class);
        if let Some(p) = Placement::for_class(class, w, h) {
            print!(" (foreground {}x{} at {},{})", p.width, p.height, p.x, p.y);
        }
        println!();
    }
    Ok(())
}
