//! Watermark a single image with another image or a line of text.
//!
//! Usage:
//! ```sh
//! cargo run --example watermark -- input.jpg output.jpg logo.png
//! cargo run --example watermark -- input.jpg output.jpg "(c) 2026"
//! ```

use std::env;
use std::path::Path;
use std::process;

use photo_batch::{compose, Anchor, TextWatermark, WatermarkSource};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <input> <output> <logo-image | text>", args[0]);
        process::exit(1);
    }

    let input = &args[1];
    let output = &args[2];
    let mark = &args[3];

    let source = if photo_batch::is_supported_image(Path::new(mark)) {
        WatermarkSource::image(mark)
    } else {
        WatermarkSource::Text(TextWatermark::new(mark.as_str()))
    };

    let base = image::open(input).unwrap_or_else(|e| {
        eprintln!("Error: {input}: {e}");
        process::exit(1);
    });

    match compose(&base, &source, Anchor::BottomRight, 0.5, 0.2) {
        Ok(out) => {
            if let Err(e) = out.save(output) {
                eprintln!("Error: {output}: {e}");
                process::exit(1);
            }
            println!("Done: {output}");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
