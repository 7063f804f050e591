use bundlemark_core::{PdfRect, to_screen};

use crate::cli::OutputFormat;
use crate::shared::print_json;

pub fn run(rect: &PdfRect, page_height: f64, scale: f64, format: &OutputFormat) -> Result<(), i32> {
    let screen = to_screen(rect, page_height, scale).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    match format {
        OutputFormat::Text => {
            println!("left\ttop\twidth\theight");
            println!(
                "{:.2}\t{:.2}\t{:.2}\t{:.2}",
                screen.x, screen.y, screen.width, screen.height
            );
            Ok(())
        }
        OutputFormat::Json => print_json(&screen),
        OutputFormat::Csv => {
            println!("left,top,width,height");
            println!(
                "{:.2},{:.2},{:.2},{:.2}",
                screen.x, screen.y, screen.width, screen.height
            );
            Ok(())
        }
    }
}
