use bundlemark_core::HIGHLIGHT_PALETTE;

use crate::cli::OutputFormat;
use crate::shared::print_json;

pub fn run(format: &OutputFormat) -> Result<(), i32> {
    match format {
        OutputFormat::Text => {
            println!("name\thex\tr\tg\tb\topacity");
            for color in HIGHLIGHT_PALETTE {
                println!(
                    "{}\t{}\t{:.3}\t{:.3}\t{:.3}\t{:.2}",
                    color.name, color.hex, color.rgb.r, color.rgb.g, color.rgb.b, color.opacity
                );
            }
            Ok(())
        }
        OutputFormat::Json => {
            let styles: Vec<_> = HIGHLIGHT_PALETTE.iter().map(|c| c.to_style()).collect();
            print_json(&styles)
        }
        OutputFormat::Csv => {
            println!("name,hex,r,g,b,opacity");
            for color in HIGHLIGHT_PALETTE {
                println!(
                    "{},{},{:.3},{:.3},{:.3},{:.2}",
                    color.name, color.hex, color.rgb.r, color.rgb.g, color.rgb.b, color.opacity
                );
            }
            Ok(())
        }
    }
}
