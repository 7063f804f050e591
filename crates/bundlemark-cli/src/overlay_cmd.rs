use std::path::Path;

use bundlemark_core::Overlay;

use crate::cli::OutputFormat;
use crate::script;
use crate::shared::{build_session, csv_escape, print_json, report_warnings};

/// The page being rendered and its zoom.
pub struct Viewport<'a> {
    pub document: &'a str,
    pub page: u32,
    pub page_height: f64,
    pub scale: f64,
}

pub fn run(
    file: &Path,
    viewport: &Viewport<'_>,
    format: &OutputFormat,
    config: Option<&Path>,
    sequential_ids: bool,
) -> Result<(), i32> {
    let steps = script::load(file)?;
    let mut session = build_session(config, sequential_ids)?;

    let outcome = script::replay(&mut session, steps);
    report_warnings(&mut session);
    outcome?;

    let overlays = session
        .overlays(
            viewport.document,
            viewport.page,
            viewport.page_height,
            viewport.scale,
        )
        .map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;

    match format {
        OutputFormat::Text => write_text(&overlays),
        OutputFormat::Json => print_json(&overlays),
        OutputFormat::Csv => write_csv(&overlays),
    }
}

fn border_columns(overlay: &Overlay) -> (String, String) {
    match &overlay.border {
        Some(border) => (border.color.clone(), format!("{:.2}", border.width)),
        None => (String::new(), String::new()),
    }
}

fn write_text(overlays: &[Overlay]) -> Result<(), i32> {
    println!("id\tkind\tleft\ttop\twidth\theight\tfill\topacity\tborder\tborder_width");
    for overlay in overlays {
        let (border, border_width) = border_columns(overlay);
        println!(
            "{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{}\t{:.2}\t{}\t{}",
            overlay.id,
            overlay.kind,
            overlay.rect.x,
            overlay.rect.y,
            overlay.rect.width,
            overlay.rect.height,
            overlay.fill,
            overlay.opacity,
            border,
            border_width,
        );
    }
    Ok(())
}

fn write_csv(overlays: &[Overlay]) -> Result<(), i32> {
    println!("id,kind,left,top,width,height,fill,opacity,border,border_width");
    for overlay in overlays {
        let (border, border_width) = border_columns(overlay);
        println!(
            "{},{},{:.2},{:.2},{:.2},{:.2},{},{:.2},{},{}",
            csv_escape(overlay.id.as_str()),
            overlay.kind,
            overlay.rect.x,
            overlay.rect.y,
            overlay.rect.width,
            overlay.rect.height,
            overlay.fill,
            overlay.opacity,
            border,
            border_width,
        );
    }
    Ok(())
}
