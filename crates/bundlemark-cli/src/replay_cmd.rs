use std::path::Path;

use bundlemark_core::{Annotation, AnnotationRecord, AnnotationStyle};

use crate::cli::OutputFormat;
use crate::script;
use crate::shared::{build_session, csv_escape, print_json, report_warnings, resolve_pages};

pub fn run(
    file: &Path,
    document: Option<&str>,
    pages: Option<&str>,
    format: &OutputFormat,
    config: Option<&Path>,
    sequential_ids: bool,
) -> Result<(), i32> {
    let pages = resolve_pages(pages)?;
    let steps = script::load(file)?;
    let mut session = build_session(config, sequential_ids)?;

    let outcome = script::replay(&mut session, steps);
    report_warnings(&mut session);
    outcome?;

    let selected: Vec<&Annotation> = session
        .store()
        .iter()
        .filter(|a| document.is_none_or(|doc| a.document_id == doc))
        .filter(|a| {
            pages
                .as_ref()
                .is_none_or(|pages| pages.contains(a.page_number))
        })
        .collect();
    tracing::info!(
        total = session.store().len(),
        selected = selected.len(),
        "replay finished"
    );

    match format {
        OutputFormat::Text => write_text(&selected),
        OutputFormat::Json => {
            let records: Vec<AnnotationRecord> =
                selected.iter().map(|a| AnnotationRecord::from(*a)).collect();
            print_json(&records)
        }
        OutputFormat::Csv => write_csv(&selected),
    }
}

/// Color column: palette name for highlights, fill color for redactions.
fn color_of(annot: &Annotation) -> &str {
    match &annot.style {
        AnnotationStyle::Highlight(h) => &h.color_name,
        AnnotationStyle::Redaction(r) => &r.fill_color,
    }
}

fn write_text(annots: &[&Annotation]) -> Result<(), i32> {
    println!("id\tkind\tdocument\tpage\tx\ty\twidth\theight\tcolor\topacity\ttext");
    for annot in annots {
        let r = &annot.coordinates;
        println!(
            "{}\t{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{}\t{:.2}\t{}",
            annot.id,
            annot.kind(),
            annot.document_id,
            annot.page_number,
            r.x,
            r.y,
            r.width,
            r.height,
            color_of(annot),
            annot.style.opacity(),
            annot.text.replace(['\t', '\n'], " "),
        );
    }
    Ok(())
}

fn write_csv(annots: &[&Annotation]) -> Result<(), i32> {
    println!("id,kind,document,page,x,y,width,height,color,opacity,text");
    for annot in annots {
        let r = &annot.coordinates;
        println!(
            "{},{},{},{},{:.2},{:.2},{:.2},{:.2},{},{:.2},{}",
            csv_escape(annot.id.as_str()),
            annot.kind(),
            csv_escape(&annot.document_id),
            annot.page_number,
            r.x,
            r.y,
            r.width,
            r.height,
            csv_escape(color_of(annot)),
            annot.style.opacity(),
            csv_escape(&annot.text),
        );
    }
    Ok(())
}
