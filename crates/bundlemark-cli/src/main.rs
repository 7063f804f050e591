mod cli;
mod overlay_cmd;
mod page_range;
mod palette_cmd;
mod replay_cmd;
mod script;
mod shared;
mod transform_cmd;

use std::io::IsTerminal;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Replay {
            ref file,
            ref document,
            ref pages,
            ref format,
            ref config,
            sequential_ids,
        } => replay_cmd::run(
            file,
            document.as_deref(),
            pages.as_deref(),
            format,
            config.as_deref(),
            sequential_ids,
        ),
        cli::Commands::Overlay {
            ref file,
            ref document,
            page,
            page_height,
            scale,
            ref format,
            ref config,
            sequential_ids,
        } => overlay_cmd::run(
            file,
            &overlay_cmd::Viewport {
                document,
                page,
                page_height,
                scale,
            },
            format,
            config.as_deref(),
            sequential_ids,
        ),
        cli::Commands::Palette { ref format } => palette_cmd::run(format),
        cli::Commands::Transform {
            x,
            y,
            width,
            height,
            page_height,
            scale,
            ref format,
        } => transform_cmd::run(
            &bundlemark_core::PdfRect::new(x, y, width, height),
            page_height,
            scale,
            format,
        ),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
