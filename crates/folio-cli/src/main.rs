use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use folio_render::DocumentLocation;
use folio_session::fit_width_scale;

#[derive(Parser)]
#[command(name = "folio", about = "Portfolio drawings viewer CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show page count and page sizes of a document
    Info {
        /// Input PDF file or URL
        input: String,
    },

    /// Rasterize one page to a PNG
    Render {
        /// Input PDF file or URL
        input: String,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Zoom percentage relative to the fit width
        #[arg(short, long, default_value = "100.0")]
        zoom: f32,

        /// Width in pixels the page is fitted to at 100% zoom
        #[arg(long, default_value = "800.0")]
        fit_width: f32,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => {
            let location = DocumentLocation::parse(&input);
            let data = folio_render::fetch_document(&location).await?;
            let summary = folio_render::open_summary(data.clone()).await?;

            println!("{}", location);
            println!("Pages: {}", summary.page_count);
            for page in 1..=summary.page_count {
                let metrics = folio_render::page_metrics(data.clone(), page).await?;
                println!(
                    "  page {:>3}: {:.1} x {:.1} pt",
                    page, metrics.width, metrics.height
                );
            }
        }

        Commands::Render {
            input,
            page,
            zoom,
            fit_width,
            output,
        } => {
            let location = DocumentLocation::parse(&input);
            let data = folio_render::fetch_document(&location).await?;

            // Same scale model as the viewer: 100% fills `fit_width` pixels
            let metrics = folio_render::page_metrics(data.clone(), page).await?;
            let base_scale = fit_width_scale(fit_width, metrics.width, fit_width);
            let scale = base_scale * zoom / 100.0;

            let rendered = folio_render::rasterize(data, page, scale).await?;
            folio_render::save_png(&rendered, &output).await?;

            println!(
                "Rendered page {} at {:.0}% ({}x{} px) → {}",
                page,
                zoom,
                rendered.width_px,
                rendered.height_px,
                output.display()
            );
        }
    }

    Ok(())
}
