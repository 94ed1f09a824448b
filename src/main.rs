mod analysis;
mod app;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Co-occurrence analysis result (JSON) to open.
    #[arg(value_name = "ANALYSIS_JSON")]
    input: PathBuf,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "cooc-viz",
        options,
        Box::new(move |cc| Ok(Box::new(app::CoocVizApp::new(cc, args.input.clone())))),
    )
}
