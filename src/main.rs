use auditpdf::{DocumentAssembler, DocumentSource, ExportConfig, ExportError, SectionBreak};
use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

// Many small, short-lived allocations per card; mimalloc keeps them cheap.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(version, about = "Render an audit checklist manifest as a paginated PDF report")]
struct Args {
    /// Audit manifest (JSON). Image paths inside it are relative to this file.
    manifest: PathBuf,

    /// Directory the report is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Export configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Let a section start on the current page when its banner fits
    #[arg(long)]
    continue_sections: bool,

    /// Leave items without a judgement out of the report
    #[arg(long)]
    skip_pending: bool,
}

fn run(args: &Args) -> Result<(), ExportError> {
    let mut config = match &args.config {
        Some(path) => ExportConfig::from_file(path)?,
        None => ExportConfig::default(),
    };
    if args.continue_sections {
        config.section_break = SectionBreak::Continue;
    }
    if args.skip_pending {
        config.include_pending = false;
    }

    let mut loaded = DocumentSource::from_file(&args.manifest)?;
    let metadata = &mut loaded.document.metadata;
    if metadata.date.trim().is_empty() {
        metadata.date = chrono::Local::now().format("%Y-%m-%d").to_string();
    }

    let output = DocumentAssembler::new(config).export_loaded_to_dir(&loaded, &args.output_dir)?;

    println!("Generated {} ({} pages)", output.file_name, output.page_count);
    for warning in &output.warnings {
        println!("  warning: {}", warning);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Export failed ({}): {}", e.kind(), e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
