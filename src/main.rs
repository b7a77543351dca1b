use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

use jotter::core::config::{Notices, load_config, resolve};

#[derive(Parser)]
#[command(name = "jotter", about = "Markdown notes in the terminal")]
struct Args {
    /// Directory holding the notes (overrides config and JOTTER_NOTES_DIR)
    #[arg(long)]
    notes_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut notices = Notices::default();
    let file_config = load_config(&mut notices).unwrap_or_else(|e| {
        eprintln!("Warning: {e}, using defaults");
        Default::default()
    });
    let config = resolve(&file_config, args.notes_dir.as_deref(), &mut notices);

    // Logging goes to a file only; the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let logging = File::create(&config.log_file).ok().is_some_and(|log_file| {
        WriteLogger::init(config.log_level, log_config, log_file).is_ok()
    });

    if logging {
        notices.replay();
    } else {
        // Nowhere to log; config problems still need to reach the user
        eprintln!("Warning: could not open log file {}", config.log_file.display());
        for (level, message) in notices.iter() {
            if *level <= log::Level::Warn {
                eprintln!("Warning: {message}");
            }
        }
    }

    log::info!("Jotter starting up, notes in {}", config.notes_dir.display());

    jotter::tui::run(config)?;
    Ok(())
}
