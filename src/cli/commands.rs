//! Subcommand handlers.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tokio::sync::{mpsc, watch};

use super::args::{ConfigAction, RenderArgs};
use super::enums::Format;
use crate::ascii::{convert, CharSet, ConversionOptions};
use crate::config::{default_path as get_config_path, Config, DEFAULT_CONFIG_TOML};
use crate::decode::{self, ImageFetcher, ImageSource};
use crate::export::{self, ExportFormat};
use crate::preview::{OptionCommand, PreviewSession};

/// Resolve the effective options: config file values overridden by flags.
pub fn resolve_options(config: &Config, render: &RenderArgs) -> Result<ConversionOptions, String> {
    let mut options = config.conversion_options();
    render.apply_to(&mut options);
    options.validate().map_err(|e| e.to_string())?;
    Ok(options)
}

/// Pick the output format from the flag, else the output extension, else txt.
pub fn resolve_format(format: Option<Format>, output: Option<&Path>) -> ExportFormat {
    format
        .map(ExportFormat::from)
        .or_else(|| output.and_then(ExportFormat::from_path))
        .unwrap_or_default()
}

fn load_bitmap(
    runtime: &tokio::runtime::Runtime,
    config: &Config,
    source: &str,
) -> Result<crate::bitmap::Bitmap, String> {
    let fetcher = ImageFetcher::with_settings(config.fetch_settings()).map_err(|e| e.to_string())?;
    let source = ImageSource::parse(source);
    runtime
        .block_on(decode::load(&source, &fetcher))
        .map_err(|e| e.to_string())
}

/// Convert one image and print or write the result.
pub fn run_convert(
    config: &Config,
    source: &str,
    render: &RenderArgs,
    format: Option<Format>,
    output: Option<&Path>,
) -> Result<(), String> {
    let options = resolve_options(config, render)?;
    let output = output.filter(|p| *p != Path::new("-"));
    let format = resolve_format(format, output);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start async runtime: {}", e))?;
    let bitmap = load_bitmap(&runtime, config, source)?;

    let result = convert(&bitmap, &options);
    if result.is_empty() {
        log::warn!(
            "Image {}x{} at width {} produced no rows",
            bitmap.width(),
            bitmap.height(),
            options.width
        );
    }

    match output {
        Some(path) => {
            let written = export::write(&result, format, path).map_err(|e| e.to_string())?;
            eprintln!("Wrote {} ({})", written.display(), format.mime_type());
        }
        None => {
            let contents = export::render(&result, format).map_err(|e| e.to_string())?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", contents).map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}

/// Live preview: load once, then re-render on each option change typed on stdin.
pub fn run_interactive(config: &Config, source: &str, render: &RenderArgs) -> Result<(), String> {
    let initial = resolve_options(config, render)?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start async runtime: {}", e))?;
    let bitmap = load_bitmap(&runtime, config, source)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(true);
        eprintln!("\nReceived Ctrl+C, shutting down...");
    })
    .map_err(|e| format!("Failed to install Ctrl+C handler: {}", e))?;

    let lines = spawn_line_reader(io::BufReader::new(io::stdin()));

    runtime.block_on(async move {
        let session = PreviewSession::new(initial.clone(), config.debounce());
        session.set_bitmap(Some(bitmap));
        print_interactive_help();
        preview_loop(&session, &initial, lines, shutdown_rx).await
    })
}

/// Read lines on a dedicated thread and forward them over a channel.
///
/// The thread is detached: a read still blocked at shutdown does not keep
/// the runtime (or the process) alive. The channel closes at end of input.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::UnboundedReceiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in reader.lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Apply typed commands to `session` and print each published frame.
///
/// Returns on `quit`, end of input, or when `shutdown` flips.
pub async fn preview_loop(
    session: &PreviewSession,
    initial: &ConversionOptions,
    mut lines: mpsc::UnboundedReceiver<io::Result<String>>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), String> {
    let mut frames = session.subscribe();

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(frame) = frames.borrow_and_update().as_ref() {
                    let ramp = frame
                        .options
                        .charset()
                        .map(|c| c.id().to_string())
                        .unwrap_or_else(|| "custom".to_string());
                    println!("{}", frame.result.text);
                    println!(
                        "-- {}x{} | charset {} | {} | contrast {:.2} | brightness {:.2}",
                        frame.result.columns,
                        frame.result.rows,
                        ramp,
                        frame.options.color_mode,
                        frame.options.contrast,
                        frame.options.brightness,
                    );
                }
            }
            line = lines.recv() => {
                let line = match line {
                    Some(Ok(line)) => line,
                    Some(Err(e)) => return Err(format!("Failed to read stdin: {}", e)),
                    // stdin closed
                    None => break,
                };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "quit" || trimmed == "exit" {
                    break;
                }
                if trimmed == "help" {
                    print_interactive_help();
                    continue;
                }
                match OptionCommand::parse(&line) {
                    Ok(command) => {
                        session.update_options(|o| command.apply(o, initial));
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
        }
    }

    Ok(())
}

fn print_interactive_help() {
    eprintln!("Commands: width N | charset ID | next | chars STR | color grayscale|colored");
    eprintln!("          contrast F | brightness F | reset | help | quit");
}

/// Print the built-in character ramps.
pub fn list_charsets() {
    println!("Available character sets:");
    for charset in CharSet::ALL {
        let marker = if charset == CharSet::default() {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {:<8} {:<8} {:>2} levels  \"{}\"{}",
            charset.id(),
            charset.name(),
            charset.levels(),
            charset.characters(),
            marker
        );
    }
    println!();
    println!("Use --charset <id> to select one, or --characters to pass your own ramp.");
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&Path>) {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            let config = match Config::load(Some(&config_path)) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            let options = config.conversion_options();
            let charset = options
                .charset()
                .map(|c| c.id().to_string())
                .unwrap_or_else(|| format!("custom \"{}\"", options.characters));

            println!("Current configuration:");
            println!("  Width: {}", options.width);
            println!("  Charset: {}", charset);
            println!("  Color mode: {}", options.color_mode);
            println!("  Contrast: {}", options.contrast);
            println!("  Brightness: {}", options.brightness);
            println!("  Preview debounce: {}ms", config.preview.debounce_ms);
            println!("  Fetch timeout: {}s", config.fetch.timeout_secs);
            println!("  Fetch retries: {}", config.fetch.retries);
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'glyphgrid config show' to view current settings.");
                std::process::exit(1);
            }

            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            if let Err(e) = std::fs::write(&config_path, DEFAULT_CONFIG_TOML) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }

            println!("Created config file: {}", config_path.display());
        }
    }
}
