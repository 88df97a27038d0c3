//! Debounced live preview.
//!
//! Every change to the image or the options restarts a short timer. Only a
//! timer that fires without being superseded triggers a conversion, and a
//! finished conversion is published only if no newer change arrived while
//! it ran. Subscribers therefore see the latest state, never a stale one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ascii::{
    convert, is_positive_finite, CharSet, ColorMode, ConversionOptions, ConversionResult,
    MAX_WIDTH,
};
use crate::bitmap::Bitmap;

/// A published preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    /// Generation of the change that produced this frame
    pub generation: u64,
    pub options: ConversionOptions,
    pub result: ConversionResult,
}

struct Inputs {
    bitmap: Option<Arc<Bitmap>>,
    options: ConversionOptions,
}

struct Shared {
    generation: AtomicU64,
    inputs: Mutex<Inputs>,
    tx: watch::Sender<Option<PreviewFrame>>,
}

impl Shared {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

/// Live preview state with last-request-wins semantics.
///
/// Must be used from within a tokio runtime.
pub struct PreviewSession {
    shared: Arc<Shared>,
    debounce: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl PreviewSession {
    pub fn new(options: ConversionOptions, debounce: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                inputs: Mutex::new(Inputs {
                    bitmap: None,
                    options,
                }),
                tx,
            }),
            debounce,
            pending: Mutex::new(None),
        }
    }

    /// Receiver for published frames. `None` until the first conversion, and
    /// again after the image is cleared.
    pub fn subscribe(&self) -> watch::Receiver<Option<PreviewFrame>> {
        self.shared.tx.subscribe()
    }

    /// Generation of the most recent change.
    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::SeqCst)
    }

    /// Snapshot of the current options.
    pub fn options(&self) -> ConversionOptions {
        self.lock_inputs().options.clone()
    }

    /// Replace the image (or clear it with `None`) and schedule a render.
    pub fn set_bitmap(&self, bitmap: Option<Bitmap>) -> u64 {
        self.lock_inputs().bitmap = bitmap.map(Arc::new);
        self.schedule()
    }

    /// Modify the options in place and schedule a render.
    pub fn update_options<F>(&self, f: F) -> u64
    where
        F: FnOnce(&mut ConversionOptions),
    {
        f(&mut self.lock_inputs().options);
        self.schedule()
    }

    fn lock_inputs(&self) -> std::sync::MutexGuard<'_, Inputs> {
        // A panicking converter can't leave Inputs half-written
        self.shared
            .inputs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn schedule(&self) -> u64 {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let shared = Arc::clone(&self.shared);
        let debounce = self.debounce;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if !shared.is_current(generation) {
                return;
            }

            let (bitmap, options) = {
                let inputs = shared
                    .inputs
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                (inputs.bitmap.clone(), inputs.options.clone())
            };

            let Some(bitmap) = bitmap else {
                shared.tx.send_replace(None);
                return;
            };

            let render_options = options.clone();
            let result =
                tokio::task::spawn_blocking(move || convert(&bitmap, &render_options)).await;

            match result {
                Ok(result) if shared.is_current(generation) => {
                    shared.tx.send_replace(Some(PreviewFrame {
                        generation,
                        options,
                        result,
                    }));
                }
                Ok(_) => log::debug!("Dropping stale preview for generation {}", generation),
                Err(e) => log::error!("Preview conversion failed: {}", e),
            }
        });

        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }

        generation
    }
}

impl Drop for PreviewSession {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}

/// A single option change typed into an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionCommand {
    Width(u32),
    Charset(CharSet),
    /// Cycle to the next preset ramp
    NextCharset,
    Characters(String),
    Color(ColorMode),
    Contrast(f64),
    Brightness(f64),
    /// Restore the starting options
    Reset,
}

impl OptionCommand {
    /// Parse `"<name> <value>"`.
    ///
    /// Accepted: `width N`, `charset ID`, `next`, `chars STR`,
    /// `color grayscale|colored`, `contrast F`, `brightness F`, `reset`.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_start();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest),
            None => (line.trim_end(), ""),
        };
        let value = rest.trim();

        match name.to_ascii_lowercase().as_str() {
            "width" => {
                let width: u32 = value
                    .parse()
                    .map_err(|_| format!("'{}' is not a valid width", value))?;
                if !(1..=MAX_WIDTH).contains(&width) {
                    return Err(format!(
                        "Width must be between 1 and {} columns, got {}",
                        MAX_WIDTH, width
                    ));
                }
                Ok(OptionCommand::Width(width))
            }
            "charset" => value.parse().map(OptionCommand::Charset),
            "next" => Ok(OptionCommand::NextCharset),
            "chars" | "characters" => {
                // Everything after the separator is the ramp, spaces included
                let ramp = rest.trim_end_matches(['\r', '\n']);
                if ramp.is_empty() {
                    return Err("Character ramp must not be empty".to_string());
                }
                Ok(OptionCommand::Characters(ramp.to_string()))
            }
            "color" | "colour" => value.parse().map(OptionCommand::Color),
            "contrast" => parse_positive("contrast", value).map(OptionCommand::Contrast),
            "brightness" => parse_positive("brightness", value).map(OptionCommand::Brightness),
            "reset" => Ok(OptionCommand::Reset),
            "" => Err("Empty command".to_string()),
            other => Err(format!("Unknown command '{}'", other)),
        }
    }

    /// Apply the change; `initial` is what `Reset` restores.
    pub fn apply(&self, options: &mut ConversionOptions, initial: &ConversionOptions) {
        match self {
            OptionCommand::Width(width) => options.width = *width,
            OptionCommand::Charset(charset) => {
                options.characters = charset.characters().to_string();
            }
            OptionCommand::NextCharset => {
                let next = options.charset().unwrap_or(CharSet::Simple).next();
                options.characters = next.characters().to_string();
            }
            OptionCommand::Characters(ramp) => options.characters = ramp.clone(),
            OptionCommand::Color(mode) => options.color_mode = *mode,
            OptionCommand::Contrast(v) => options.contrast = *v,
            OptionCommand::Brightness(v) => options.brightness = *v,
            OptionCommand::Reset => *options = initial.clone(),
        }
    }
}

fn parse_positive(name: &str, value: &str) -> Result<f64, String> {
    let v: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", value))?;
    if !is_positive_finite(v) {
        return Err(format!("{} must be greater than 0, got {}", name, v));
    }
    Ok(v)
}
