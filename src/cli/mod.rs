//! The `glyphgrid` command line: argument types and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{parse_characters, parse_factor, parse_width, Args, Command, ConfigAction, RenderArgs};
pub use commands::{
    handle_config_action, list_charsets, preview_loop, resolve_format, resolve_options,
    run_convert, run_interactive, spawn_line_reader,
};
pub use enums::{CharacterSet, Color, Format};
