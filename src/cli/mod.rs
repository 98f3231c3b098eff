//! CLI domain: parse, route, help, output, and presentation only.
//! No domain logic; the route table dispatches to the engines.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::usage;
pub use output::map_error;
pub use parse::{Cli, Operation};
pub use presentation::{
    format_generation_summary, format_listing, format_listing_json, format_report,
    format_report_json,
};
pub use route::{OutputFormat, RunContext};
