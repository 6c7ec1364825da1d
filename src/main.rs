// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cli;
mod config;
mod console_format;
mod delivery;
mod encoder;
mod error;
mod export;
mod input;
mod notify;
mod projector;
mod toml_helpers;
mod types;
mod ui;

use config::{Destination, ExportPlan};
use delivery::{DirectorySink, FileDeliverySink, StdoutSink};
use log::debug;
use types::*;

/// Exit code for configuration and input errors
const EXIT_CONFIG_ERROR: i32 = 1;
/// Exit code when the export itself failed
const EXIT_EXPORT_FAILED: i32 = 2;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(EXIT_CONFIG_ERROR);
    }

    // Set console width override if specified (for testing)
    if let Some(width) = args.console_width {
        console_format::set_console_width(width);
    }

    // Resolve columns, filename and destination
    let plan = match config::build_export_plan(&args) {
        Ok(p) => p,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };
    debug!("Export plan: {:?}", plan);

    // Load records
    let records = match input::load_records_from(plan.input.as_deref(), plan.format, plan.detect_dates) {
        Ok(r) => r,
        Err(e) => {
            ui::print_error(&e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    if plan.preview_rows > 0 {
        print_preview(&records, &plan);
    }

    let sink: Box<dyn FileDeliverySink> = match &plan.destination {
        Destination::Directory(dir) => Box::new(DirectorySink::new(dir.clone())),
        Destination::Stdout => Box::new(StdoutSink),
    };
    let notifier = notify::ConsoleNotifier::new(args.quiet);

    match export::export_to_csv(&records, &plan.columns, &plan.filename, sink.as_ref(), &notifier) {
        Ok(Delivered::File(path)) => {
            if !args.quiet {
                ui::status(&format!("{} records saved to: {}", records.len(), path.display()));
            }
        }
        Ok(delivered) => debug!("Delivered to {}", delivered.describe()),
        Err(e) => {
            debug!("Export failed: {:?}", e);
            std::process::exit(EXIT_EXPORT_FAILED);
        }
    }
}

/// Print the first rows as they will be exported
fn print_preview(records: &[Record], plan: &ExportPlan) {
    let headers: Vec<String> = plan.columns.iter().map(|c| c.label.clone()).collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .take(plan.preview_rows)
        .map(|r| encoder::project_row(r, &plan.columns))
        .collect();
    console_format::print_preview(&headers, &rows, records.len());
}
