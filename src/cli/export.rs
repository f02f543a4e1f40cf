//! CLI command for exporting expenses
//!
//! Writes the filtered expenses to a file, or to stdout when no file is given.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::error::LedgerResult;
use crate::export::ExportFormat;
use crate::services::ExpenseLedger;

use super::FilterArgs;

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file; omit to write to stdout
    pub output: Option<PathBuf>,

    /// Export format (defaults to the file extension, then the configured default)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn handle_export(ledger: &ExpenseLedger, args: ExportArgs) -> LedgerResult<()> {
    match args.output {
        Some(output) => {
            let filter = args.filter.to_filter()?;
            let count = ledger.export_to_path(&filter, &output, args.format)?;
            println!("Exported {} expense(s) to {}", count, output.display());
        }
        None => {
            let format = args
                .format
                .unwrap_or(ledger.settings().default_export_format);
            let bytes = ledger.export_expenses(
                args.filter.start.as_deref(),
                args.filter.end.as_deref(),
                args.filter.category.as_deref(),
                format,
            )?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            if format == ExportFormat::Json {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}
