use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_ledger::cli::{
    handle_add, handle_categories, handle_chart, handle_combine, handle_delete, handle_export,
    handle_list, handle_reset, handle_show, parse_alias, AddArgs, ChartArgs, CombineArgs,
    DeleteArgs, ExportArgs, FilterArgs, ResetArgs, ShowArgs,
};
use expense_ledger::config::paths::DATA_DIR_ENV;
use expense_ledger::config::{LedgerPaths, Settings};
use expense_ledger::export::ExportFormat;
use expense_ledger::ExpenseLedger;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense ledger",
    long_about = "Record expenses, show categories under new names, and filter, \
                  chart and export what you spent."
)]
struct Cli {
    /// Base directory for settings and data
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Show ORIGINAL as NEW for this run only (repeatable)
    #[arg(long = "alias", global = true, value_name = "ORIGINAL=NEW", value_parser = parse_alias)]
    aliases: Vec<(String, String)>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add(AddArgs),

    /// List expenses with their positions
    #[command(alias = "ls")]
    List(FilterArgs),

    /// Show one expense in full
    Show(ShowArgs),

    /// Delete an expense by position or id
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Show a category under another name
    Combine(CombineArgs),

    /// List display categories
    Categories,

    /// Chart spending per category
    Chart(ChartArgs),

    /// Export expenses as CSV or JSON
    Export(ExportArgs),

    /// Delete every expense
    Reset(ResetArgs),

    /// Show or change configuration
    Config {
        /// Keep combined categories across runs
        #[arg(long)]
        persist_aliases: Option<bool>,
        /// Currency symbol for display
        #[arg(long)]
        currency: Option<String>,
        /// Format used when an export has no recognizable extension
        #[arg(long, value_enum)]
        export_format: Option<ExportFormat>,
    },
}

fn main() -> Result<()> {
    expense_ledger::init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Config {
            persist_aliases,
            currency,
            export_format,
        }) => {
            let changed = persist_aliases.is_some() || currency.is_some() || export_format.is_some();
            if let Some(persist) = persist_aliases {
                settings.persist_aliases = persist;
            }
            if let Some(symbol) = currency {
                settings.currency_symbol = symbol;
            }
            if let Some(format) = export_format {
                settings.default_export_format = format;
            }
            if changed {
                settings.save(&paths)?;
            }

            println!("Expense ledger configuration");
            println!("============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Ledger file:    {}", paths.expenses_file().display());
            println!("Aliases file:   {}", paths.aliases_file().display());
            println!();
            println!("Settings:");
            println!("  Persist aliases:       {}", settings.persist_aliases);
            println!("  Currency symbol:       {}", settings.currency_symbol);
            println!("  Default export format: {:?}", settings.default_export_format);
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("expense - personal expense ledger");
            println!();
            println!("Run 'expense --help' for usage information.");
            return Ok(());
        }
    };

    let mut ledger = ExpenseLedger::open(paths, settings)?;
    for warning in ledger.load_warnings() {
        eprintln!("Warning: {}", warning);
    }
    for (original, new) in &cli.aliases {
        ledger.alias_for_session(original, new)?;
    }

    match command {
        Commands::Add(args) => handle_add(&mut ledger, args)?,
        Commands::List(filter) => handle_list(&ledger, &filter)?,
        Commands::Show(args) => handle_show(&ledger, args)?,
        Commands::Delete(args) => handle_delete(&mut ledger, args)?,
        Commands::Combine(args) => handle_combine(&mut ledger, args)?,
        Commands::Categories => handle_categories(&ledger)?,
        Commands::Chart(args) => handle_chart(&ledger, args)?,
        Commands::Export(args) => handle_export(&ledger, args)?,
        Commands::Reset(args) => handle_reset(&mut ledger, args)?,
        Commands::Config { .. } => {}
    }

    Ok(())
}
