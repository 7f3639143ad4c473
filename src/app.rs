use std::{
    fs::File,
    io::{stdin, stdout, BufWriter, Read, Write},
    path::Path,
};

use tracing::{info, warn};

use crate::{
    common::error::AppError,
    config::Config,
    domain::{catalog::ItemId, ledger::Ledger},
    io::{reader, writer},
    worker::processor::{Processor, Summary},
};

pub fn run(config: Config) -> Result<Summary, AppError> {
    let mut ledger = if config.demo {
        Ledger::demo()
    } else {
        Ledger::new()
    };
    if let Some(path) = &config.customers {
        seed_customers(&mut ledger, path)?;
    }
    if let Some(path) = &config.items {
        seed_items(&mut ledger, path)?;
    }
    info!(
        customers = ledger.customers().len(),
        items = ledger.items().len(),
        "ledger ready"
    );

    let stdout = stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = match config.script_path() {
        Some(path) => run_script(&mut ledger, File::open(path)?, &mut out, config.strict)?,
        None => run_script(&mut ledger, stdin().lock(), &mut out, config.strict)?,
    };

    // Final stock levels after the whole script.
    let catalog = ledger.items().iter().enumerate();
    writer::write_items(&mut out, catalog.map(|(i, item)| (ItemId(i), item)))?;
    out.flush()?;

    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        revenue = %ledger.total_revenue(),
        "script finished"
    );
    Ok(summary)
}

/// Executes every command of `script` against `ledger`, writing query
/// output to `out`.
///
/// Rejected commands are logged and skipped unless `strict` is set, in
/// which case the first one aborts the run. Malformed lines always abort.
pub fn run_script<R: Read, W: Write>(
    ledger: &mut Ledger,
    script: R,
    mut out: W,
    strict: bool,
) -> Result<Summary, AppError> {
    let mut rdr = reader::script_reader(script);
    let mut processor = Processor::new();

    for command in reader::read_commands(&mut rdr) {
        let command = command.map_err(AppError::Parse)?;
        match processor.process(ledger, command, &mut out) {
            Ok(()) => {}
            Err(AppError::Ledger(e)) if !strict => warn!(error = %e, "command rejected"),
            Err(e) => return Err(e),
        }
    }

    Ok(processor.summary())
}

fn seed_customers(ledger: &mut Ledger, path: &Path) -> Result<(), AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(File::open(path)?);
    for customer in reader::read_customers(&mut rdr) {
        ledger.register_customer(customer.map_err(AppError::Parse)?)?;
    }
    Ok(())
}

fn seed_items(ledger: &mut Ledger, path: &Path) -> Result<(), AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(File::open(path)?);
    for item in reader::read_items(&mut rdr) {
        ledger.register_item(item.map_err(AppError::Parse)?);
    }
    Ok(())
}
