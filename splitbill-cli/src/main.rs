#![warn(clippy::uninlined_format_args)]

mod config;
mod session_file;

use std::{borrow::Cow, env, fs, process};

use config::AppConfig;
use session_file::{SessionFile, SessionFileError};
use splitbill_application::BillProcessor;
use splitbill_presentation::{
    BillPresenter, ReceiptPresenter, format_bill_error, format_roster_error, format_session_error,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("splitbill=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run() -> CliResult<()> {
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    init_logging();

    let Some(path) = env::args().nth(1) else {
        return Err("Usage: splitbill <session.json>".into());
    };

    let source =
        fs::read_to_string(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;

    let session = SessionFile::from_json(&source)
        .and_then(SessionFile::into_session)
        .map_err(describe_session_file_error)?;

    let processor = BillProcessor::new(config.bill_config());
    let total = processor.receipt_total(session.receipt(), session.flags());
    println!(
        "{}",
        ReceiptPresenter::render(session.receipt(), session.flags(), &total)
    );

    let summary = processor
        .process(session.input(), session.mode())
        .map_err(|err| format_bill_error(&err))?;
    let view = BillPresenter::render(&summary);

    println!();
    if let Some(line) = &view.unassigned_line {
        println!("{line}");
    }
    println!("{}", view.owed_text());

    Ok(())
}

fn describe_session_file_error(err: SessionFileError) -> String {
    match err {
        SessionFileError::Roster(err) => format_roster_error(&err),
        SessionFileError::Session(err) => format_session_error(&err),
        other => other.to_string(),
    }
}
