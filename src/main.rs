use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use invoice_chatbot::{load_csv, ChatConfig, Dispatcher, InvoiceCollection};

/// Ask questions about your invoices
#[derive(Parser, Debug)]
#[command(name = "invoice-chatbot", version)]
struct Args {
    /// CSV with columns vendor,invoice_number,invoice_date,due_date,total
    /// (defaults to the built-in sample invoices)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Reference date for "due in the next N days" (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,

    /// Never call the LLM, even if an API key is set
    #[arg(long)]
    rules_only: bool,

    /// Chat model used when OPENAI_API_KEY is set (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Answer a single question and exit
    #[arg(long)]
    ask: Option<String>,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let invoices = match &args.data {
        Some(path) => load_csv(path)?,
        None => InvoiceCollection::sample()?,
    };
    tracing::info!(count = invoices.len(), "invoices loaded");

    let mut config = if args.rules_only {
        ChatConfig::new(invoices)
    } else {
        ChatConfig::from_env(invoices, args.model.as_deref())
    };
    if let Some(date) = args.today {
        config = config.with_reference_date(date);
    }

    let dispatcher = Dispatcher::new(config);

    match &args.ask {
        Some(question) => {
            println!("{}", dispatcher.answer(question));
            Ok(())
        }
        None => run_repl(&dispatcher),
    }
}

fn run_repl(dispatcher: &Dispatcher) -> Result<()> {
    println!("💬 Invoice Chatbot Ready!");
    println!("Type 'exit' to quit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        print!("Q: ");
        stdout.flush().context("Failed to flush stdout")?;

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            // End of input
            println!();
            break;
        }

        let query = line.trim_end_matches(['\r', '\n']);
        if is_exit_command(query) {
            break;
        }

        println!("A: {}", dispatcher.answer(query));
    }

    Ok(())
}

fn is_exit_command(input: &str) -> bool {
    let cmd = input.trim().to_lowercase();
    cmd == "exit" || cmd == "quit"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  QUIT "));
        assert!(is_exit_command("Exit"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("List all vendors."));
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date("2025-08-30").unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 30).unwrap()
        );
        assert!(parse_date("08/30/2025").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "invoice-chatbot",
            "--today",
            "2025-08-30",
            "--rules-only",
            "--ask",
            "List all vendors.",
        ])
        .unwrap();

        assert!(args.rules_only);
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2025, 8, 30));
        assert_eq!(args.ask.as_deref(), Some("List all vendors."));
        assert!(args.data.is_none());
        assert!(args.model.is_none());
    }

    #[test]
    fn test_model_flag() {
        let args = Args::try_parse_from(["invoice-chatbot", "--model", "gpt-4o"]).unwrap();

        assert_eq!(args.model.as_deref(), Some("gpt-4o"));
        assert!(!args.rules_only);
    }
}
