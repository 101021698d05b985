use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::load_settings, AppState, HttpRecordsClient, RecordsApi, RecordsSession, Severity,
};
use shared::domain::{Gender, PersonRecord, RecordId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "records", about = "Manage person records against a /formData backend")]
struct Args {
    /// Base url of the records backend (overrides records.toml and env).
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every record.
    List,
    /// Create a record; name and email are required.
    Create(FieldArgs),
    /// Replace a record, starting from its current values.
    Update {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a record after confirmation.
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    age: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    birth_date: Option<String>,
    #[arg(long, value_parser = parse_gender)]
    gender: Option<Gender>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    student: Option<bool>,
    /// Hinted 1-10, not enforced.
    #[arg(long)]
    rating: Option<f64>,
    #[arg(long)]
    notes: Option<String>,
}

impl FieldArgs {
    fn apply(self, draft: &mut PersonRecord) {
        if let Some(v) = self.name {
            draft.name = v;
        }
        if let Some(v) = self.email {
            draft.email = v;
        }
        if let Some(v) = self.age {
            draft.age = v;
        }
        if let Some(v) = self.height {
            draft.height = v;
        }
        if let Some(v) = self.birth_date {
            draft.birth_date = v;
        }
        if let Some(v) = self.gender {
            draft.gender = v;
        }
        if let Some(v) = self.country {
            draft.country = v;
        }
        if let Some(v) = self.student {
            draft.is_student = v;
        }
        if let Some(v) = self.rating {
            draft.rating = v;
        }
        if let Some(v) = self.notes {
            draft.notes = v;
        }
    }
}

fn parse_gender(value: &str) -> Result<Gender, String> {
    Gender::parse(value)
        .ok_or_else(|| format!("unknown gender '{value}' (expected Male, Female, Other or empty)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    let client = HttpRecordsClient::from_settings(&settings)?;
    tracing::debug!(collection = %client.collection_url(), command = ?args.command, "running command");
    let mut session = RecordsSession::new(client, AppState::new(settings.toast_duration()));

    let result = run(&mut session, args.command).await;
    report_toast(&session);
    result
}

async fn run<A: RecordsApi>(session: &mut RecordsSession<A>, command: Command) -> Result<()> {
    match command {
        Command::List => {
            let records = session.load().await?;
            print_table(records);
            println!("Records: {}", records.len());
        }
        Command::Create(fields) => {
            let id = session.open_create();
            if let Some(draft) = session.draft_mut() {
                fields.apply(draft);
            }
            warn_on_malformed_birth_date(session);
            session.save().await?;
            println!("id: {id}");
        }
        Command::Update { id, fields } => {
            let id = RecordId(id);
            session.load().await?;
            if !session.open_edit(&id) {
                bail!("no record with id {id}");
            }
            if let Some(draft) = session.draft_mut() {
                fields.apply(draft);
            }
            warn_on_malformed_birth_date(session);
            session.save().await?;
        }
        Command::Delete { id, yes } => {
            let id = RecordId(id);
            if !yes && !confirm("Delete this record?")? {
                println!("Cancelled");
                return Ok(());
            }
            session.delete(&id).await?;
        }
    }
    Ok(())
}

fn warn_on_malformed_birth_date<A: RecordsApi>(session: &RecordsSession<A>) {
    let malformed = session
        .state()
        .form()
        .draft()
        .is_some_and(PersonRecord::has_malformed_birth_date);
    if malformed {
        eprintln!("note: birth date is not in YYYY-MM-DD form; saving as given");
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

fn report_toast<A: RecordsApi>(session: &RecordsSession<A>) {
    if let Some(toast) = session.state().notifier().current() {
        match toast.severity {
            Severity::Success => println!("{}", toast.message),
            Severity::Error => eprintln!("{}", toast.message),
        }
    }
}

fn print_table(records: &[PersonRecord]) {
    println!(
        "{:<6} {:<20} {:<28} {:>5} {:<14} {:<7} {:>6}",
        "Id", "Name", "Email", "Age", "Country", "Student", "Rating"
    );
    for r in records {
        println!(
            "{:<6} {:<20} {:<28} {:>5} {:<14} {:<7} {:>6}",
            r.id,
            r.name,
            r.email,
            r.age,
            r.country,
            r.student_label(),
            r.rating
        );
    }
}
