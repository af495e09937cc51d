//! Contactbook CLI
//!
//! # Commands
//!
//! ```bash
//! contactbook sign-up --email ana@x.com --password secret1
//! contactbook sign-in --email ana@x.com --password secret1
//! contactbook import contactos.xlsx          # Bulk import first sheet
//! contactbook list                           # Show contacts
//! contactbook delete 42                      # Delete one contact
//! contactbook serve                          # HTTP API (port 3000)
//! contactbook parse contactos.xlsx           # Just parse to JSON
//! ```
//!
//! The service URL and key come from `SUPABASE_URL` / `SUPABASE_KEY`
//! (a `.env` file is read) or from `--url` / `--key`.

use clap::{Parser, Subcommand};
use contactbook::{
    config::DEFAULT_PORT, parse_file, ContactId, ContactPage, MemoryService, RefreshOutcome,
    SelectedFile, ServiceConfig, SourceFormat, StatusEvent, StatusLevel, StatusReporter,
    SupabaseClient,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "contactbook")]
#[command(about = "Manage contacts stored in a hosted auth/data service", long_about = None)]
struct Cli {
    /// Service URL (overrides SUPABASE_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Service API key (overrides SUPABASE_KEY)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a spreadsheet and output the records as JSON
    Parse {
        /// Input file (xlsx, xls, ods, csv)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Register a new account
    SignUp {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Sign in with email and password
    SignIn {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Import the first sheet of a spreadsheet as contacts
    Import {
        /// Input file (xlsx, xls, ods, csv)
        input: PathBuf,

        /// Sign in first with this email
        #[arg(short, long, requires = "password")]
        email: Option<String>,

        #[arg(short, long, requires = "email")]
        password: Option<String>,
    },

    /// List contacts
    List,

    /// Delete a contact by id
    Delete {
        /// Contact id
        id: String,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Use an in-process service instead of the hosted one
        #[arg(long)]
        in_memory: bool,

        /// Serve the built frontend from this directory
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Serve {
            port,
            in_memory,
            static_dir,
        } => cmd_serve(cli.url, cli.key, port, in_memory, static_dir).await,

        command => match hosted_page(cli.url, cli.key, StatusReporter::quiet()) {
            Ok(page) => run_page_command(&page, command).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Page backed by the hosted service. One-shot commands pass a quiet
/// reporter so their stdout carries only the command's own output.
fn hosted_page(
    url: Option<String>,
    key: Option<String>,
    reporter: StatusReporter,
) -> Result<ContactPage, Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env_with(url, key)?;
    Ok(ContactPage::with_reporter(
        Arc::new(SupabaseClient::new(config)),
        Arc::new(reporter),
    ))
}

async fn run_page_command(page: &ContactPage, command: Commands) -> CliResult {
    match command {
        Commands::SignUp { email, password } => finish(page.sign_up(&email, &password).await),

        Commands::SignIn { email, password } => finish(page.sign_in(&email, &password).await),

        Commands::Import {
            input,
            email,
            password,
        } => cmd_import(page, &input, email.zip(password)).await,

        Commands::List => cmd_list(page).await,

        Commands::Delete { id } => {
            let event = page.delete_contact(&ContactId::from(id.as_str())).await;
            if event.level != StatusLevel::Error {
                print!("{}", page.listing().await);
            }
            finish(event)
        }

        Commands::Parse { .. } | Commands::Serve { .. } => Ok(()),
    }
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> CliResult {
    eprintln!("📄 Parsing: {}", input.display());

    let result = parse_file(input)?;

    match &result.format {
        SourceFormat::Workbook { sheet } => eprintln!("   Sheet: {}", sheet),
        SourceFormat::Delimited {
            encoding,
            delimiter,
        } => {
            eprintln!("   Encoding: {}", encoding);
            eprintln!("   Delimiter: '{}'", format_delimiter(*delimiter));
        }
    }
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(&json, output)?;

    Ok(())
}

async fn cmd_import(
    page: &ContactPage,
    input: &Path,
    credentials: Option<(String, String)>,
) -> CliResult {
    if let Some((email, password)) = credentials {
        let event = page.sign_in(&email, &password).await;
        if event.level == StatusLevel::Error {
            return finish(event);
        }
    }

    eprintln!("📥 Importing: {}", input.display());
    let file = SelectedFile::from_path(input).await?;
    let event = page.import_file(Some(file)).await;

    if event.level != StatusLevel::Error {
        print!("{}", page.listing().await);
    }
    finish(event)
}

async fn cmd_list(page: &ContactPage) -> CliResult {
    match page.load().await {
        RefreshOutcome::Failed(e) => Err(e.into()),
        _ => {
            print!("{}", page.listing().await);
            Ok(())
        }
    }
}

async fn cmd_serve(
    url: Option<String>,
    key: Option<String>,
    port: u16,
    in_memory: bool,
    static_dir: Option<PathBuf>,
) -> CliResult {
    let page = if in_memory {
        eprintln!("🧪 Using in-memory service");
        ContactPage::new(Arc::new(MemoryService::new()))
    } else {
        hosted_page(url, key, StatusReporter::new())?
    };

    page.load().await;
    contactbook::server::start_server(Arc::new(page), port, static_dir).await?;
    Ok(())
}

/// Print the status line; an error status fails the command.
fn finish(event: StatusEvent) -> CliResult {
    match event.level {
        StatusLevel::Error => Err(event.message.into()),
        StatusLevel::Warning => {
            eprintln!("⚠️  {}", event.message);
            Ok(())
        }
        StatusLevel::Info | StatusLevel::Success => {
            eprintln!("✅ {}", event.message);
            Ok(())
        }
    }
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> CliResult {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
