//! Command-line host for the inventory client.
//!
//! This binary is a thin shell over the library: it turns arguments into
//! [`Event`]s, feeds them to [`handle_event`], carries out the returned
//! [`Action`]s and prints the resulting view model and messages.
//!
//! # Lifecycle
//!
//! 1. **Load**: parse arguments, read config, initialize tracing
//! 2. **Refresh**: load the collection from the service
//! 3. **Command**: translate the subcommand into events
//! 4. **Report**: print rows or the inline/toast messages raised
//!
//! # Commands
//!
//! - `list [--query Q] [--sort FIELD] [--desc]`
//! - `add --id ID --name NAME --price P --quantity Q --category C [--description D]`
//! - `edit ID [--name ..] [--price ..] ...`
//! - `delete ID [--yes]`
//!
//! The exit code is non-zero when the command raised an error message.

use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use stocktake::notify::{Channel, MessageKind};
use stocktake::observability::init_tracing;
use stocktake::remote::HttpRemote;
use stocktake::{handle_event, initialize, Action, App, Config, Event, FormMode, InventoryViewModel, ProductField};

/// Stocktake - inventory service client
#[derive(Parser)]
#[command(name = "stocktake")]
#[command(about = "List, add, edit and delete products in a remote inventory")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Inventory service address (overrides the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Show products, optionally filtered and sorted
    List {
        /// Case-insensitive search over id, name and description
        #[arg(long, default_value = "")]
        query: String,

        /// Column to sort by
        #[arg(long)]
        sort: Option<ProductField>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Create a product
    Add(AddArgs),
    /// Change an existing product
    Edit {
        id: i64,

        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete a product
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    id: String,
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    price: String,
    #[arg(long)]
    quantity: String,
    #[arg(long)]
    category: String,
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    category: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    match run(cli.command, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> stocktake::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    Ok(config)
}

async fn run(command: Command, config: &Config) -> stocktake::Result<ExitCode> {
    let mut app = initialize(config)?;

    handle_event(&mut app, Event::Refresh).await?;
    if report(&app) {
        return Ok(ExitCode::FAILURE);
    }

    match command {
        Command::List { query, sort, desc } => {
            handle_event(&mut app, Event::QueryChanged(query)).await?;
            if let Some(field) = sort {
                handle_event(&mut app, Event::SortBy(field)).await?;
                if desc {
                    handle_event(&mut app, Event::SortBy(field)).await?;
                }
            }
            print_table(&app.compute_viewmodel());
            Ok(ExitCode::SUCCESS)
        }
        Command::Add(args) => {
            let fields = [
                (ProductField::Id, args.id),
                (ProductField::Name, args.name),
                (ProductField::Description, args.description),
                (ProductField::Price, args.price),
                (ProductField::Quantity, args.quantity),
                (ProductField::Category, args.category),
            ];
            submit(&mut app, fields.map(|(field, value)| (field, Some(value)))).await
        }
        Command::Edit { id, fields } => {
            handle_event(&mut app, Event::Edit(id)).await?;
            if app.form.mode() != (FormMode::Edit { id }) {
                eprintln!("error: no product with id {id}");
                return Ok(ExitCode::FAILURE);
            }
            let overrides = [
                (ProductField::Name, fields.name),
                (ProductField::Description, fields.description),
                (ProductField::Price, fields.price),
                (ProductField::Quantity, fields.quantity),
                (ProductField::Category, fields.category),
            ];
            submit(&mut app, overrides).await
        }
        Command::Delete { id, yes } => {
            let (_, actions) = handle_event(&mut app, Event::RequestDelete(id)).await?;
            if actions.is_empty() {
                eprintln!("error: no product with id {id}");
                return Ok(ExitCode::FAILURE);
            }
            for action in actions {
                match action {
                    Action::ConfirmDelete { id, name } => {
                        let event = if yes || confirm(&format!("Delete \"{name}\" (id {id})?"))? {
                            Event::DeleteConfirmed(id)
                        } else {
                            Event::DeleteDeclined(id)
                        };
                        handle_event(&mut app, event).await?;
                    }
                }
            }
            Ok(exit_code(report(&app)))
        }
    }
}

async fn submit<const N: usize>(
    app: &mut App<HttpRemote>,
    fields: [(ProductField, Option<String>); N],
) -> stocktake::Result<ExitCode> {
    for (field, value) in fields {
        if let Some(value) = value {
            handle_event(app, Event::FieldChanged { field, value }).await?;
        }
    }
    handle_event(app, Event::Submit).await?;
    Ok(exit_code(report(app)))
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Prints pending inline and toast messages. Returns true if any is an error.
fn report(app: &App<HttpRemote>) -> bool {
    let mut failed = false;
    for channel in [Channel::Inline, Channel::Toast] {
        if let Some(message) = app.notifier.current(channel) {
            failed |= message.kind == MessageKind::Error;
            if message.kind == MessageKind::Error {
                eprintln!("{}: {}", message.kind, message.text);
            } else {
                println!("{}: {}", message.kind, message.text);
            }
        }
    }
    failed
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_table(view: &InventoryViewModel) {
    println!("{} ({} products)", view.header.title, view.header.total);

    let headers: Vec<String> = view
        .columns
        .iter()
        .map(|column| match column.sort {
            Some(direction) => format!("{} ({direction})", column.label),
            None => column.label.to_string(),
        })
        .collect();
    println!("{}", headers.join("\t"));

    if let Some(empty) = &view.empty_state {
        println!("{}", empty.message);
        return;
    }
    for row in &view.rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.id, row.name, row.description, row.price, row.quantity, row.category
        );
    }
}
