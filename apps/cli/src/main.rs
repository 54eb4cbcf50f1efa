//! # bookstore: Command-Line Bookstore Client
//!
//! Commands:
//! - `bookstore books` - browse and filter the catalog
//! - `bookstore cart` - view and change the session's cart
//! - `bookstore order` - place an order, list orders
//! - `bookstore admin` - manage books and order statuses
//! - `bookstore register` / `login` / `logout` - account and session
//! - `bookstore config` - show or initialize configuration
//!
//! ## Logging
//! Logs go to stderr so `--json` output on stdout stays parseable.
//! - `RUST_LOG=debug` - everything at debug
//! - `RUST_LOG=bookstore_client=trace` - request-level detail
//! - `--verbose` - debug for bookstore crates when `RUST_LOG` is unset

mod commands;
mod context;
mod output;

use anyhow::Result;
use bookstore_client::ClientError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::{AdminArgs, BooksArgs, CartArgs, ConfigArgs, LoginArgs, OrderArgs, RegisterArgs};

/// Browse books, manage a cart, and place orders against the bookstore API
#[derive(Parser, Debug)]
#[command(name = "bookstore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List books, optionally filtered
    Books(BooksArgs),

    /// View and change the cart
    Cart(CartArgs),

    /// Place and list orders
    Order(OrderArgs),

    /// Admin: manage books and orders
    Admin(AdminArgs),

    /// Create a new account
    Register(RegisterArgs),

    /// Store an access token for this session
    Login(LoginArgs),

    /// Forget the stored access token
    Logout,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    // `config` must work even when the current config is broken.
    let result = match cli.command {
        Commands::Config(args) => commands::config::run(args, cli.config, &output),
        command => match context::Context::load(cli.config, output.clone()) {
            Ok(ctx) => dispatch(command, &ctx).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        output.error(&describe(&e));
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

async fn dispatch(command: Commands, ctx: &context::Context) -> Result<()> {
    match command {
        Commands::Books(args) => commands::books::run(args, ctx).await,
        Commands::Cart(args) => commands::cart::run(args, ctx).await,
        Commands::Order(args) => commands::order::run(args, ctx).await,
        Commands::Admin(args) => commands::admin::run(args, ctx).await,
        Commands::Register(args) => commands::account::register(args, ctx).await,
        Commands::Login(args) => commands::account::login(args, ctx),
        Commands::Logout => commands::account::logout(ctx),
        Commands::Config(args) => {
            commands::config::run(args, ctx.config_path.clone(), &ctx.output)
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,bookstore_core=debug,bookstore_client=debug,bookstore=debug,reqwest=warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A client error's own user message, else the full anyhow chain.
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ClientError>() {
        Some(client) => client.user_message(),
        None => format!("{:#}", err),
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ClientError>() {
        Some(e) if e.is_auth_error() => 2,
        Some(e) if e.is_config_error() => 3,
        _ => 1,
    }
}
