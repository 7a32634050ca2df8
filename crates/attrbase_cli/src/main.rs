//! `attrbase` entry point.
//!
//! # Responsibility
//! - Load configuration, initialize logging and open the database.
//! - Dispatch to the HTTP server or to one-shot maintenance commands.

mod config;

use anyhow::{anyhow, Context, Result};
use attrbase_core::db::open_db;
use attrbase_core::{
    preview_batch, AttributeIngestService, AttributeQuery, AttributeQueryService,
    AttributeRepository, SqliteAttributeRepository,
};
use attrbase_http::{build_router, cors_layer, serve, AppState};
use clap::Parser;
use config::{Cli, Command, ServeArgs};
use log::info;
use rusqlite::Connection;
use tokio::net::TcpListener;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    attrbase_core::init_logging(cli.log_level(), cli.log_dir.as_deref())
        .map_err(|err| anyhow!(err))?;

    let conn = open_db(&cli.database)
        .with_context(|| format!("failed to open database `{}`", cli.database.display()))?;

    match cli.command {
        None => run_server(conn, cli.serve),
        Some(Command::Serve(args)) => run_server(conn, args),
        Some(Command::Add { text }) => add_attributes(&conn, &text.join("\n")),
        Some(Command::List { search, limit }) => {
            list_attributes(&conn, AttributeQuery { limit, search })
        }
    }
}

fn run_server(conn: Connection, args: ServeArgs) -> Result<()> {
    let cors = cors_layer(&args.cors_origin)
        .with_context(|| format!("invalid CORS origin `{}`", args.cors_origin))?;
    let router = build_router(AppState::new(conn), cors);

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async move {
        let address = format!("0.0.0.0:{}", args.port);
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("failed to bind {address}"))?;
        println!("> Listening on http://localhost:{}", args.port);
        serve(listener, router).await.context("server error")
    })
}

fn add_attributes(conn: &Connection, input: &str) -> Result<()> {
    let repo = SqliteAttributeRepository::try_new(conn)?;
    let existing = repo
        .list_attributes()?
        .into_iter()
        .map(|attribute| attribute.name)
        .collect::<Vec<_>>();

    let preview = preview_batch(input, &existing);
    for error in &preview.errors {
        eprintln!("⚠ {error}");
    }
    if !preview.is_submittable() {
        println!("Nothing to create.");
        return Ok(());
    }

    let outcome = AttributeIngestService::new(repo).create_attributes(preview.valid.as_slice())?;
    info!(
        "event=cli_add module=cli status=ok created={} skipped={}",
        outcome.created.len(),
        outcome.skipped.len()
    );
    for name in &outcome.created {
        println!("created  {name}");
    }
    for name in &outcome.skipped {
        println!("skipped  {name}");
    }
    Ok(())
}

fn list_attributes(conn: &Connection, query: AttributeQuery) -> Result<()> {
    let repo = SqliteAttributeRepository::try_new(conn)?;
    let list = AttributeQueryService::new(repo).get_attributes(&query)?;

    println!("total: {}", list.total);
    for attribute in &list.data {
        println!("{}\t{}", attribute.id, attribute.name);
    }
    Ok(())
}
