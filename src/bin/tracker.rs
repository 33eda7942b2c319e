//! `tracker` - kiosk and admin client for the tracker server

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lab_equipment_tracker::{
    cli::{
        AdminCommand, Cli, Command, ExportTable, OperationArgs,
        output::{format_cards, format_log, parse_filter},
    },
    client::{AdminSession, FileCredentials, HttpRemote, KioskSession},
    domain::{Action, Catalog},
    view::{TimestampFormat, render_admin_logs, render_users},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let remote = HttpRemote::new(cli.url.clone());
    let format = TimestampFormat::local();

    match cli.command {
        Command::Status(cmd) => {
            let session = open_kiosk(remote).await?;
            show_status(&session, &format, cmd.json)
        }
        Command::Log(cmd) => {
            let session = open_kiosk(remote).await?;
            let filter = parse_filter(&cmd.filter, session.catalog())?;
            print!("{}", format_log(&session.log_table(&filter, &format)));
            Ok(())
        }
        Command::Borrow(args) => submit(remote, &args, Action::Borrow, &format).await,
        Command::Return(args) => submit(remote, &args, Action::Return, &format).await,
        Command::Admin(cmd) => {
            let session = AdminSession::new(remote, FileCredentials::new(&cli.token_file));
            handle_admin(session, cmd, &format).await
        }
    }
}

fn lab_catalog() -> anyhow::Result<Catalog> {
    Catalog::lab_default().context("Invalid equipment catalog")
}

/// Kiosk session for read-only commands
///
/// A failed fetch is reported on stderr; the session keeps its empty state
/// and the command still renders.
async fn open_kiosk(remote: HttpRemote) -> anyhow::Result<KioskSession<HttpRemote>> {
    let mut session = KioskSession::new(remote, lab_catalog()?);
    if let Err(e) = session.load().await {
        eprintln!("Could not load state from the server: {}", e);
    }
    Ok(session)
}

/// Kiosk session for submissions, which need the server's current state
async fn load_kiosk(remote: HttpRemote) -> anyhow::Result<KioskSession<HttpRemote>> {
    let mut session = KioskSession::new(remote, lab_catalog()?);
    session.load().await.context("Failed to load state")?;
    Ok(session)
}

fn show_status(
    session: &KioskSession<HttpRemote>,
    format: &TimestampFormat,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let statuses: Vec<_> = session
            .catalog()
            .items()
            .iter()
            .map(|item| {
                serde_json::json!({
                    "key": item.key,
                    "name": item.name,
                    "location": item.location,
                    "status": session.status(&item.key),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    print!("{}", format_cards(&session.cards(format)));
    Ok(())
}

async fn submit(
    remote: HttpRemote,
    args: &OperationArgs,
    action: Action,
    format: &TimestampFormat,
) -> anyhow::Result<()> {
    let mut session = load_kiosk(remote).await?;
    let op = args.to_operation(action);
    let key = op.key.clone();

    let submitted = session.submit(op).await?;
    if !(submitted.record_confirmed && submitted.entry_confirmed) {
        tracing::warn!("Server reply was incomplete; showing local result");
    }

    if let Some(card) = session.card(&key, format) {
        println!(
            "{} {} {}",
            card.item.name,
            card.availability.icon(),
            card.availability.label()
        );
        println!("    {}", card.activity);
        println!("    {}", card.holder);
    }
    Ok(())
}

async fn handle_admin(
    mut session: AdminSession<HttpRemote, FileCredentials>,
    cmd: AdminCommand,
    format: &TimestampFormat,
) -> anyhow::Result<()> {
    match &cmd {
        AdminCommand::Login { email, password } => {
            session.login(email, password).await?;
            println!(
                "Logged in ({} log entries, {} users)",
                session.logs().len(),
                session.users().len()
            );
            return Ok(());
        }
        AdminCommand::Logout => {
            session.logout();
            println!("Logged out");
            return Ok(());
        }
        _ => {}
    }

    if !session.bootstrap().await? {
        anyhow::bail!("Not logged in; run `tracker admin login` first");
    }

    match cmd {
        AdminCommand::Logs => {
            for row in render_admin_logs(session.logs(), format) {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    row.equipment_name,
                    row.full_name,
                    row.student_id,
                    row.phone,
                    row.action,
                    row.timestamp
                );
            }
        }
        AdminCommand::Users => {
            for row in render_users(session.users()) {
                println!("{}\t{}\t{}", row.full_name, row.student_id, row.phone);
            }
        }
        AdminCommand::Export { table, output } => {
            let export = match table {
                ExportTable::Logs => session.export_logs(),
                ExportTable::Users => session.export_users(),
            };
            let path = output.unwrap_or_else(|| export.filename.into());
            std::fs::write(&path, export.body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        AdminCommand::Login { .. } | AdminCommand::Logout => {}
    }
    Ok(())
}
