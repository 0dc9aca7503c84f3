// command-palette - one search box for commands, notes, notebooks, tags and reminders
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use anyhow::{Context, Result};
use command_palette_lib::{
    config::PaletteConfig,
    core::{
        CommandRegistry, EntityKind, Mode, OpenSession, Outcome, PaletteSession, RecencyCache,
        RegistryEntry, SourceAggregator, RECENT_GROUP,
    },
    db::EntityInput,
    navigation::{DispatchTable, NavEvent, NavigationRequest, Navigator},
    Database,
};
use std::env;
use std::sync::Arc;

type CliSession = PaletteSession<Database, Database, Vec<OpenSession>>;

/// Prints where the host would navigate to
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, request: NavigationRequest) {
        match request {
            NavigationRequest::OpenNote(id) => println!("→ open note {}", id),
            NavigationRequest::Notebook(id) => println!("→ show notebook {}", id),
            NavigationRequest::Tag(id) => println!("→ show tag {}", id),
            NavigationRequest::EditReminder(id) => println!("→ edit reminder {}", id),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let config = PaletteConfig::load().context("loading config")?;
    let command = &args[1];

    let result = match command.as_str() {
        "search" => handle_search(&config, &args[2..]).await,
        "run" => handle_run(&config, &args[2..]).await,
        "recent" => handle_recent(&config).await,
        "forget" => handle_forget(&config, &args[2..]).await,
        "index" => handle_index(&config, &args[2..]).await,
        "version" | "-v" | "--version" => {
            println!("command-palette v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    };

    result.map_err(|e| match e.downcast_ref::<command_palette_lib::PaletteError>() {
        Some(palette) => anyhow::anyhow!(palette.user_message()),
        None => e,
    })
}

async fn handle_search(config: &PaletteConfig, args: &[String]) -> Result<()> {
    let query = args.join(" ");
    let mut session = open_session(config).await?;
    session.update_query(&query).await;

    print_results(config, &session);
    Ok(())
}

async fn handle_run(config: &PaletteConfig, args: &[String]) -> Result<()> {
    let mut query_parts = Vec::new();
    let mut row = 0usize;
    let mut col = 0usize;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--row" => {
                i += 1;
                row = parse_flag(args.get(i), "--row")?;
            }
            "--col" => {
                i += 1;
                col = parse_flag(args.get(i), "--col")?;
            }
            arg => query_parts.push(arg.to_string()),
        }
        i += 1;
    }

    let mut session = open_session(config).await?;
    if !query_parts.is_empty() {
        session.update_query(&query_parts.join(" ")).await;
    }

    if session.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for _ in 0..row {
        session.handle(NavEvent::MoveDown).await;
    }
    for _ in 0..col {
        session.handle(NavEvent::MoveRight).await;
    }

    match session.handle(NavEvent::Activate).await {
        Outcome::Close => {}
        Outcome::Stay => {
            println!("Removed from recent.");
            print_results(config, &session);
        }
    }

    Ok(())
}

async fn handle_recent(config: &PaletteConfig) -> Result<()> {
    let db = get_database(config).await?;
    let entries = RecencyCache::new(db.clone()).read().await;
    db.close().await;

    if entries.is_empty() {
        println!("Nothing used recently.");
        return Ok(());
    }

    println!("\n{}:", config.labels.recent);
    for (i, cmd) in entries.iter().enumerate() {
        println!("{:3}. {} [{}] ({})", i + 1, cmd.title, cmd.kind, cmd.id);
    }

    Ok(())
}

async fn handle_forget(config: &PaletteConfig, args: &[String]) -> Result<()> {
    let Some(id) = args.first() else {
        eprintln!("Error: No id provided");
        return Ok(());
    };

    let db = get_database(config).await?;
    RecencyCache::new(db.clone()).remove(id).await;
    db.close().await;
    Ok(())
}

async fn handle_index(config: &PaletteConfig, args: &[String]) -> Result<()> {
    if args.len() < 3 {
        eprintln!("Usage: command-palette index <note|notebook|tag|reminder> <id> <title...>");
        return Ok(());
    }

    let kind: EntityKind = args[0].parse()?;
    let input = EntityInput {
        id: args[1].clone(),
        kind,
        title: args[2..].join(" "),
    };

    let db = get_database(config).await?;
    db.upsert_entity(input).await?;
    db.close().await;
    println!("Indexed {} {}", kind, args[1]);
    Ok(())
}

fn parse_flag(value: Option<&String>, flag: &str) -> Result<usize> {
    value
        .and_then(|v| v.parse().ok())
        .with_context(|| format!("{} expects a number", flag))
}

fn print_results(config: &PaletteConfig, session: &CliSession) {
    let list = session.list();
    if list.is_empty() {
        println!("No results.");
        return;
    }

    let mut offset = 0;
    for run in session.summary() {
        let header = if run.group == RECENT_GROUP {
            config.labels.recent.as_str()
        } else {
            run.group.as_str()
        };
        println!("\n{}", header);
        println!("{}", "-".repeat(40));

        for (row, cmd) in list[offset..offset + run.count].iter().enumerate() {
            println!("{:3}. {}", offset + row, cmd.display_title());
        }
        offset += run.count;
    }
    println!();
}

async fn open_session(config: &PaletteConfig) -> Result<CliSession> {
    let db = get_database(config).await?;
    let registry = Arc::new(builtin_registry());

    let aggregator = SourceAggregator::new(
        Arc::clone(&registry),
        db.clone(),
        Vec::new(),
        config.labels.clone(),
        config.search.limit,
    );
    let dispatch = DispatchTable::new(registry, Arc::new(PrintNavigator));

    let mut session = PaletteSession::new(config, aggregator, RecencyCache::new(db), dispatch);
    session.open(Mode::Search).await;
    Ok(session)
}

fn builtin_registry() -> CommandRegistry {
    let say = |msg: &'static str| move |id: &str| println!("→ {} ({})", msg, id);

    CommandRegistry::new(vec![
        RegistryEntry::new("new-note", "New note", "Notes", say("creating a note")),
        RegistryEntry::new("new-notebook", "New notebook", "Notes", say("creating a notebook")),
        RegistryEntry::new("new-reminder", "New reminder", "Notes", say("creating a reminder")),
        RegistryEntry::new("toggle-sidebar", "Toggle sidebar", "View", say("toggling sidebar")),
        RegistryEntry::new("zoom-reset", "Reset zoom", "View", say("resetting zoom")),
        RegistryEntry::new("sync", "Synchronise now", "General", say("synchronising")),
        RegistryEntry::new("open-settings", "Open settings", "General", say("opening settings")),
        RegistryEntry::new("reopen-closed", "Reopen closed note", "General", say("reopening"))
            .dynamic(),
        RegistryEntry::new("debug-info", "Show debug info", "Developer", say("dumping state"))
            .hidden_when(|| env::var_os("PALETTE_DEBUG").is_none()),
    ])
}

async fn get_database(config: &PaletteConfig) -> Result<Database> {
    let path = config.database_path()?;
    Database::new(&path)
        .await
        .with_context(|| format!("opening database at {}", path.display()))
}

fn print_usage() {
    println!(
        r#"command-palette v{} - commands, notes and tags in one search box

USAGE:
    command-palette <COMMAND> [OPTIONS]

COMMANDS:
    search <query>                 Show ranked, grouped results
                                   (start the query with '>' for commands only)
    run <query> [--row N] [--col N]
                                   Activate the result at row N
                                   (--col 1 on a recent row forgets it)
    recent                         Show recently used entries
    forget <id>                    Remove an entry from recent
    index <kind> <id> <title>      Add a note, notebook, tag or reminder
    version                        Show version
    help                           Show this help

EXAMPLES:
    command-palette index note n1 Groceries for the week
    command-palette search groc
    command-palette search '>sync'
    command-palette run '>settings'

Set RUST_LOG=debug to see what the pipeline is doing.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
