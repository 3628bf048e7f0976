use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use std::path::PathBuf;

use portal_core::config::{resolve_with_base, Config};
use portal_core::types::Node;
use portal_session::{Phase, PortalSession};
use portal_state::FileStateStore;

/// Interactive terminal view over the portal core: free text is a debounced
/// query, slash commands drive expansion and rendering.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.portal();
    settings.validate()?;
    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let data_path = resolve_with_base(&base, &settings.data_path);
    let state_path = resolve_with_base(&base, &settings.state_path);

    let store = FileStateStore::new(state_path);
    let mut session = PortalSession::new(store, Duration::from_millis(settings.debounce_ms));

    println!("🔗 Link Portal");
    println!("==============");
    println!("Loading {} ...", data_path.display());
    session.load_from_path(&data_path).await;
    match session.phase() {
        Phase::Ready => {}
        _ => {
            println!("❌ {}", session.error_message().unwrap_or("load failed"));
            std::process::exit(1);
        }
    }
    render(&session);
    session.restore();
    render(&session);
    show_help();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    loop {
        print!("portal> ");
        std::io::stdout().flush()?;
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&mut session, line.trim()) {
                    break;
                }
            }
            () = session.run_pending_search() => {
                render(&session);
            }
        }
    }
    println!("👋 Goodbye!");
    Ok(())
}

/// Returns false when the user asked to quit.
fn handle_line(session: &mut PortalSession<FileStateStore>, input: &str) -> bool {
    let mut parts = input.splitn(2, ' ');
    match parts.next().unwrap_or("") {
        "/help" | "/h" => show_help(),
        "/tree" | "/t" => render(session),
        "/open" | "/o" => {
            if let Some(id) = parts.next() {
                session.toggle(id.trim(), true);
                render(session);
            } else {
                println!("Usage: /open <id>");
            }
        }
        "/close" | "/c" => {
            if let Some(id) = parts.next() {
                session.toggle(id.trim(), false);
                render(session);
            } else {
                println!("Usage: /close <id>");
            }
        }
        "/clear" => {
            session.clear_query();
            render(session);
        }
        "/quit" | "/q" => return false,
        _ => {
            // Anything else is query text; empty input clears the filter.
            session.queue_query(input);
        }
    }
    true
}

fn render(session: &PortalSession<FileStateStore>) {
    let Some(view) = session.view() else { return };
    println!();
    if let Some(count) = session.match_count() {
        if count > 0 {
            println!("🔍 {count} items found");
        }
    }
    if session.no_results() {
        println!("🔍 No results");
        return;
    }
    for node in &view.items {
        render_node(session, node, 0);
    }
    let path = open_path(session, &view.items);
    if !path.is_empty() {
        println!("\nOpen: {}", path.join(" > "));
    }
}

fn render_node(session: &PortalSession<FileStateStore>, node: &Node, depth: usize) {
    let pad = "  ".repeat(depth);
    match node {
        Node::Category { id, title, children, matched } => {
            let state = if session.is_expanded(id) { "[-]" } else { "[+]" };
            let mark = if *matched { " *" } else { "" };
            println!("{pad}{state} {title}{mark}  ({id})");
            if session.is_expanded(id) {
                for child in children {
                    render_node(session, child, depth + 1);
                }
            }
        }
        Node::Link { title, url, .. } => {
            // A link without a URL is unrenderable; skip it silently.
            if let Some(url) = url {
                println!("{pad}    {title} -> {url}");
            }
        }
    }
}

/// Titles of expanded categories, in render order: the breadcrumb line.
fn open_path(session: &PortalSession<FileStateStore>, nodes: &[Node]) -> Vec<String> {
    let mut path = Vec::new();
    for node in nodes {
        if let Node::Category { id, title, children, .. } = node {
            if session.is_expanded(id) {
                path.push(title.clone());
                path.extend(open_path(session, children));
            }
        }
    }
    path
}

fn show_help() {
    println!();
    println!("🎯 Commands:");
    println!("  /open <id>   - expand a category");
    println!("  /close <id>  - collapse a category");
    println!("  /tree        - reprint the current view");
    println!("  /clear       - drop the filter and any pending search");
    println!("  /help        - show this help");
    println!("  /quit        - exit");
    println!("  <text>       - filter the portal (empty line clears)");
}
