//! CLI command implementations

use anyhow::{Result, bail};
use colored::Colorize;
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};
use tkt_core::{LoadOutcome, Priority, Store, Ticket};

/// Open the store, warning when the file had to be recovered
fn open_store(path: &Path) -> Result<Store> {
    let store = Store::open(path)?;
    if store.load_outcome() == LoadOutcome::Recovered {
        eprintln!(
            "{} {} was unreadable; starting from an empty store (the file is kept as-is until the next change)",
            "!".yellow(),
            path.display()
        );
    }
    Ok(store)
}

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Description")]
    description: String,
}

impl TicketRow {
    fn new(id: u64, ticket: &Ticket) -> Self {
        Self {
            id,
            priority: ticket.priority.to_string(),
            status: if ticket.status { "open" } else { "closed" },
            description: ticket.description.clone(),
        }
    }
}

fn print_rows(store: &Store, ids: &[u64]) {
    let rows: Vec<TicketRow> = ids
        .iter()
        .filter_map(|&id| store.get(id).map(|t| TicketRow::new(id, t)))
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}

fn print_json_entries(store: &Store, ids: &[u64]) -> Result<()> {
    let entries: Vec<serde_json::Value> = ids
        .iter()
        .filter_map(|&id| {
            store
                .get(id)
                .map(|t| serde_json::json!({ "id": id, "ticket": t }))
        })
        .collect();
    println!("{}", serde_json::to_string(&entries)?);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::Write::flush(&mut std::io::stdout())?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

pub fn create(db: &Path, description: &str, priority: &str, json: bool) -> Result<()> {
    // Validate here; the store itself accepts any priority string
    let priority: Priority = priority.parse()?;
    let mut store = open_store(db)?;

    let id = store.create(Ticket::new(description.to_string(), priority))?;

    if json {
        println!(r#"{{"id": {}}}"#, id);
    } else {
        println!("{} Created ticket {}", "✓".green(), id);
        println!("  Description: {}", description);
    }

    Ok(())
}

pub fn show(db: &Path, id: u64, json: bool) -> Result<()> {
    let store = open_store(db)?;
    let ticket = store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Ticket not found: {}", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(ticket)?);
    } else {
        println!("{} {}", format!("#{}", id).cyan().bold(), ticket.description.bold());
        println!();
        println!("Status:   {}", if ticket.status { "open" } else { "closed" });
        println!("Priority: {}", ticket.priority);
    }

    Ok(())
}

pub fn search(db: &Path, text: &str, json: bool) -> Result<()> {
    let store = open_store(db)?;
    let ids = store.find_by_description(text);

    if json {
        print_json_entries(&store, &ids)?;
    } else if ids.is_empty() {
        println!("No tickets found");
    } else {
        print_rows(&store, &ids);
    }

    Ok(())
}

pub fn list(db: &Path, by_priority: bool, descending: bool, json: bool) -> Result<()> {
    let store = open_store(db)?;
    let ids = if by_priority {
        store.list_by_priority(descending)
    } else {
        store.ids()
    };

    if json {
        print_json_entries(&store, &ids)?;
    } else if ids.is_empty() {
        println!("No tickets found");
    } else {
        print_rows(&store, &ids);
    }

    Ok(())
}

pub fn close(db: &Path, id: u64, json: bool) -> Result<()> {
    let mut store = open_store(db)?;

    if !store.close(id)? {
        bail!("Ticket not found: {}", id);
    }

    if json {
        println!(r#"{{"id": {}, "closed": true}}"#, id);
    } else {
        println!("{} Closed ticket {}", "✓".green(), id);
    }

    Ok(())
}

pub fn stats(db: &Path, json: bool) -> Result<()> {
    let store = open_store(db)?;
    let stats = store.statistics();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", "Ticket statistics".bold());
        println!();
        println!("Total:  {}", stats.total);
        println!("Closed: {}", stats.closed);
        println!();
        println!("{}", "By priority".bold());
        println!("  high:         {}", stats.by_priority.high);
        println!("  medium:       {}", stats.by_priority.medium);
        println!("  low:          {}", stats.by_priority.low);
        println!("  NullPriority: {}", stats.by_priority.null_priority);
    }

    Ok(())
}

pub fn clean(db: &Path, force: bool) -> Result<()> {
    let mut store = open_store(db)?;
    let closed = store.statistics().closed;

    if closed == 0 {
        println!("No closed tickets to remove");
        return Ok(());
    }

    if !force && !confirm(&format!("Remove {} closed ticket(s)?", closed))? {
        println!("Aborted");
        return Ok(());
    }

    store.clean_finished()?;
    println!("{} Removed {} closed ticket(s)", "✓".green(), closed);

    Ok(())
}

pub fn reverse(db: &Path, json: bool) -> Result<()> {
    let store = open_store(db)?;
    let ids: Vec<u64> = store.reversed().into_iter().map(|(id, _)| id).collect();

    if json {
        print_json_entries(&store, &ids)?;
    } else if ids.is_empty() {
        println!("No tickets found");
    } else {
        print_rows(&store, &ids);
    }

    Ok(())
}

pub fn reset(db: &Path, force: bool) -> Result<()> {
    let mut store = open_store(db)?;

    if !force {
        println!(
            "{}",
            "This will delete every ticket and reset the id counter.".red()
        );
        if !confirm("Continue?")? {
            println!("Aborted");
            return Ok(());
        }
    }

    store.reset()?;
    println!("{} Store reset", "✓".green());

    Ok(())
}
