//! Plain-text output of console state.

use mailpanel_auth::{Capabilities, Identity, Role};
use mailpanel_client::{ConsoleView, LoadState};
use mailpanel_core::{Alias, AuditLogPage, Autoresponder, Domain, Mailbox, User};

pub fn view(view: &ConsoleView) {
    match view {
        ConsoleView::CredentialEntry => {
            println!("Not signed in. Run `mailpanel login --email <address>`.")
        }
        ConsoleView::Management { identity, tabs } => {
            println!("Management console: {} ({})", identity.email(), identity.role().label());
            print_tabs(tabs);
        }
        ConsoleView::SelfService { identity, tabs } => {
            println!("Self-service console: {}", identity.email);
            print_tabs(tabs);
        }
    }
}

fn print_tabs(tabs: &[mailpanel_auth::Screen]) {
    let labels: Vec<&str> = tabs.iter().map(|t| t.label()).collect();
    println!("Tabs: {}", labels.join(" | "));
}

pub fn identity(identity: &Identity) {
    match identity {
        Identity::Administrator(staff) | Identity::Manager(staff) => {
            println!("id:    {}", staff.id);
            println!("email: {}", staff.email);
            let name = format!(
                "{} {}",
                staff.firstname.as_deref().unwrap_or(""),
                staff.lastname.as_deref().unwrap_or("")
            );
            if !name.trim().is_empty() {
                println!("name:  {}", name.trim());
            }
        }
        Identity::Mailbox(mailbox) => {
            println!("id:    {}", mailbox.id);
            println!("email: {}", mailbox.email);
            println!("autoresponder active: {}", yes_no(mailbox.has_active_autoresponder));
        }
    }
    println!("role:  {}", identity.role().label());

    let capabilities = Capabilities::for_identity(Some(identity));
    let granted: Vec<&str> = capabilities.permissions().map(|p| p.as_str()).collect();
    println!("permissions: {}", granted.join(", "));
}

/// Print the list, or the load error when nothing is shown.
pub fn list<T>(state: &LoadState<Vec<T>>, empty: &str, row: impl Fn(&T) -> String) {
    if let Some(error) = &state.error {
        eprintln!("error: {error}");
    }
    if state.data.is_empty() && state.error.is_none() {
        println!("{empty}");
    }
    for item in &state.data {
        println!("{}", row(item));
    }
}

pub fn user_row(user: &User) -> String {
    format!(
        "{:>5}  {:<32} {:<15} {:<24} {}",
        user.id,
        user.email,
        Role::from(user.role).label(),
        user.display_name(),
        active(user.active)
    )
}

pub fn domain_row(domain: &Domain) -> String {
    format!("{:>5}  {:<40} {}", domain.id, domain.name, active(domain.active))
}

pub fn mailbox_row(mailbox: &Mailbox, domain_name: &str) -> String {
    format!(
        "{:>5}  {:<40} {}{}",
        mailbox.id,
        mailbox.address(domain_name),
        active(mailbox.active),
        if mailbox.has_active_autoresponder { "  [autoresponder]" } else { "" }
    )
}

pub fn alias_row(alias: &Alias) -> String {
    format!(
        "{:>5}  {:<32} -> {:<32} {}",
        alias.id,
        alias.full_address(),
        alias.to,
        active(alias.active)
    )
}

pub fn audit_page(page: &AuditLogPage) {
    if let Some(name) = &page.domain_name {
        println!("Domain: {name}");
    }
    if page.logs.is_empty() {
        println!("No log entries.");
    }
    for entry in &page.logs {
        let when = entry
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{when}  {:<9} {:<36} {:?}/{:<6} {:?}",
            format!("{:?}", entry.event_type.severity()),
            entry.event_type.display(),
            entry.actor_type,
            entry.actor_id,
            entry.status,
        );
    }
    let p = &page.pagination;
    println!(
        "Page {} of {} ({} entries){}{}",
        p.page,
        p.total_pages.max(1),
        p.total_items,
        if p.has_previous() { "  [previous]" } else { "" },
        if p.has_next() { "  [next]" } else { "" },
    );
}

pub fn autoresponder(current: Option<&Autoresponder>) {
    let Some(ar) = current else {
        println!("No autoresponder configured. Create one with `mailpanel autoresponder set`.");
        return;
    };
    println!("subject: {}", ar.subject);
    println!("active:  {}", yes_no(ar.active));
    if let Some(start) = ar.start_date {
        println!("from:    {}", start.format("%Y-%m-%d %H:%M"));
    }
    if let Some(end) = ar.end_date {
        println!("until:   {}", end.format("%Y-%m-%d %H:%M"));
    }
    println!();
    println!("{}", ar.body);
}

fn active(flag: bool) -> &'static str {
    if flag { "active" } else { "inactive" }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
