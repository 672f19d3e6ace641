use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mailpanel_core::{AliasId, DomainId, MailboxId, UserId, UserRole};

#[derive(Parser)]
#[command(name = "mailpanel", about = "Administration console for the mail-hosting API", version)]
pub struct Cli {
    /// API base URL (overrides MAILPANEL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Credential file (overrides MAILPANEL_SESSION_FILE)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Answer yes to every destructive-action confirmation
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and store the credential
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out of this session
    Logout,
    /// Sign out of every session of the current account
    LogoutAll,
    /// Show who is signed in
    Whoami,
    /// Show the console view and its tabs
    View,
    /// Change your own password
    Password,
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Domains(DomainsCommand),
    #[command(subcommand)]
    Managers(ManagersCommand),
    #[command(subcommand)]
    Mailboxes(MailboxesCommand),
    #[command(subcommand)]
    Aliases(AliasesCommand),
    /// Audit log, global or for one domain
    Logs {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        domain: Option<DomainId>,
    },
    #[command(subcommand)]
    Footer(FooterCommand),
    #[command(subcommand)]
    Autoresponder(AutoresponderCommand),
}

#[derive(Subcommand)]
pub enum UsersCommand {
    List,
    Create {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "user")]
        role: UserRole,
        #[arg(long)]
        firstname: Option<String>,
        #[arg(long)]
        lastname: Option<String>,
        #[arg(long)]
        inactive: bool,
    },
    Update {
        id: UserId,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<UserRole>,
        #[arg(long)]
        firstname: Option<String>,
        #[arg(long)]
        lastname: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Set a new password for a user
    ResetPassword { id: UserId },
    /// Sign a user out everywhere
    LogoutAll { id: UserId },
}

#[derive(Subcommand)]
pub enum DomainsCommand {
    List,
    Create {
        name: String,
        #[arg(long)]
        inactive: bool,
    },
    Update {
        id: DomainId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a domain with all of its mailboxes and aliases
    Delete { id: DomainId },
}

#[derive(Subcommand)]
pub enum ManagersCommand {
    List { domain: DomainId },
    /// Users that can still be assigned
    Candidates { domain: DomainId },
    Assign { domain: DomainId, user: UserId },
    Unassign { domain: DomainId, user: UserId },
}

#[derive(Subcommand)]
pub enum MailboxesCommand {
    List {
        domain: DomainId,
    },
    Create {
        domain: DomainId,
        /// Local part only
        name: String,
        #[arg(long)]
        inactive: bool,
    },
    Update {
        domain: DomainId,
        id: MailboxId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    ResetPassword {
        domain: DomainId,
        id: MailboxId,
    },
    LogoutAll {
        domain: DomainId,
        id: MailboxId,
    },
    Delete {
        domain: DomainId,
        id: MailboxId,
    },
}

#[derive(Subcommand)]
pub enum AliasesCommand {
    List {
        domain: DomainId,
    },
    Create {
        domain: DomainId,
        /// Source local part
        name: String,
        /// Destination address
        to: String,
    },
    Update {
        domain: DomainId,
        id: AliasId,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        domain: DomainId,
        id: AliasId,
    },
}

#[derive(Subcommand)]
pub enum FooterCommand {
    Show,
    Set { text: String },
    Clear,
}

#[derive(Subcommand)]
pub enum AutoresponderCommand {
    Show,
    Set(AutoresponderArgs),
    Delete,
}

#[derive(Args)]
pub struct AutoresponderArgs {
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub body: String,
    #[arg(long)]
    pub inactive: bool,
    /// e.g. 2025-07-01 or 2025-07-01T08:00
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_nested_commands_and_global_flags() {
        let cli =
            Cli::try_parse_from(["mailpanel", "mailboxes", "delete", "7", "11", "--yes"]).unwrap();
        assert!(cli.yes);
        match cli.command {
            Command::Mailboxes(MailboxesCommand::Delete { domain, id }) => {
                assert_eq!(domain, DomainId::new(7));
                assert_eq!(id, MailboxId::new(11));
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn rejects_non_positive_ids() {
        assert!(Cli::try_parse_from(["mailpanel", "domains", "delete", "0"]).is_err());
        assert!(
            Cli::try_parse_from([
                "mailpanel", "users", "create", "--email", "a@b.c", "--role", "root"
            ])
            .is_err()
        );
    }
}
