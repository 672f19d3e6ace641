//! Dispatch of parsed commands onto the console.

use anyhow::{Context, Result, bail};
use mailpanel_client::{
    Ack, ApiClient, ApiError, AuditFeed, Console, ConsoleView, DomainDetail, DomainsScreen, Outcome,
    ScopedLoaders, SelfService, UsersScreen, messages,
};
use mailpanel_core::{
    AutoresponderDraft, CreateAlias, CreateDomain, CreateMailbox, CreateUser, Domain, DomainId,
    PasswordChange, PasswordReset, UpdateAlias, UpdateDomain, UpdateMailbox, UpdateUser, timestamp,
};

use crate::args::{
    AliasesCommand, AutoresponderArgs, AutoresponderCommand, Command, DomainsCommand, FooterCommand,
    MailboxesCommand, ManagersCommand, UsersCommand,
};
use crate::prompt::{self, PromptConfirmer};
use crate::render;

pub async fn run(console: &Console, command: Command, confirmer: &PromptConfirmer) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt::password("Password")?,
            };
            let view = console
                .login(&email, &password)
                .await
                .map_err(|e| user_error(e, messages::LOGIN_FAILED))?;
            render::view(&view);
        }
        Command::Logout => {
            render::view(&console.logout().await);
        }
        Command::LogoutAll => {
            signed_in(console)?;
            let outcome = console
                .logout_all(confirmer)
                .await
                .map_err(|e| user_error(e, messages::LOGOUT_ALL))?;
            match outcome {
                Outcome::Completed(view) => render::view(&view),
                Outcome::Abandoned => println!("Cancelled."),
            }
        }
        Command::Whoami => {
            signed_in(console)?;
            if let Some(identity) = console.api().session().identity() {
                render::identity(&identity);
            }
        }
        Command::View => render::view(&console.view()),
        Command::Password => {
            signed_in(console)?;
            let current = prompt::password("Current password")?;
            let (new, repeat) = prompt::new_password("New password")?;
            let change = PasswordChange::new(current, new, &repeat)
                .map_err(|e| user_error(e.into(), ""))?;
            let ack = SelfService::new(console.api().clone())
                .change_password(&change)
                .await
                .map_err(|e| user_error(e, messages::CHANGE_PASSWORD))?;
            done(&ack, "Password changed.");
        }
        Command::Users(cmd) => {
            signed_in(console)?;
            users(console.api(), cmd, confirmer).await?;
        }
        Command::Domains(cmd) => {
            signed_in(console)?;
            domains(console.api(), cmd, confirmer).await?;
        }
        Command::Managers(cmd) => {
            signed_in(console)?;
            managers(console.api(), cmd, confirmer).await?;
        }
        Command::Mailboxes(cmd) => {
            signed_in(console)?;
            mailboxes(console.api(), cmd, confirmer).await?;
        }
        Command::Aliases(cmd) => {
            signed_in(console)?;
            aliases(console.api(), cmd, confirmer).await?;
        }
        Command::Logs { page, domain } => {
            signed_in(console)?;
            let feed = match domain {
                Some(domain) => AuditFeed::for_domain(console.api().clone(), domain),
                None => AuditFeed::global(console.api().clone()),
            };
            feed.load(page).await.map_err(|e| user_error(e, messages::LOAD_LOGS))?;
            if let Some(page) = feed.state().data {
                render::audit_page(&page);
            }
        }
        Command::Footer(cmd) => {
            signed_in(console)?;
            footer(console.api(), cmd).await?;
        }
        Command::Autoresponder(cmd) => {
            signed_in(console)?;
            autoresponder(console.api(), cmd, confirmer).await?;
        }
    }
    Ok(())
}

fn signed_in(console: &Console) -> Result<()> {
    if console.view() == ConsoleView::CredentialEntry {
        bail!("not signed in; run `mailpanel login --email <address>`");
    }
    Ok(())
}

/// The one user-facing message for a failed call.
fn user_error(err: ApiError, fallback: &str) -> anyhow::Error {
    tracing::debug!(error = %err, "command failed");
    anyhow::anyhow!(err.user_message(fallback))
}

fn done(ack: &Ack, fallback: &str) {
    println!("{}", ack.message_or(fallback));
}

fn report(outcome: Outcome<Ack>, fallback: &str) {
    match outcome {
        Outcome::Completed(ack) => done(&ack, fallback),
        Outcome::Abandoned => println!("Cancelled."),
    }
}

/// Domain by id from the caller's own domain list.
///
/// An id outside that list still gets a detail screen, so the server decides
/// whether the caller may see it.
async fn domain_detail(api: &ApiClient, id: DomainId) -> Result<DomainDetail> {
    let domains = ScopedLoaders::new(api)
        .domains()
        .await
        .map_err(|e| user_error(e, messages::LOAD_DOMAINS))?;
    let domain = domains.into_iter().find(|d| d.id == id).unwrap_or_else(|| Domain {
        id,
        name: format!("domain-{id}"),
        active: true,
        created_at: None,
        updated_at: None,
    });
    Ok(DomainDetail::new(api.clone(), domain))
}

async fn users(api: &ApiClient, cmd: UsersCommand, confirmer: &PromptConfirmer) -> Result<()> {
    let screen = UsersScreen::new(api.clone());
    match cmd {
        UsersCommand::List => {
            let _ = screen.load().await;
            render::list(&screen.state(), "No users.", render::user_row);
        }
        UsersCommand::Create {
            email,
            role,
            firstname,
            lastname,
            inactive,
        } => {
            let (password, repeat) = prompt::new_password("Password")?;
            PasswordReset::new(password.clone(), &repeat).map_err(|e| user_error(e.into(), ""))?;
            let user = screen
                .create(&CreateUser {
                    email,
                    password,
                    firstname,
                    lastname,
                    role,
                    active: !inactive,
                })
                .await
                .map_err(|e| user_error(e, messages::SAVE_USER))?;
            println!("Created user {} ({}).", user.email, user.id);
        }
        UsersCommand::Update {
            id,
            email,
            role,
            firstname,
            lastname,
            active,
        } => {
            let user = screen
                .update(
                    id,
                    &UpdateUser {
                        email,
                        firstname,
                        lastname,
                        role,
                        active,
                    },
                )
                .await
                .map_err(|e| user_error(e, messages::SAVE_USER))?;
            println!("Updated user {}.", user.email);
        }
        UsersCommand::ResetPassword { id } => {
            let (password, repeat) = prompt::new_password("New password")?;
            let reset =
                PasswordReset::new(password, &repeat).map_err(|e| user_error(e.into(), ""))?;
            let ack = screen
                .reset_password(id, &reset)
                .await
                .map_err(|e| user_error(e, messages::SAVE_USER))?;
            done(&ack, "Password updated.");
        }
        UsersCommand::LogoutAll { id } => {
            let user = api.users().get(id).await.map_err(|e| user_error(e, messages::LOAD_USERS))?;
            let outcome = screen
                .logout_all(confirmer, &user)
                .await
                .map_err(|e| user_error(e, messages::LOGOUT_ALL))?;
            report(outcome, "Sessions ended.");
        }
    }
    Ok(())
}

async fn domains(api: &ApiClient, cmd: DomainsCommand, confirmer: &PromptConfirmer) -> Result<()> {
    let screen = DomainsScreen::new(api.clone());
    match cmd {
        DomainsCommand::List => {
            let _ = screen.load().await;
            render::list(&screen.state(), "No domains.", render::domain_row);
        }
        DomainsCommand::Create { name, inactive } => {
            let cmd = CreateDomain::new(name, !inactive).map_err(|e| user_error(e.into(), ""))?;
            let domain = screen
                .create(&cmd)
                .await
                .map_err(|e| user_error(e, messages::SAVE_DOMAIN))?;
            println!("Created domain {} ({}).", domain.name, domain.id);
        }
        DomainsCommand::Update { id, name, active } => {
            let domain = screen
                .update(id, &UpdateDomain { name, active })
                .await
                .map_err(|e| user_error(e, messages::SAVE_DOMAIN))?;
            println!("Updated domain {}.", domain.name);
        }
        DomainsCommand::Delete { id } => {
            let _ = screen.load().await;
            let domain = screen
                .state()
                .data
                .into_iter()
                .find(|d| d.id == id)
                .with_context(|| format!("domain {id} is not in your domain list"))?;
            let outcome = screen
                .delete(confirmer, &domain)
                .await
                .map_err(|e| user_error(e, messages::DELETE_DOMAIN))?;
            report(outcome, "Domain deleted.");
        }
    }
    Ok(())
}

async fn managers(
    api: &ApiClient,
    cmd: ManagersCommand,
    confirmer: &PromptConfirmer,
) -> Result<()> {
    match cmd {
        ManagersCommand::List { domain } => {
            let detail = domain_detail(api, domain).await?;
            let _ = detail.load_managers().await;
            render::list(&detail.managers(), "No managers.", render::user_row);
        }
        ManagersCommand::Candidates { domain } => {
            let detail = domain_detail(api, domain).await?;
            let candidates = detail
                .manager_candidates()
                .await
                .map_err(|e| user_error(e, messages::LOAD_USERS))?;
            if candidates.is_empty() {
                println!("Every user already manages this domain.");
            }
            for user in &candidates {
                println!("{}", render::user_row(user));
            }
        }
        ManagersCommand::Assign { domain, user } => {
            let detail = domain_detail(api, domain).await?;
            let ack = detail
                .assign_manager(user)
                .await
                .map_err(|e| user_error(e, messages::ASSIGN_MANAGER))?;
            done(&ack, "Manager assigned.");
        }
        ManagersCommand::Unassign { domain, user } => {
            let detail = domain_detail(api, domain).await?;
            detail
                .load_managers()
                .await
                .map_err(|e| user_error(e, messages::LOAD_MANAGERS))?;
            let manager = detail
                .managers()
                .data
                .into_iter()
                .find(|u| u.id == user)
                .with_context(|| format!("user {user} does not manage {}", detail.domain().name))?;
            let outcome = detail
                .unassign_manager(confirmer, &manager)
                .await
                .map_err(|e| user_error(e, messages::UNASSIGN_MANAGER))?;
            report(outcome, "Manager removed.");
        }
    }
    Ok(())
}

async fn mailboxes(
    api: &ApiClient,
    cmd: MailboxesCommand,
    confirmer: &PromptConfirmer,
) -> Result<()> {
    match cmd {
        MailboxesCommand::List { domain } => {
            let detail = domain_detail(api, domain).await?;
            let _ = detail.load_mailboxes().await;
            let name = detail.domain().name.clone();
            render::list(&detail.mailboxes(), "No mailboxes.", |m| render::mailbox_row(m, &name));
        }
        MailboxesCommand::Create { domain, name, inactive } => {
            let detail = domain_detail(api, domain).await?;
            let (password, repeat) = prompt::new_password("Password")?;
            PasswordReset::new(password.clone(), &repeat).map_err(|e| user_error(e.into(), ""))?;
            let mailbox = detail
                .create_mailbox(&CreateMailbox {
                    name,
                    password,
                    active: !inactive,
                })
                .await
                .map_err(|e| user_error(e, messages::SAVE_MAILBOX))?;
            println!("Created mailbox {}.", detail.address_of(&mailbox));
        }
        MailboxesCommand::Update {
            domain,
            id,
            name,
            active,
        } => {
            let (detail, mailbox) = find_mailbox(api, domain, id).await?;
            let updated = detail
                .update_mailbox(&mailbox, &UpdateMailbox { name, active })
                .await
                .map_err(|e| user_error(e, messages::SAVE_MAILBOX))?;
            println!("Updated mailbox {}.", detail.address_of(&updated));
        }
        MailboxesCommand::ResetPassword { domain, id } => {
            let (detail, mailbox) = find_mailbox(api, domain, id).await?;
            let (password, repeat) = prompt::new_password("New password")?;
            let reset =
                PasswordReset::new(password, &repeat).map_err(|e| user_error(e.into(), ""))?;
            let ack = detail
                .reset_mailbox_password(&mailbox, &reset)
                .await
                .map_err(|e| user_error(e, messages::SAVE_MAILBOX))?;
            done(&ack, "Password updated.");
        }
        MailboxesCommand::LogoutAll { domain, id } => {
            let (detail, mailbox) = find_mailbox(api, domain, id).await?;
            let outcome = detail
                .logout_all_mailbox(confirmer, &mailbox)
                .await
                .map_err(|e| user_error(e, messages::LOGOUT_ALL))?;
            report(outcome, "Sessions ended.");
        }
        MailboxesCommand::Delete { domain, id } => {
            let (detail, mailbox) = find_mailbox(api, domain, id).await?;
            let outcome = detail
                .delete_mailbox(confirmer, &mailbox)
                .await
                .map_err(|e| user_error(e, messages::DELETE_MAILBOX))?;
            report(outcome, "Mailbox deleted.");
        }
    }
    Ok(())
}

async fn find_mailbox(
    api: &ApiClient,
    domain: DomainId,
    id: mailpanel_core::MailboxId,
) -> Result<(DomainDetail, mailpanel_core::Mailbox)> {
    let detail = domain_detail(api, domain).await?;
    detail
        .load_mailboxes()
        .await
        .map_err(|e| user_error(e, messages::LOAD_MAILBOXES))?;
    let mailbox = detail
        .mailboxes()
        .data
        .into_iter()
        .find(|m| m.id == id)
        .with_context(|| format!("mailbox {id} not found in {}", detail.domain().name))?;
    Ok((detail, mailbox))
}

async fn aliases(api: &ApiClient, cmd: AliasesCommand, confirmer: &PromptConfirmer) -> Result<()> {
    match cmd {
        AliasesCommand::List { domain } => {
            let detail = domain_detail(api, domain).await?;
            let _ = detail.load_aliases().await;
            render::list(&detail.aliases(), "No aliases.", render::alias_row);
        }
        AliasesCommand::Create { domain, name, to } => {
            let detail = domain_detail(api, domain).await?;
            let alias = detail
                .create_alias(&CreateAlias { name, to })
                .await
                .map_err(|e| user_error(e, messages::SAVE_ALIAS))?;
            println!("Created alias {} -> {}.", alias.full_address(), alias.to);
        }
        AliasesCommand::Update { domain, id, to, active } => {
            let detail = domain_detail(api, domain).await?;
            detail
                .load_aliases()
                .await
                .map_err(|e| user_error(e, messages::LOAD_ALIASES))?;
            let alias = detail
                .aliases()
                .data
                .into_iter()
                .find(|a| a.id == id)
                .with_context(|| format!("alias {id} not found"))?;
            let updated = detail
                .update_alias(&alias, &UpdateAlias { to, active })
                .await
                .map_err(|e| user_error(e, messages::SAVE_ALIAS))?;
            println!("Updated alias {}.", updated.full_address());
        }
        AliasesCommand::Delete { domain, id } => {
            let detail = domain_detail(api, domain).await?;
            detail
                .load_aliases()
                .await
                .map_err(|e| user_error(e, messages::LOAD_ALIASES))?;
            let alias = detail
                .aliases()
                .data
                .into_iter()
                .find(|a| a.id == id)
                .with_context(|| format!("alias {id} not found"))?;
            let outcome = detail
                .delete_alias(confirmer, &alias)
                .await
                .map_err(|e| user_error(e, messages::DELETE_ALIAS))?;
            report(outcome, "Alias deleted.");
        }
    }
    Ok(())
}

async fn footer(api: &ApiClient, cmd: FooterCommand) -> Result<()> {
    let screen = SelfService::new(api.clone());
    match cmd {
        FooterCommand::Show => {
            screen
                .load_footer()
                .await
                .map_err(|e| user_error(e, messages::LOAD_FOOTER))?;
            match screen.footer().data {
                Some(text) => println!("{text}"),
                None => println!("No footer set."),
            }
        }
        FooterCommand::Set { text } => {
            screen
                .save_footer(Some(&text))
                .await
                .map_err(|e| user_error(e, messages::SAVE_FOOTER))?;
            println!("Footer saved.");
        }
        FooterCommand::Clear => {
            screen
                .save_footer(None)
                .await
                .map_err(|e| user_error(e, messages::SAVE_FOOTER))?;
            println!("Footer cleared.");
        }
    }
    Ok(())
}

async fn autoresponder(
    api: &ApiClient,
    cmd: AutoresponderCommand,
    confirmer: &PromptConfirmer,
) -> Result<()> {
    let screen = SelfService::new(api.clone());
    match cmd {
        AutoresponderCommand::Show => {
            screen
                .load_autoresponder()
                .await
                .map_err(|e| user_error(e, messages::LOAD_AUTORESPONDER))?;
            render::autoresponder(screen.autoresponder().data.as_ref());
        }
        AutoresponderCommand::Set(args) => {
            let draft = draft(args)?;
            screen
                .save_autoresponder(&draft)
                .await
                .map_err(|e| user_error(e, messages::SAVE_AUTORESPONDER))?;
            println!("Autoresponder saved.");
        }
        AutoresponderCommand::Delete => {
            let outcome = screen
                .delete_autoresponder(confirmer)
                .await
                .map_err(|e| user_error(e, messages::DELETE_AUTORESPONDER))?;
            report(outcome, "Autoresponder deleted.");
        }
    }
    Ok(())
}

fn draft(args: AutoresponderArgs) -> Result<AutoresponderDraft> {
    let date = |raw: Option<String>, what: &str| -> Result<_> {
        match raw {
            None => Ok(None),
            Some(raw) => timestamp::parse(&raw)
                .or_else(|| timestamp::parse(&format!("{raw} 00:00")))
                .map(Some)
                .with_context(|| format!("unrecognised {what} date '{raw}'")),
        }
    };
    Ok(AutoresponderDraft {
        subject: args.subject,
        body: args.body,
        active: !args.inactive,
        start_date: date(args.start, "start")?,
        end_date: date(args.end, "end")?,
    })
}
