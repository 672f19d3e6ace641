//! Terminal prompts.

use anyhow::{Context, Result};
use async_trait::async_trait;
use dialoguer::console::Term;
use dialoguer::{Confirm, Password};
use mailpanel_client::{Confirmer, Decision, DestructiveAction};
use tracing::warn;

/// Asks on stderr, or answers yes when `--yes` was given.
pub struct PromptConfirmer {
    assume_yes: bool,
}

impl PromptConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl Confirmer for PromptConfirmer {
    async fn decide(&self, action: &DestructiveAction) -> Decision {
        if self.assume_yes {
            return Decision::Confirmed;
        }
        let prompt = action.prompt();
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact_on(&Term::stderr())
        })
        .await;

        match answer {
            Ok(Ok(true)) => Decision::Confirmed,
            Ok(Ok(false)) => Decision::Declined,
            Ok(Err(e)) => {
                warn!(error = %e, "confirmation prompt failed; treating as declined");
                Decision::Declined
            }
            Err(e) => {
                warn!(error = %e, "confirmation prompt aborted; treating as declined");
                Decision::Declined
            }
        }
    }
}

pub fn password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact_on(&Term::stderr())
        .context("password prompt failed")
}

/// New password entered twice; the repeat is checked by the caller's payload type.
pub fn new_password(prompt: &str) -> Result<(String, String)> {
    let first = password(prompt)?;
    let repeat = password("Repeat password")?;
    Ok((first, repeat))
}
