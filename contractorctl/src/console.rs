//! Terminal implementations of the presentation and session ports.

use std::env;

use async_trait::async_trait;
use contractor_core::error::Result;
use contractor_core::ports::{
    ConfirmPrompt, Confirmer, Navigator, Notice, Notifier, Route,
    SessionProvider, Severity,
};
use contractor_model::UserId;
use dialoguer::{Select, console::Term};
use tracing::{info, warn};

pub const USER_ID_VAR: &str = "CONTRACTOR_USER_ID";

/// Treats `$CONTRACTOR_USER_ID` as the signed-in account.
#[derive(Debug, Default)]
pub struct EnvSession;

#[async_trait]
impl SessionProvider for EnvSession {
    async fn current_user(&self) -> Result<Option<UserId>> {
        Ok(env::var(USER_ID_VAR)
            .ok()
            .and_then(|raw| UserId::new(raw).ok()))
    }
}

/// Prints notices to stderr so stdout stays machine readable.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, notice: Notice) {
        let tag = match notice.severity {
            Severity::Primary => "info",
            Severity::Success => "ok",
            Severity::Warning => "warning",
            Severity::Danger => "error",
        };
        eprintln!("[{tag}] {}", notice.message);
    }
}

#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        info!(route = route.path(), "navigating");
        println!("{}", route.path());
    }
}

/// Interactive two-choice prompt; `assume_yes` accepts without asking.
#[derive(Debug)]
pub struct DialoguerConfirmer {
    assume_yes: bool,
}

impl DialoguerConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl Confirmer for DialoguerConfirmer {
    async fn confirm(&self, prompt: ConfirmPrompt) -> bool {
        if self.assume_yes {
            return true;
        }

        let asked = tokio::task::spawn_blocking(move || {
            Select::new()
                .with_prompt(format!("{}: {}", prompt.header, prompt.message))
                .items(&[prompt.cancel_label.as_str(), prompt.accept_label.as_str()])
                .default(0)
                .interact_on_opt(&Term::stderr())
        })
        .await;

        match asked {
            Ok(Ok(choice)) => choice == Some(1),
            Ok(Err(err)) => {
                warn!(error = %err, "confirmation prompt failed");
                false
            }
            Err(err) => {
                warn!(error = %err, "confirmation prompt task failed");
                false
            }
        }
    }
}
