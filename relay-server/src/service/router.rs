//! Update Router
//!
//! Takes one Telegram update, checks the sender against the single admin,
//! classifies it and produces the next menu step. The protocol is stateless:
//! everything needed for the next step travels inside the button payload.
//!
//! Every path sends at most one message and makes at most one CI call per
//! step (dispatch additionally reads the default branch first).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use relay_client::{CiProvider, Notifier};
use relay_core::domain::payload::{CallbackPayload, PayloadError};
use relay_core::domain::registry::RepositoryRegistry;
use relay_core::dto::telegram::{SendMessage, Update};
use thiserror::Error;

use crate::service::{dispatch_service, listing_service, menu, notify::notify};

/// Router-level failures; the webhook still acknowledges them with 200
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("undecodable callback payload: {0}")]
    Payload(#[from] PayloadError),
}

pub type Result<T> = std::result::Result<T, RouterError>;

/// The part of the configuration the router needs
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub registry: RepositoryRegistry,
    pub admin_id: i64,
    pub fallback_branch: String,
}

/// What an update asks for, before authorization
#[derive(Debug, PartialEq, Eq)]
enum Inbound<'a> {
    Callback {
        chat_id: i64,
        sender_id: i64,
        data: &'a str,
    },
    Text {
        chat_id: i64,
        sender_id: i64,
        text: &'a str,
    },
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Run,
    Status,
    Other,
}

impl Command {
    /// Accepts `/run` and `/run@SomeBot`
    fn parse(text: &str) -> Self {
        let text = text.trim();
        let command = text.split_once('@').map_or(text, |(command, _)| command);

        match command {
            "/run" | "/start" => Command::Run,
            "/status" => Command::Status,
            _ => Command::Other,
        }
    }
}

fn classify(update: &Update) -> Inbound<'_> {
    if let Some(query) = &update.callback_query {
        return match (&query.message, query.data.as_deref()) {
            (Some(message), Some(data)) => Inbound::Callback {
                chat_id: message.chat.id,
                sender_id: query.from.id,
                data,
            },
            _ => Inbound::Ignored,
        };
    }

    if let Some(message) = &update.message {
        if let (Some(from), Some(text)) = (&message.from, message.text.as_deref()) {
            return Inbound::Text {
                chat_id: message.chat.id,
                sender_id: from.id,
                text,
            };
        }
    }

    Inbound::Ignored
}

pub struct UpdateRouter {
    settings: RouterSettings,
    started_at: DateTime<Utc>,
    ci: Arc<dyn CiProvider>,
    notifier: Arc<dyn Notifier>,
}

impl UpdateRouter {
    pub fn new(
        settings: RouterSettings,
        ci: Arc<dyn CiProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            started_at: Utc::now(),
            ci,
            notifier,
        }
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Handle a single update
    pub async fn handle(&self, update: &Update) -> Result<()> {
        match classify(update) {
            Inbound::Callback {
                chat_id,
                sender_id,
                data,
            } => {
                if !self.is_authorized(sender_id) {
                    tracing::warn!(sender_id, "Rejected callback from unauthorized user");
                    return self.reply(menu::denied_callback(chat_id)).await;
                }

                tracing::info!("Callback: {}", data);
                let payload: CallbackPayload = data.parse()?;
                self.handle_callback(chat_id, payload).await
            }
            Inbound::Text {
                chat_id,
                sender_id,
                text,
            } => {
                if !self.is_authorized(sender_id) {
                    tracing::warn!(sender_id, "Rejected message from unauthorized user");
                    return self.reply(menu::denied_command(chat_id)).await;
                }

                self.handle_command(chat_id, Command::parse(text)).await
            }
            Inbound::Ignored => {
                tracing::debug!("Update {} carries nothing to handle", update.update_id);
                Ok(())
            }
        }
    }

    fn is_authorized(&self, sender_id: i64) -> bool {
        sender_id == self.settings.admin_id
    }

    async fn reply(&self, message: SendMessage) -> Result<()> {
        notify(self.notifier.as_ref(), message).await;
        Ok(())
    }

    async fn handle_command(&self, chat_id: i64, command: Command) -> Result<()> {
        let registry = &self.settings.registry;

        match command {
            Command::Run if registry.is_empty() => {
                self.reply(menu::setup_instructions(chat_id)).await
            }
            Command::Run => self.reply(menu::repository_menu(chat_id, registry)).await,
            Command::Status => {
                let up_since = self.started_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
                self.reply(menu::status(
                    chat_id,
                    registry.len(),
                    self.settings.admin_id,
                    &up_since,
                ))
                .await
            }
            Command::Other => Ok(()),
        }
    }

    async fn handle_callback(&self, chat_id: i64, payload: CallbackPayload) -> Result<()> {
        let Some(repo) = self.settings.registry.resolve(payload.alias()) else {
            tracing::warn!("Callback references unknown alias {:?}", payload.alias());
            return match payload {
                CallbackPayload::SelectRepository { .. } => {
                    self.reply(menu::configuration_error(chat_id)).await
                }
                CallbackPayload::SelectWorkflow { .. } => Ok(()),
            };
        };

        match payload {
            CallbackPayload::SelectRepository { alias } => {
                let workflows = listing_service::list_workflows(self.ci.as_ref(), repo).await;

                if workflows.is_empty() {
                    return self.reply(menu::no_workflows(chat_id, repo)).await;
                }

                self.reply(menu::workflow_menu(chat_id, &alias, repo, &workflows))
                    .await
            }
            CallbackPayload::SelectWorkflow { workflow, .. } => {
                let outcome = dispatch_service::dispatch_workflow(
                    self.ci.as_ref(),
                    repo,
                    &workflow,
                    &self.settings.fallback_branch,
                )
                .await;

                self.reply(menu::dispatch_result(chat_id, repo, &outcome))
                    .await
            }
        }
    }
}
