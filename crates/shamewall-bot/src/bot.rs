//! Command layer
//!
//! `Shamewall` binds the ledger, the leaderboard, the channel directory
//! and the notifier behind the bot's commands. Platform plumbing (gateway,
//! argument parsing) stays outside: handlers receive already-extracted
//! arguments and return the ephemeral acknowledgement text for the
//! invoker.
//!
//! Each handler validates its inputs, so amounts reaching the ledger are
//! always in `1..=2` and names are trimmed and non-empty.

use crate::error::BotError;
use crate::messages;
use crate::notify::{Notifier, Payload};
use dashmap::DashMap;
use shamewall_core::{
    CoreError, LedgerEngine, NavDirection, RankedBoard, SessionRegistry, SESSION_TTL,
};
use shamewall_store::{
    ChannelDirectory, ChannelId, MessageId, RecordStore, ServerId, UserId,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Where a command came from
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Server the command was invoked in
    pub server: ServerId,
    /// The invoking user
    pub invoker: UserId,
    /// Channel the command was typed in
    pub channel: ChannelId,
}

impl CommandContext {
    /// Assemble a context
    #[inline]
    #[must_use]
    pub fn new(server: ServerId, invoker: UserId, channel: ChannelId) -> Self {
        Self {
            server,
            invoker,
            channel,
        }
    }
}

/// The bot's command surface
pub struct Shamewall {
    ledger: LedgerEngine,
    store: Arc<dyn RecordStore>,
    directory: Arc<dyn ChannelDirectory>,
    notifier: Arc<dyn Notifier>,
    sessions: Arc<SessionRegistry>,
    /// Ranked snapshot per live pagination message; re-renders reuse the
    /// snapshot rather than re-querying the store
    boards: DashMap<MessageId, RankedBoard>,
}

impl Shamewall {
    /// Wire up the bot with the standard session lifetime.
    ///
    /// Spawns the session-expiry worker; must be called from within a
    /// tokio runtime.
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        directory: Arc<dyn ChannelDirectory>,
        notifier: Arc<dyn Notifier>,
    ) -> Arc<Self> {
        Self::with_session_ttl(store, directory, notifier, SESSION_TTL)
    }

    /// Wire up the bot with a custom session lifetime (shortened in tests)
    #[must_use]
    pub fn with_session_ttl(
        store: Arc<dyn RecordStore>,
        directory: Arc<dyn ChannelDirectory>,
        notifier: Arc<dyn Notifier>,
        session_ttl: Duration,
    ) -> Arc<Self> {
        let (sessions, expiry_rx) = SessionRegistry::with_ttl(session_ttl);
        let bot = Arc::new(Self {
            ledger: LedgerEngine::new(Arc::clone(&store)),
            store,
            directory,
            notifier,
            sessions,
            boards: DashMap::new(),
        });
        bot.spawn_expiry_worker(expiry_rx);
        bot
    }

    /// `/addfail <name> <amount>` — add failures to a participant.
    ///
    /// Posts the running total (plus any crossed milestones) to the
    /// configured channel and returns the invoker's acknowledgement with a
    /// humor line attached.
    pub async fn add_fail(
        &self,
        ctx: &CommandContext,
        name: &str,
        amount: u32,
    ) -> Result<String, BotError> {
        tracing::info!(
            server = %ctx.server,
            invoker = %ctx.invoker,
            target = name,
            amount,
            "addfail received"
        );
        let name = validated_name(name)?;
        validate_amount(amount)?;
        let channel = self.target_channel(&ctx.server)?;

        let outcome = self.ledger.increment(&ctx.server, name, amount).await?;

        let mut text = messages::fail_total(&outcome.name, outcome.new_count);
        if !outcome.crossed_milestones.is_empty() {
            text.push('\n');
            for milestone in &outcome.crossed_milestones {
                text.push('\n');
                text.push_str(&messages::milestone_line(
                    outcome.new_count,
                    &milestone.message,
                ));
            }
        }
        self.notifier.send(&channel, Payload::Text(text)).await?;

        let mut ack = messages::fails_added_ack(&outcome.name);
        ack.push('\n');
        ack.push_str(messages::random_humor(&mut rand::thread_rng()));
        Ok(ack)
    }

    /// `/removefail <name> <amount>` — remove failures from a participant.
    ///
    /// Unknown participants and zero counters come back as reported
    /// errors; the caller maps them to their user-visible messages.
    pub async fn remove_fail(
        &self,
        ctx: &CommandContext,
        name: &str,
        amount: u32,
    ) -> Result<String, BotError> {
        tracing::info!(
            server = %ctx.server,
            invoker = %ctx.invoker,
            target = name,
            amount,
            "removefail received"
        );
        let name = validated_name(name)?;
        validate_amount(amount)?;
        let channel = self.target_channel(&ctx.server)?;

        let outcome = self.ledger.decrement(&ctx.server, name, amount).await?;

        let text = messages::fails_removed(&outcome.name, outcome.new_count, outcome.removed);
        self.notifier.send(&channel, Payload::Text(text)).await?;
        Ok(messages::fails_removed_ack(&outcome.name))
    }

    /// `/leaderboard` — post the ranked board to the configured channel.
    ///
    /// Page 0 goes out immediately; when the board spans more than one
    /// page a pagination session is opened for the invoker.
    pub async fn leaderboard(&self, ctx: &CommandContext) -> Result<String, BotError> {
        tracing::info!(server = %ctx.server, invoker = %ctx.invoker, "leaderboard received");
        let channel = self.target_channel(&ctx.server)?;

        let board = RankedBoard::load(self.store.as_ref(), &ctx.server).await?;
        let total_pages = board.total_pages();
        let page = board.render_page(0);

        let message_id = self
            .notifier
            .send(
                &channel,
                Payload::Board {
                    page,
                    controls: total_pages > 1,
                },
            )
            .await?;

        if self
            .sessions
            .open(message_id.clone(), ctx.invoker.clone(), total_pages)
        {
            self.boards.insert(message_id, board);
        }
        Ok(messages::leaderboard_sent_ack(channel.as_str()))
    }

    /// A navigation event against a live pagination message.
    ///
    /// Owner-gated; re-renders the (possibly unchanged) page in place.
    pub async fn navigate(
        &self,
        message: &MessageId,
        requester: &UserId,
        direction: NavDirection,
    ) -> Result<(), BotError> {
        let page_index = self.sessions.navigate(message, requester, direction)?;

        let rendered = {
            let board = self.boards.get(message).ok_or(CoreError::SessionExpired)?;
            board.render_page(page_index)
        };
        self.notifier
            .edit(
                message,
                Payload::Board {
                    page: rendered,
                    controls: true,
                },
            )
            .await?;
        Ok(())
    }

    /// `/startup` — configure the invoking channel as the server's
    /// notification channel
    pub fn startup(&self, ctx: &CommandContext) -> Result<String, BotError> {
        tracing::info!(server = %ctx.server, channel = %ctx.channel, "startup received");
        self.directory.set(&ctx.server, &ctx.channel)?;
        Ok(messages::channel_configured(ctx.channel.as_str()))
    }

    /// `/help` — static command summary
    #[inline]
    #[must_use]
    pub fn help(&self) -> &'static str {
        messages::HELP_TEXT
    }

    /// The ledger behind the commands (used by the demo to seed data)
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &LedgerEngine {
        &self.ledger
    }

    /// The session registry (used by tests to observe lifecycle)
    #[inline]
    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    fn target_channel(&self, server: &ServerId) -> Result<ChannelId, BotError> {
        match self.directory.get(server)? {
            Some(channel) => Ok(channel),
            None => {
                tracing::warn!(server = %server, "no channel configured");
                Err(BotError::NoChannelConfigured)
            }
        }
    }

    fn spawn_expiry_worker(self: &Arc<Self>, mut expiry_rx: mpsc::Receiver<MessageId>) {
        let bot = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(message_id) = expiry_rx.recv().await {
                bot.boards.remove(&message_id);
                if let Err(error) = bot.notifier.disable_controls(&message_id).await {
                    tracing::warn!(
                        message = %message_id,
                        %error,
                        "failed to disable pagination controls"
                    );
                }
            }
        });
    }
}

impl std::fmt::Debug for Shamewall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shamewall")
            .field("live_boards", &self.boards.len())
            .finish_non_exhaustive()
    }
}

fn validated_name(name: &str) -> Result<&str, BotError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BotError::Validation(messages::NAME_REQUIRED));
    }
    Ok(trimmed)
}

fn validate_amount(amount: u32) -> Result<(), BotError> {
    if (1..=2).contains(&amount) {
        Ok(())
    } else {
        Err(BotError::Validation(messages::AMOUNT_OUT_OF_RANGE))
    }
}
