//! End-to-end command flows over the in-memory store and buffer notifier.

use pretty_assertions::assert_eq;
use shamewall_bot::{BotError, BufferNotifier, CommandContext, Notifier, Payload, Shamewall};
use shamewall_core::{CoreError, NavDirection};
use shamewall_store::{
    ChannelDirectory, ChannelId, MemoryDirectory, MemoryStore, MessageId, ParticipantRecord,
    RecordStore, ServerId, StoreError, UserId,
};
use std::sync::Arc;
use std::time::Duration;

fn context() -> CommandContext {
    CommandContext::new(
        ServerId::new("guilde"),
        UserId::new("owner"),
        ChannelId::new("mur-de-la-honte"),
    )
}

fn bot_with_ttl(ttl: Duration) -> (Arc<Shamewall>, Arc<BufferNotifier>) {
    let notifier = Arc::new(BufferNotifier::new());
    let bot = Shamewall::with_session_ttl(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryDirectory::new()),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        ttl,
    );
    (bot, notifier)
}

async fn seed(bot: &Shamewall, server: &ServerId, participants: u32) {
    for n in 1..=participants {
        let name = format!("Joueur-{n:02}");
        // Joueur-01 ends with the most failures
        for _ in 0..=(participants - n) {
            bot.ledger().increment(server, &name, 1).await.unwrap();
        }
    }
}

fn footer_of(payload: &Payload) -> String {
    match payload {
        Payload::Board { page, .. } => page.footer.clone(),
        Payload::Text(_) => panic!("expected a board payload"),
    }
}

#[tokio::test]
async fn leaderboard_pagination_walks_pages_in_place() {
    let (bot, notifier) = bot_with_ttl(Duration::from_secs(60));
    let ctx = context();
    bot.startup(&ctx).unwrap();
    seed(&bot, &ctx.server, 23).await;

    let ack = bot.leaderboard(&ctx).await.unwrap();
    assert_eq!(ack, "Le classement a été envoyé dans mur-de-la-honte.");

    let message = notifier.last_sent().unwrap();
    let delivered = notifier.message(&message).unwrap();
    assert!(delivered.controls_active);
    assert!(footer_of(&delivered.payload).starts_with("Page 1 sur 3"));

    bot.navigate(&message, &ctx.invoker, NavDirection::Next).await.unwrap();
    let delivered = notifier.message(&message).unwrap();
    assert!(footer_of(&delivered.payload).starts_with("Page 2 sur 3"));

    bot.navigate(&message, &ctx.invoker, NavDirection::Next).await.unwrap();
    // Next on the last page re-renders the same page
    bot.navigate(&message, &ctx.invoker, NavDirection::Next).await.unwrap();
    let delivered = notifier.message(&message).unwrap();
    assert!(footer_of(&delivered.payload).starts_with("Page 3 sur 3"));

    bot.navigate(&message, &ctx.invoker, NavDirection::Previous).await.unwrap();
    let delivered = notifier.message(&message).unwrap();
    assert!(footer_of(&delivered.payload).starts_with("Page 2 sur 3"));

    // Only the original send; everything since was an in-place edit
    assert_eq!(notifier.sent_count(), 1);
}

#[tokio::test]
async fn bystander_cannot_navigate_and_page_stays() {
    let (bot, notifier) = bot_with_ttl(Duration::from_secs(60));
    let ctx = context();
    bot.startup(&ctx).unwrap();
    seed(&bot, &ctx.server, 15).await;

    bot.leaderboard(&ctx).await.unwrap();
    let message = notifier.last_sent().unwrap();

    let bystander = UserId::new("bystander");
    let result = bot.navigate(&message, &bystander, NavDirection::Next).await;
    let err = result.unwrap_err();
    assert!(matches!(err, BotError::Core(CoreError::Unauthorized)));
    assert_eq!(err.user_message(), "Vous ne pouvez pas contrôler cette pagination.");

    let delivered = notifier.message(&message).unwrap();
    assert!(footer_of(&delivered.payload).starts_with("Page 1 sur 2"));
}

#[tokio::test]
async fn expiry_disables_controls_and_rejects_navigation() {
    let (bot, notifier) = bot_with_ttl(Duration::from_millis(30));
    let ctx = context();
    bot.startup(&ctx).unwrap();
    seed(&bot, &ctx.server, 12).await;

    bot.leaderboard(&ctx).await.unwrap();
    let message = notifier.last_sent().unwrap();
    assert!(bot.sessions().is_active(&message));

    // Let the session expire and the expiry worker run
    tokio::time::sleep(Duration::from_millis(120)).await;

    assert!(!bot.sessions().is_active(&message));
    let delivered = notifier.message(&message).unwrap();
    assert!(!delivered.controls_active);

    let result = bot.navigate(&message, &ctx.invoker, NavDirection::Next).await;
    let err = result.unwrap_err();
    assert!(matches!(err, BotError::Core(CoreError::SessionExpired)));
    assert_eq!(err.user_message(), "Cette pagination n'est plus active.");
}

#[tokio::test]
async fn navigation_on_a_single_page_board_reports_expired() {
    let (bot, notifier) = bot_with_ttl(Duration::from_secs(60));
    let ctx = context();
    bot.startup(&ctx).unwrap();
    seed(&bot, &ctx.server, 5).await;

    bot.leaderboard(&ctx).await.unwrap();
    let message = notifier.last_sent().unwrap();

    // One page means no session was opened for the delivered message
    let err = bot
        .navigate(&message, &ctx.invoker, NavDirection::Next)
        .await
        .unwrap_err();
    assert!(matches!(err, BotError::Core(CoreError::SessionExpired)));
    assert_eq!(err.user_message(), "Cette pagination n'est plus active.");

    let delivered = notifier.message(&message).unwrap();
    assert!(footer_of(&delivered.payload).starts_with("Page 1 sur 1"));
}

#[tokio::test]
async fn commands_without_configured_channel_are_refused() {
    let (bot, _notifier) = bot_with_ttl(Duration::from_secs(60));
    let ctx = context();

    for result in [
        bot.add_fail(&ctx, "Iop", 1).await,
        bot.remove_fail(&ctx, "Iop", 1).await,
        bot.leaderboard(&ctx).await,
    ] {
        let err = result.unwrap_err();
        assert!(matches!(err, BotError::NoChannelConfigured));
        assert!(err.user_message().contains("/startup"));
    }
}

#[tokio::test]
async fn startup_reconfigures_the_target_channel() {
    let (bot, notifier) = bot_with_ttl(Duration::from_secs(60));
    let mut ctx = context();
    bot.startup(&ctx).unwrap();

    ctx.channel = ChannelId::new("nouveau-canal");
    let ack = bot.startup(&ctx).unwrap();
    assert_eq!(
        ack,
        "Le canal nouveau-canal est maintenant configuré pour ce serveur."
    );

    bot.add_fail(&ctx, "Iop", 1).await.unwrap();
    let sent = notifier.message(&notifier.last_sent().unwrap()).unwrap();
    assert_eq!(sent.channel, ChannelId::new("nouveau-canal"));
}

#[tokio::test]
async fn milestone_and_title_appear_together_on_the_wall() {
    let (bot, notifier) = bot_with_ttl(Duration::from_secs(60));
    let ctx = context();
    bot.startup(&ctx).unwrap();

    // 13 increments of 2: crosses 15 and 25 along the way
    for _ in 0..13 {
        bot.add_fail(&ctx, "Ecaflip", 2).await.unwrap();
    }

    bot.leaderboard(&ctx).await.unwrap();
    let delivered = notifier.message(&notifier.last_sent().unwrap()).unwrap();
    let Payload::Board { page, controls } = delivered.payload else {
        panic!("expected a board payload");
    };
    assert!(!controls);
    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].name, "Ecaflip");
    assert_eq!(page.entries[0].fail_count, 26);
    assert_eq!(page.entries[0].title, "Maître du \"Presque Réussi\"");
    assert_eq!(page.footer, "Page 1 sur 1 | Total des échecs : 26");
}

/// Store whose every operation fails, for the generic-error path
#[derive(Debug)]
struct FailingStore;

#[async_trait::async_trait]
impl RecordStore for FailingStore {
    async fn find_or_create(
        &self,
        _server: &ServerId,
        _name: &str,
    ) -> Result<(ParticipantRecord, bool), StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn find_one(
        &self,
        _server: &ServerId,
        _name: &str,
    ) -> Result<Option<ParticipantRecord>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn find_all_sorted(
        &self,
        _server: &ServerId,
    ) -> Result<Vec<ParticipantRecord>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn save(&self, _record: &ParticipantRecord) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

#[tokio::test]
async fn store_failures_surface_the_generic_message() {
    let notifier = Arc::new(BufferNotifier::new());
    let directory = Arc::new(MemoryDirectory::new());
    directory
        .set(&ServerId::new("guilde"), &ChannelId::new("mur-de-la-honte"))
        .unwrap();
    let bot = Shamewall::new(
        Arc::new(FailingStore),
        directory,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );
    let ctx = context();

    let err = bot.add_fail(&ctx, "Iop", 1).await.unwrap_err();
    assert_eq!(err.user_message(), "Erreur lors du traitement de la commande.");
    // Nothing was announced on the wall
    assert_eq!(notifier.sent_count(), 0);
}

#[tokio::test]
async fn two_leaderboards_hold_independent_sessions() {
    let (bot, notifier) = bot_with_ttl(Duration::from_secs(60));
    let ctx = context();
    bot.startup(&ctx).unwrap();
    seed(&bot, &ctx.server, 23).await;

    bot.leaderboard(&ctx).await.unwrap();
    let first = notifier.last_sent().unwrap();
    bot.leaderboard(&ctx).await.unwrap();
    let second = notifier.last_sent().unwrap();
    assert_ne!(first, second);

    bot.navigate(&first, &ctx.invoker, NavDirection::Next).await.unwrap();

    let first_page = footer_of(&notifier.message(&first).unwrap().payload);
    let second_page = footer_of(&notifier.message(&second).unwrap().payload);
    assert!(first_page.starts_with("Page 2 sur 3"));
    assert!(second_page.starts_with("Page 1 sur 3"));
}

#[allow(dead_code)]
fn assert_traits() {
    fn is_send_sync<T: Send + Sync>() {}
    is_send_sync::<Shamewall>();
    is_send_sync::<MessageId>();
}
