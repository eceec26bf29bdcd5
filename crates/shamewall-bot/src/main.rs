use clap::{value_parser, Arg, Command};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shamewall_bot::{CommandContext, Shamewall, StdoutNotifier};
use shamewall_core::{NavDirection, MILESTONES, TITLES};
use shamewall_store::{ChannelId, MemoryDirectory, MemoryStore, ServerId, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Command::new("shamewall")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Failure ledger and ranked leaderboard, demo runner")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("demo")
                .about("Run a scripted command session against the in-memory store")
                .arg(
                    Arg::new("participants")
                        .long("participants")
                        .default_value("23")
                        .value_parser(value_parser!(u32))
                        .help("Number of participants to seed"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("ttl-secs")
                        .long("ttl-secs")
                        .default_value("3")
                        .value_parser(value_parser!(u64))
                        .help("Pagination session lifetime in seconds"),
                ),
        )
        .subcommand(Command::new("tables").about("Print the milestone and title tables"));

    match cli.get_matches().subcommand() {
        Some(("demo", args)) => {
            let participants = *args.get_one::<u32>("participants").unwrap();
            let seed = *args.get_one::<u64>("seed").unwrap();
            let ttl = Duration::from_secs(*args.get_one::<u64>("ttl-secs").unwrap());
            run_demo(participants, seed, ttl).await?;
        }
        Some(("tables", _)) => {
            println!("Milestones:");
            for (threshold, message) in MILESTONES.iter() {
                println!("  {threshold:>4} — {message}");
            }
            println!();
            println!("Titles:");
            for (threshold, title) in TITLES.iter() {
                println!("  {threshold:>4} — {title}");
            }
        }
        _ => {}
    }
    Ok(())
}

async fn run_demo(participants: u32, seed: u64, ttl: Duration) -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let directory = Arc::new(MemoryDirectory::new());
    let notifier = Arc::new(StdoutNotifier::new());
    let bot = Shamewall::with_session_ttl(store, directory, Arc::clone(&notifier) as _, ttl);

    let server = ServerId::new("demo-server");
    let owner = CommandContext::new(
        server.clone(),
        UserId::new("demo-owner"),
        ChannelId::new("mur-de-la-honte"),
    );

    println!("> /startup");
    println!("{}\n", bot.startup(&owner)?);

    // Seed the ledger directly so the channel is not flooded
    let mut rng = StdRng::seed_from_u64(seed);
    for n in 1..=participants {
        let name = format!("Joueur-{n}");
        let mut remaining: u32 = rng.gen_range(0..=60);
        while remaining > 0 {
            let step = remaining.min(2);
            bot.ledger().increment(&server, &name, step).await?;
            remaining -= step;
        }
    }
    tracing::info!(participants, seed, "ledger seeded");

    println!("> /addfail Joueur-1 2");
    println!("{}\n", bot.add_fail(&owner, "Joueur-1", 2).await?);

    println!("> /leaderboard");
    println!("{}\n", bot.leaderboard(&owner).await?);

    if let Some(message) = notifier.last_sent() {
        // A single-page board opens no session, so these report as expired
        println!("> owner presses Next, twice");
        for _ in 0..2 {
            if let Err(error) = bot.navigate(&message, &owner.invoker, NavDirection::Next).await {
                println!("{}\n", error.user_message());
            }
        }

        println!("> a bystander presses Next");
        let bystander = UserId::new("bystander");
        if let Err(error) = bot.navigate(&message, &bystander, NavDirection::Next).await {
            println!("{}\n", error.user_message());
        }

        println!("> waiting for the session to expire...");
        tokio::time::sleep(ttl + Duration::from_millis(200)).await;
        if let Err(error) = bot.navigate(&message, &owner.invoker, NavDirection::Next).await {
            println!("{}\n", error.user_message());
        }
    }

    println!("> /help");
    println!("{}", bot.help());
    Ok(())
}
