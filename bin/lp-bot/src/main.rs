use anyhow::Context as _;
use command::Data;
use config::Config;
use handler::bot::BotHandler;
use lp_tracker_core::Tracker;
use lp_tracker_storage::JsonStorage;
use notifier::DiscordNotifier;
use poise::serenity_prelude::{Client, GatewayIntents, Http};
use poise::{Framework, FrameworkOptions};
use riot_api::RiotLadder;
use riven::consts::PlatformRoute;
use riven::RiotApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod command;
mod config;
mod handler;
mod notifier;
mod riot_api;
mod scheduler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, the environment may already be set
    dotenvy::dotenv().ok();
    setup_tracing_subscriber();

    info!("Loading configuration");
    let config = Config::load(std::env::args().nth(1)).await?;
    let route: PlatformRoute = config
        .platform_route
        .parse()
        .with_context(|| format!("Unknown platform route {:?}", config.platform_route))?;

    info!("Loading tracked summoners");
    let storage = JsonStorage::new(&config.data_file, &config.channel_file);
    let state = storage.load().await;
    info!(
        "Tracking {} summoners, channel {:?}",
        state.store.len(),
        state.channel
    );

    info!("Setting up Riot API client");
    let ladder = RiotLadder::new(RiotApi::new(config.rgapi_key), route);

    let http = Arc::new(Http::new(&config.discord_token));
    let notifier = DiscordNotifier::new(http, config.rank_images_path);
    let tracker = Arc::new(Tracker::new(state, ladder, notifier, storage));
    let period = Duration::from_secs(config.poll_interval_secs);
    let (fatal_tx, fatal_rx) = mpsc::channel(1);

    let tracker_clone = tracker.clone();
    let fatal_clone = fatal_tx.clone();
    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: vec![
                command::about(),
                command::add_summoner(),
                command::check_lp(),
                command::list(),
                command::remove_summoner(),
                command::set_channel(),
            ],
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands synced");
                Ok(Data {
                    tracker: tracker_clone,
                    poll_interval: period,
                    fatal: fatal_clone,
                })
            })
        })
        .build();

    let mut client = Client::builder(&config.discord_token, GatewayIntents::non_privileged())
        .framework(framework)
        .event_handler(BotHandler {
            tracker: tracker.clone(),
        })
        .await
        .context("Failed to create client")?;

    info!("Starting scheduler, every {}s", config.poll_interval_secs);
    tokio::task::spawn(scheduler::run(tracker, period, fatal_tx));

    info!("Starting client");
    tokio::select! {
        result = client.start() => result.context("Client exited its loop")?,
        result = scheduler::first_fatal(fatal_rx) => result?,
    }

    Ok(())
}

fn setup_tracing_subscriber() {
    let layer = fmt::layer()
        .pretty()
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_thread_ids(false)
        .with_target(false);
    tracing_subscriber::registry()
        .with(layer)
        .with(EnvFilter::from_default_env())
        .init();
}
