//! Wallet sequencing demo.
//!
//! Plays both sides of the page: starts the configured wallets as announcers,
//! discovers them, connects one and runs a sequencing policy, printing the
//! status feed.
//!
//! # Flow
//!
//! ```text
//!   config ──▶ announcers (simulated / RPC wallets)
//!                  │ announceProvider
//!                  ▼
//!   DappSession: registry ──▶ provider list ──▶ select ──▶ connect
//!                                                              │
//!                                                              ▼
//!                                          sequencer ──▶ status feed (stdout)
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

use wallet_sequencer::config::{load_config, DappConfig, SimulatedWalletConfig};
use wallet_sequencer::discovery::{
    spawn_announcer, AnnouncerHandle, DiscoveryBus, ProviderDescriptor, ProviderInfo,
};
use wallet_sequencer::observability::logging;
use wallet_sequencer::provider::{ProviderHandle, RpcWallet, SimulatedWallet};
use wallet_sequencer::sequencer::SequencePolicy;
use wallet_sequencer::DappSession;

#[derive(Parser, Debug)]
#[command(name = "dapp-demo")]
#[command(about = "Discover wallets, connect one and send a transaction sequence", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sequencing policy: strict, overlapped-2 or overlapped-3.
    #[arg(short, long, default_value = "strict")]
    policy: SequencePolicy,

    /// Wallet to select, by name or unique id. Defaults to the first announced.
    #[arg(short, long)]
    wallet: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DappConfig::default(),
    };
    if config.simulated_wallets.is_empty() && !config.rpc_wallet.enabled {
        config.simulated_wallets.push(SimulatedWalletConfig::default());
    }

    logging::init(&config.observability)?;
    tracing::info!(
        policy = %cli.policy,
        wallets = config.simulated_wallets.len(),
        rpc_wallet = config.rpc_wallet.enabled,
        pacing_delay_ms = config.sequencer.pacing_delay_ms,
        "dapp-demo starting"
    );

    let bus = DiscoveryBus::new(config.discovery.bus_capacity);
    let _announcers = start_announcers(&bus, &config)?;

    let mut session = DappSession::new(bus, &config);
    session.start_discovery();
    tokio::time::sleep(Duration::from_millis(config.discovery.window_ms)).await;

    let providers = session.providers();
    println!("Discovered {} provider(s):", providers.len());
    for descriptor in &providers {
        println!("  {} ({})", descriptor.display_name(), descriptor.unique_id());
    }

    let Some(chosen) = choose(&providers, cli.wallet.as_deref()) else {
        println!("No matching wallet provider was announced");
        return Ok(());
    };

    if let Err(e) = session.connect(chosen).await {
        // Already logged by the connection manager; triggers stay disabled.
        println!("{e}");
        return Ok(());
    }

    let result = session.trigger(cli.policy).await;
    for line in session.status().lines() {
        println!("{line}");
    }

    tracing::info!(
        sent = result.tx_hashes().len(),
        success = result.is_success(),
        "Sequence finished"
    );
    Ok(())
}

/// Announce every configured wallet on the bus.
fn start_announcers(
    bus: &DiscoveryBus,
    config: &DappConfig,
) -> Result<Vec<AnnouncerHandle>, Box<dyn std::error::Error>> {
    let mut handles = Vec::new();

    for wallet in &config.simulated_wallets {
        let info = ProviderInfo::new(Uuid::new_v4().to_string(), wallet.name.clone())
            .with_icon(wallet.icon.clone())
            .with_rdns(wallet.rdns.clone());
        let provider = ProviderHandle::from_capability(SimulatedWallet::from_config(wallet));
        handles.push(spawn_announcer(
            bus,
            ProviderDescriptor::new(info, provider),
            wallet.announce_on_start,
        ));
    }

    if config.rpc_wallet.enabled {
        let rpc = &config.rpc_wallet;
        let info = ProviderInfo::new(Uuid::new_v4().to_string(), rpc.name.clone())
            .with_icon(rpc.icon.clone())
            .with_rdns(rpc.rdns.clone());
        let provider = ProviderHandle::from_capability(RpcWallet::connect(rpc)?);
        handles.push(spawn_announcer(bus, ProviderDescriptor::new(info, provider), true));
    }

    Ok(handles)
}

fn choose<'a>(
    providers: &'a [ProviderDescriptor],
    wanted: Option<&str>,
) -> Option<&'a ProviderDescriptor> {
    match wanted {
        Some(wanted) => providers
            .iter()
            .find(|d| d.unique_id() == wanted || d.display_name() == wanted),
        None => providers.first(),
    }
}
