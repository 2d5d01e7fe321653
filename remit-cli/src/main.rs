//! Command-line wallet for Base remittances.
//!
//! Configuration comes from the environment (or a `.env` file):
//! `REMIT_CHAIN` picks the network, `REMIT_RPC_URL` overrides the default
//! endpoint, `REMIT_PRIVATE_KEY` signs transactions, and
//! `REMIT_CONTRACT_ADDRESS` overrides the deployed remittance contract.

use std::env;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remit_core::{
    fiat_value_cents, format_cents, format_eth, parse_eth_amount, Address, ChainConfig,
    FiatCurrency, NotificationSink, Notice, PaymentRequest, PaymentSubmitter, WalletGateway,
    REMITTANCE_CONTRACT_ADDRESS,
};
use remit_evm::EvmWallet;
use remit_uri::PaymentLinkBuilder;

const CHAIN_VAR: &str = "REMIT_CHAIN";
const RPC_URL_VAR: &str = "REMIT_RPC_URL";
const PRIVATE_KEY_VAR: &str = "REMIT_PRIVATE_KEY";
const CONTRACT_VAR: &str = "REMIT_CONTRACT_ADDRESS";

const DEFAULT_MAINNET_RPC: &str = "https://mainnet.base.org";
const DEFAULT_SEPOLIA_RPC: &str = "https://sepolia.base.org";

#[derive(Parser)]
#[command(name = "remit", about = "Send native-currency payments on Base")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a payment, through the remittance contract by default.
    Send(SendArgs),
    /// Show an account's balance.
    Balance(BalanceArgs),
    /// Build a payment-request link.
    Link(LinkArgs),
    /// Show the fiat value of an ETH amount at the fixed rates.
    Quote(QuoteArgs),
}

#[derive(Args)]
struct SendArgs {
    /// Recipient address.
    to: String,
    /// Amount in ETH.
    amount: String,
    /// Message for the recipient. Dropped when sending with --direct.
    #[arg(long, default_value = "")]
    message: String,
    /// Send a plain transfer instead of calling the remittance contract.
    #[arg(long)]
    direct: bool,
    /// Print the receipt as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct BalanceArgs {
    /// Account to query. Defaults to the configured signing key's account.
    #[arg(long)]
    account: Option<String>,
}

#[derive(Args)]
struct LinkArgs {
    /// Recipient address.
    to: String,
    /// Requested amount in ETH.
    #[arg(long)]
    amount: Option<String>,
    /// Suggested message.
    #[arg(long)]
    message: Option<String>,
}

#[derive(Args)]
struct QuoteArgs {
    /// Amount in ETH.
    amount: String,
    /// Currency code (USD, EUR, GBP, JPY). Quotes all four when omitted.
    #[arg(long)]
    currency: Option<String>,
}

/// Prints the success toast. Failures already surface through the command
/// result, so failure notices are not printed a second time.
struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&self, notice: &Notice) {
        if let Notice::PaymentSent { tx_hash } = notice {
            eprintln!("Payment sent: {}", tx_hash);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "remit_core=info,remit_evm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Send(args) => send(args).await,
        Commands::Balance(args) => balance(args).await,
        Commands::Link(args) => link(args),
        Commands::Quote(args) => quote(args),
    }
}

fn chain_from_env() -> Result<ChainConfig> {
    let chain = env::var(CHAIN_VAR).unwrap_or_else(|_| "base".to_string());
    let rpc_url = env::var(RPC_URL_VAR).ok();
    match chain.as_str() {
        "base" => Ok(ChainConfig::base_mainnet(
            rpc_url.unwrap_or_else(|| DEFAULT_MAINNET_RPC.to_string()),
        )),
        "base-sepolia" => Ok(ChainConfig::base_sepolia(
            rpc_url.unwrap_or_else(|| DEFAULT_SEPOLIA_RPC.to_string()),
        )),
        other => bail!(
            "unknown {} value {:?} (expected \"base\" or \"base-sepolia\")",
            CHAIN_VAR,
            other
        ),
    }
}

fn signing_wallet(chain: &ChainConfig) -> Result<EvmWallet> {
    let key = env::var(PRIVATE_KEY_VAR)
        .with_context(|| format!("{} must be set to send transactions", PRIVATE_KEY_VAR))?;
    EvmWallet::new(chain, &key).context("failed to build wallet")
}

fn contract_address() -> Result<Address> {
    let raw = env::var(CONTRACT_VAR).unwrap_or_else(|_| REMITTANCE_CONTRACT_ADDRESS.to_string());
    raw.parse()
        .map_err(|_| anyhow!("{} is not a valid contract address: {}", CONTRACT_VAR, raw))
}

async fn send(args: SendArgs) -> Result<()> {
    let chain = chain_from_env()?;
    tracing::info!("network: {} (chain id {})", chain.name, chain.chain_id);
    let wallet = Arc::new(signing_wallet(&chain)?);

    let submitter = if args.direct {
        PaymentSubmitter::direct(wallet.clone())
    } else {
        let contract = wallet.remittance_client(contract_address()?)?;
        PaymentSubmitter::with_contract(wallet.clone(), Arc::new(contract))
    };
    let submitter = submitter.with_sink(Arc::new(TerminalSink));

    let request = PaymentRequest::new(args.to, args.amount).with_message(args.message);
    match submitter.submit(&request).await {
        Ok(receipt) => {
            if args.json {
                let mut out = serde_json::to_value(&receipt)?;
                out["explorer_url"] = serde_json::json!(chain.tx_url(&receipt.tx_hash));
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Sent {} ETH to {}", format_eth(receipt.value_wei), receipt.recipient);
                println!("{}", chain.tx_url(&receipt.tx_hash));
            }
            Ok(())
        }
        Err(err) => Err(anyhow!(err)),
    }
}

async fn balance(args: BalanceArgs) -> Result<()> {
    let chain = chain_from_env()?;

    let (wallet, account) = match args.account {
        Some(raw) => {
            let account: Address = raw
                .parse()
                .map_err(|_| anyhow!("not a valid address: {}", raw))?;
            (EvmWallet::read_only(&chain)?, account)
        }
        None => {
            let wallet = signing_wallet(&chain)?;
            let account = wallet
                .account()
                .ok_or_else(|| anyhow!("wallet has no account"))?;
            (wallet, account)
        }
    };

    let balance_wei = wallet
        .balance(account)
        .await
        .context("balance query failed")?;
    println!("{} ETH", format_eth(balance_wei));
    Ok(())
}

fn link(args: LinkArgs) -> Result<()> {
    let recipient: Address = args
        .to
        .parse()
        .map_err(|_| anyhow!("not a valid address: {}", args.to))?;

    let mut builder = PaymentLinkBuilder::new(recipient);
    if let Some(amount) = args.amount {
        builder = builder.amount_str(&amount)?;
    }
    if let Some(message) = args.message {
        builder = builder.message(message)?;
    }

    println!("{}", builder.build());
    Ok(())
}

fn quote(args: QuoteArgs) -> Result<()> {
    let value_wei =
        parse_eth_amount(&args.amount).map_err(|_| anyhow!("not a valid amount: {}", args.amount))?;

    let currencies: Vec<FiatCurrency> = match args.currency {
        Some(code) => vec![code.parse()?],
        None => vec![
            FiatCurrency::Usd,
            FiatCurrency::Eur,
            FiatCurrency::Gbp,
            FiatCurrency::Jpy,
        ],
    };

    for currency in currencies {
        let cents = fiat_value_cents(value_wei, currency);
        println!("{} {}", format_cents(cents), currency);
    }
    Ok(())
}
