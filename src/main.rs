// SPDX-License-Identifier: AGPL-3.0-or-later

//! `socialfi` - command-line client for the SocialFi contract.
//!
//! One parameterized binary replaces the pile of near-identical
//! one-shot scripts this tooling grew from: every operation shares the
//! same configuration, logging, cancellation, and confirmation-wait
//! plumbing.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use socialfi_client::amount::format_amount;
use socialfi_client::blockchain::confirm::{await_confirmations, ConfirmationOutcome};
use socialfi_client::blockchain::types::{parse_address, Submission, ROUTINE_CONFIRMATIONS};
use socialfi_client::blockchain::{ContractBackend, SocialFiClient};
use socialfi_client::config::Config;
use socialfi_client::error::ClientError;
use socialfi_client::orchestrate::ensure_holdings;
use socialfi_client::scanner::{InventoryScanner, ScanPolicy};
use socialfi_client::submitter::Submitter;

#[derive(Parser)]
#[command(name = "socialfi")]
#[command(version)]
#[command(about = "Client for the SocialFi NFT/donation contract")]
struct Cli {
    /// Confirmation wait deadline in seconds
    #[arg(long, global = true, default_value_t = 180)]
    deadline_secs: u64,

    /// Confirmations to wait for after a submission
    #[arg(long, global = true, default_value_t = ROUTINE_CONFIRMATIONS)]
    confirmations: u64,

    /// Return right after submission without waiting for confirmations
    #[arg(long, global = true)]
    no_wait: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan token ownership for an address (defaults to the signer)
    Scan {
        owner: Option<String>,
        /// Sweep the full supply instead of stopping at the balance
        #[arg(long)]
        exhaustive: bool,
    },
    /// Quote the mint price and mint one token
    Mint,
    /// Donate native currency to an author
    DonateEth { author: String, amount: String },
    /// Donate an ERC-20 amount to an author
    DonateToken {
        token: String,
        amount: String,
        author: String,
    },
    /// Stake an owned token
    Stake { token_id: u64 },
    /// Unstake a previously staked token
    Unstake { token_id: u64 },
    /// List recent Received events
    Events {
        /// Blocks to look back from the head
        #[arg(long, default_value_t = 2000)]
        lookback: u64,
    },
    /// Scan, mint if empty, re-scan, then optionally donate
    Run {
        /// Native amount to donate after the scan
        #[arg(long)]
        donate: Option<String>,
        /// Donation recipient, required with --donate
        #[arg(long)]
        author: Option<String>,
    },
}

/// Submission follow-up behavior shared by every write command.
#[derive(Clone, Copy)]
struct WaitOptions {
    confirmations: u64,
    deadline: Duration,
    no_wait: bool,
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(err) = run().await {
        error!(error = %err, "command failed");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format == "json")
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run() -> Result<(), ClientError> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    let client = SocialFiClient::connect(&config)?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, cancelling");
                cancel.cancel();
            }
        });
    }

    let json = cli.json;
    let wait = WaitOptions {
        confirmations: cli.confirmations,
        deadline: Duration::from_secs(cli.deadline_secs),
        no_wait: cli.no_wait,
    };
    let backend = client.contract();

    match cli.command {
        Commands::Scan { owner, exhaustive } => {
            let owner = match owner {
                Some(raw) => parse_address(&raw)?,
                None => client.signer_address(),
            };
            let policy = if exhaustive {
                ScanPolicy::Exhaustive
            } else {
                ScanPolicy::EarlyExit
            };

            let inventory = InventoryScanner::with_policy(backend, policy)
                .scan(owner)
                .await?;

            if json {
                println!(
                    "{}",
                    serde_json::json!({ "owner": owner.to_string(), "inventory": &inventory })
                );
            } else {
                println!("owner:   {owner}");
                println!("balance: {}", inventory.balance);
                println!("tokens:  {:?}", inventory.tokens);
            }
        }

        Commands::Mint => {
            let submitter = Submitter::with_cancellation(backend, cancel.clone());
            let submission = submitter.mint(client.signer_address()).await?;
            finish_submission(&client, submission, wait, &cancel).await?;
        }

        Commands::DonateEth { author, amount } => {
            let author = parse_address(&author)?;
            let submitter = Submitter::with_cancellation(backend, cancel.clone());
            let submission = submitter.donate_native(author, &amount).await?;
            finish_submission(&client, submission, wait, &cancel).await?;
        }

        Commands::DonateToken {
            token,
            amount,
            author,
        } => {
            let token = parse_address(&token)?;
            let author = parse_address(&author)?;
            let submitter = Submitter::with_cancellation(backend, cancel.clone());
            let submission = submitter.donate_token(token, &amount, author).await?;
            finish_submission(&client, submission, wait, &cancel).await?;
        }

        Commands::Stake { token_id } => {
            let submitter = Submitter::with_cancellation(backend, cancel.clone());
            let submission = submitter.stake(token_id).await?;
            finish_submission(&client, submission, wait, &cancel).await?;
        }

        Commands::Unstake { token_id } => {
            let submitter = Submitter::with_cancellation(backend, cancel.clone());
            let submission = submitter.unstake(token_id).await?;
            finish_submission(&client, submission, wait, &cancel).await?;
        }

        Commands::Events { lookback } => {
            let head = backend.block_number().await?;
            let from_block = head.saturating_sub(lookback);
            let events = backend.received_events(from_block, head).await?;

            if json {
                let entries: Vec<_> = events
                    .iter()
                    .map(|event| {
                        serde_json::json!({
                            "sender": event.sender.to_string(),
                            "amount": event.amount.to_string(),
                            "block": event.block_number,
                            "tx_hash": event.tx_hash.map(|hash| hash.to_string()),
                        })
                    })
                    .collect();
                println!("{}", serde_json::json!(entries));
            } else {
                println!("{} Received event(s) since block {from_block}:", events.len());
                for event in &events {
                    println!(
                        "  block {:>10}  {}  {}",
                        event.block_number.unwrap_or(0),
                        event.sender,
                        format_amount(event.amount, 18),
                    );
                }
            }
        }

        Commands::Run { donate, author } => {
            let report =
                ensure_holdings(backend, client.signer_address(), wait.deadline, &cancel).await?;

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "before": &report.before,
                        "minted": report.minted.as_ref().map(|s| s.tx_hash.to_string()),
                        "after": &report.after,
                    })
                );
            } else {
                println!(
                    "before: balance {} tokens {:?}",
                    report.before.balance, report.before.tokens
                );
                if let Some(submission) = &report.minted {
                    println!("minted: {}", submission.tx_hash);
                }
                println!(
                    "after:  balance {} tokens {:?}",
                    report.after.balance, report.after.tokens
                );
            }

            if let Some(amount) = donate {
                let author = author.ok_or_else(|| {
                    ClientError::InvalidAddress("--author is required with --donate".to_string())
                })?;
                let author = parse_address(&author)?;

                info!(
                    author = %author,
                    first_token = ?report.after.first_token(),
                    "donating from current holdings"
                );

                let submitter = Submitter::with_cancellation(backend, cancel.clone());
                let submission = submitter.donate_native(author, &amount).await?;
                finish_submission(&client, submission, wait, &cancel).await?;
            }
        }
    }

    Ok(())
}

/// Log a submission and wait for its confirmations unless waiting was
/// disabled.
async fn finish_submission(
    client: &SocialFiClient,
    submission: Submission,
    wait: WaitOptions,
    cancel: &CancellationToken,
) -> Result<(), ClientError> {
    println!("submitted: {}", submission.tx_hash);
    if let Some(value) = submission.value {
        println!("value:     {} ({} ETH)", value, format_amount(value, 18));
    }
    if let Some(link) = client.explorer_tx_url(submission.tx_hash) {
        println!("explorer:  {link}");
    }

    if wait.no_wait {
        return Ok(());
    }

    let outcome = await_confirmations(
        client.contract(),
        submission.tx_hash,
        wait.confirmations,
        wait.deadline,
        cancel,
    )
    .await?;

    match outcome {
        ConfirmationOutcome::Confirmed {
            block_number,
            confirmations,
        } => {
            println!("confirmed in block {block_number} ({confirmations} confirmations)");
            Ok(())
        }
        ConfirmationOutcome::Reverted { block_number } => Err(ClientError::Reverted(format!(
            "transaction {} reverted in block {block_number}",
            submission.tx_hash
        ))),
        ConfirmationOutcome::TimedOut => Err(ClientError::ConfirmationTimeout {
            tx_hash: submission.tx_hash.to_string(),
            waited_secs: wait.deadline.as_secs(),
        }),
    }
}
