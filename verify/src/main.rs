// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use attest_kernel::abi::Function;
use attest_kernel::hash::{hash_content_with, HashBackend};
use attest_kernel::types::address::Address;
use attest_kernel::types::encode_hex;
use attest_kernel::{ContentHash, Decision, DecisionId, VersionNumber};
use attest_node::{ChainAnchorClient, JsonRpcProvider, NodeConfig, Wallet};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(author, version, about = "Decision version-chain tools", long_about = None)]
struct Args {
    /// JSON-RPC endpoint (overrides ATTEST_RPC_URL)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Registry contract address (overrides ATTEST_CONTRACT_ADDRESS)
    #[arg(long, global = true)]
    contract: Option<Address>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Content hash of a file or of literal text
    Hash {
        file: Option<PathBuf>,
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// Compute with both digest implementations and compare
        #[arg(long)]
        check: bool,
    },
    /// Validate an exported decision (JSON)
    Chain { export: PathBuf },
    /// Ask the registry whether a version's hash is recorded
    Verify {
        #[arg(long)]
        decision: DecisionId,
        /// 1-based version number
        #[arg(long)]
        version: u64,
        #[arg(long)]
        hash: ContentHash,
    },
    /// On-chain summary for a decision
    Status {
        #[arg(long)]
        decision: DecisionId,
    },
    /// Registry function selectors
    Selectors,
}

#[derive(Serialize)]
struct ChainReport {
    decision: DecisionId,
    versions: usize,
    current_version: Option<VersionNumber>,
    valid: bool,
    checked: usize,
    violation: Option<attest_kernel::ChainViolation>,
    tampered_content: Option<VersionNumber>,
}

fn load_config(args: &Args) -> Result<NodeConfig> {
    let mut cfg = NodeConfig::from_env().context("Invalid ATTEST_* environment")?;
    if let Some(url) = &args.rpc_url {
        cfg.network.rpc_url = url.clone();
    }
    if let Some(addr) = args.contract {
        cfg.network.contract_address = addr;
    }
    Ok(cfg)
}

fn anchor_client(cfg: NodeConfig) -> ChainAnchorClient {
    if !cfg.network.is_contract_deployed() {
        eprintln!("warning: no contract address configured, on-chain reads answer defaults");
    }
    let provider = Arc::new(JsonRpcProvider::new(cfg.network.rpc_url.clone()));
    ChainAnchorClient::new(Wallet::new(provider, cfg.network), cfg.anchor)
}

fn read_content(file: Option<PathBuf>, text: Option<String>) -> Result<String> {
    match (file, text) {
        (_, Some(text)) => Ok(text),
        (Some(path), None) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, None) => anyhow::bail!("Give a file or --text"),
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    attest_node::telemetry::init_logging();

    match &args.command {
        Command::Hash { file, text, check } => {
            let content = read_content(file.clone(), text.clone())?;
            let native = hash_content_with(HashBackend::Native, &content);
            if *check {
                let software = hash_content_with(HashBackend::Software, &content);
                print_json(&json!({
                    "content_hash": native,
                    "software_hash": software,
                    "backends_agree": native == software,
                }))?;
                if native != software {
                    anyhow::bail!("Digest implementations disagree");
                }
            } else {
                print_json(&json!({ "content_hash": native }))?;
            }
        }
        Command::Chain { export } => {
            let bytes = fs::read(export).context("Failed to read export file")?;
            let decision: Decision =
                serde_json::from_slice(&bytes).context("Failed to parse decision JSON")?;

            let result = decision.validate();
            let report = ChainReport {
                decision: decision.id(),
                versions: decision.len(),
                current_version: decision.current_version(),
                valid: result.is_valid(),
                checked: result.checked,
                violation: result.violation().cloned(),
                tampered_content: decision.audit_contents(),
            };
            print_json(&report)?;

            if !report.valid || report.tampered_content.is_some() {
                std::process::exit(1);
            }
        }
        Command::Verify { decision, version, hash } => {
            let client = anchor_client(load_config(&args)?);
            let number = VersionNumber(*version);
            let verified = client.verify_on_chain(decision, number, hash).await;
            print_json(&json!({
                "decision": decision,
                "version": number,
                "chain_index": number.chain_index(),
                "content_hash": hash,
                "verified": verified,
            }))?;
        }
        Command::Status { decision } => {
            let client = anchor_client(load_config(&args)?);
            let exists = client.decision_exists(decision).await;
            let count = client.version_count(decision).await;
            let latest = client.latest_version(decision).await;
            print_json(&json!({
                "decision": decision,
                "contract": client.network().contract_address,
                "deployed": client.is_contract_deployed(),
                "exists": exists,
                "version_count": count,
                "latest": latest,
            }))?;
        }
        Command::Selectors => {
            let rows: Vec<_> = Function::ALL
                .iter()
                .map(|f| {
                    json!({
                        "name": f.name(),
                        "signature": f.signature(),
                        "selector": encode_hex(&f.selector()),
                        "view": f.is_view(),
                    })
                })
                .collect();
            print_json(&rows)?;
        }
    }

    Ok(())
}
