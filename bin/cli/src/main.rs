//! Merkle balance commitment CLI
//!
//! Reads ERC-20 balances for a set of holder addresses, commits to them in a
//! binary Merkle tree, and prints the root plus an inclusion proof for one
//! holder.
//!
//! Usage: `merkledrop <erc20-address> <holder>... [--index N]`
//! The JSON-RPC endpoint comes from the `RPC_URL` environment variable.

use alloy_primitives::Address;
use anyhow::{anyhow, bail, Context, Result};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use merkledrop_chain::{format_units, network_name, Config, Erc20, RpcClient};
use merkledrop_tree::{encode_leaf, to_hex, verify_proof, MerkleTree, Side};

const USAGE: &str = "Usage: merkledrop <erc20-address> <holder>... [--index N]";

/// Parsed command line.
#[derive(Debug)]
struct Args {
    token: Address,
    holders: Vec<Address>,
    proof_index: usize,
}

fn parse_args(argv: &[String]) -> Result<Args> {
    let mut positional = Vec::new();
    let mut proof_index = 0usize;

    let mut iter = argv.iter();
    while let Some(arg) = iter.next() {
        if arg == "--index" {
            let value = iter
                .next()
                .ok_or_else(|| anyhow!("--index requires a value"))?;
            proof_index = value
                .parse()
                .with_context(|| format!("invalid --index value {value:?}"))?;
        } else {
            positional.push(arg.clone());
        }
    }

    if positional.len() < 2 {
        bail!("expected a token address and at least one holder address");
    }
    let token = positional[0]
        .parse::<Address>()
        .with_context(|| format!("invalid token address {:?}", positional[0]))?;
    let holders = positional[1..]
        .iter()
        .map(|s| {
            s.parse::<Address>()
                .with_context(|| format!("invalid holder address {s:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if proof_index >= holders.len() {
        bail!(
            "--index {proof_index} out of range for {} holders",
            holders.len()
        );
    }

    Ok(Args { token, holders, proof_index })
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(error) => {
            error!("{error:#}");
            error!("{USAGE}");
            std::process::exit(1);
        }
    };

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from_env();
    let client = RpcClient::new(&config)?;

    let chain_id = client
        .chain_id()
        .await
        .with_context(|| format!("RPC connection to {} failed, check RPC_URL", client.url()))?;
    info!("Network: {}", network_name(chain_id));

    let token = Erc20::new(client, args.token);
    let meta = token.metadata().await;
    info!("Token: {} ({}), decimals: {}", meta.name, meta.symbol, meta.decimals);
    info!("Contract: {}", args.token);
    info!("Holders: {}; proof index: {}", args.holders.len(), args.proof_index);

    let mut balances = Vec::with_capacity(args.holders.len());
    let mut leaves = Vec::with_capacity(args.holders.len());
    for holder in &args.holders {
        let balance = token
            .balance_of(*holder)
            .await
            .with_context(|| format!("balanceOf({holder}) failed"))?;
        leaves.push(encode_leaf(holder.as_slice(), balance)?);
        balances.push(balance);
    }

    let tree = MerkleTree::from_leaves(leaves);
    let root = tree.root()?;
    let proof = tree.proof(args.proof_index)?;
    let target_leaf = tree.leaves()[args.proof_index];

    info!("Merkle root: 0x{}", to_hex(&root));
    for (i, (holder, balance)) in args.holders.iter().zip(&balances).enumerate() {
        let marker = if i == args.proof_index { "  <- proof target" } else { "" };
        info!(
            "[{i}] {holder}  balance={} {}{marker}",
            format_units(*balance, meta.decimals),
            meta.symbol
        );
    }
    info!("Leaf (index {}): 0x{}", args.proof_index, to_hex(&target_leaf));
    info!("Proof (sibling, side):");
    for (depth, step) in proof.steps.iter().enumerate() {
        let side = match step.side {
            Side::Left => "left",
            Side::Right => "right",
        };
        info!("  L{depth}: sibling=0x{} side={side}", to_hex(&step.sibling));
    }

    if !verify_proof(&target_leaf, &proof, &root) {
        bail!("inclusion proof failed to verify against the freshly built root");
    }
    info!("Inclusion proof verifies against the root");
    Ok(())
}
