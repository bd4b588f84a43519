pub mod add_token;
pub mod buy;
pub mod campaigns;
pub mod create;
pub mod finalize;
pub mod init;
pub mod network;
pub mod sandbox;
pub mod stats;

use crate::render;
use factorypool_client::ActionOutcome;

/// Print what a mined transaction changed
fn print_outcome(outcome: &ActionOutcome) {
    println!(
        "✅ Confirmed in block {} ({})",
        outcome.receipt.block_number, outcome.receipt.hash
    );
    println!("🎉 {}", outcome.notice);
    if let Some(stats) = &outcome.stats {
        println!("{}", render::stats(stats));
    }
}
