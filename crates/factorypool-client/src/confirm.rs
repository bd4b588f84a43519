use crate::{
    config::ConfirmationConfig,
    errors::{ClientError, ClientResult},
    provider::WalletProvider,
    types::{TxHash, TxReceipt, TxStatus},
};
use backoff::future::retry;
use tracing::{debug, info, warn};

/// Suspend until `hash` is mined, polling the provider on an exponential
/// schedule. A reverted receipt becomes [`ClientError::Reverted`].
///
/// Only the receipt lookup is repeated; the transaction itself is never resent.
pub async fn wait_for_receipt<P: WalletProvider>(
    provider: &P,
    hash: &TxHash,
    config: &ConfirmationConfig,
) -> ClientResult<TxReceipt> {
    info!("Waiting for transaction {}", hash);

    let receipt = retry(config.backoff(), move || async move {
        match provider.transaction_receipt(hash).await {
            Ok(Some(receipt)) => Ok(receipt),
            Ok(None) => {
                debug!("Transaction {} not mined yet", hash);
                Err(backoff::Error::transient(ClientError::ConfirmationTimeout {
                    hash: *hash,
                }))
            }
            Err(e) => Err(backoff::Error::permanent(e)),
        }
    })
    .await?;

    match receipt.status {
        TxStatus::Success => {
            debug!("Transaction {} mined in block {}", hash, receipt.block_number);
            Ok(receipt)
        }
        TxStatus::Reverted { reason } => {
            warn!("Transaction {} reverted: {:?}", hash, reason);
            Err(ClientError::Reverted { reason })
        }
    }
}
