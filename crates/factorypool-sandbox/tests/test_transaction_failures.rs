mod common;

use common::{batch_draft, fast_config, TestHarness, NOW};
use factorypool_client::{
    ActionRequest, ButtonId, CampaignDraft, CampaignDuration, ClientConfig, ClientError,
    ConfirmationConfig, CrowdfundingContract, Operation,
};
use factorypool_sandbox::LocalChain;
use factorypool_view::AllowedAction;
use rust_decimal::Decimal;

fn buy_button(index: u64) -> ButtonId {
    ButtonId::Campaign {
        index,
        action: AllowedAction::Buy,
    }
}

/// Connected as a buyer, with one live batch of 10 units at 0.1 ETH
async fn buyer_with_live_batch() -> TestHarness {
    let test = TestHarness::connected().await;
    test.client
        .create_campaign(&batch_draft(10, "0.1", 5))
        .await
        .unwrap();
    test.switch_to(1);
    test
}

/// A declined signature reports a notice and releases the button so the user
/// can try again
#[tokio::test]
async fn test_user_rejection_releases_button() {
    let test = buyer_with_live_batch().await;
    let board = test.client.load_campaigns().await;
    let request = board.card(0).unwrap().action.unwrap().buy_units(1).unwrap();

    test.chain.reject_next_signature();
    let err = test.client.dispatch(request).await.unwrap_err();
    assert!(matches!(err, ClientError::UserRejected));
    assert_eq!(err.notice(Operation::Buy), "Transaction was rejected by user.");
    assert!(!test.client.is_pending(buy_button(0)));
    assert_eq!(test.chain.snapshot().campaigns[0].total_raised, 0);

    let outcome = test.client.dispatch(request).await.unwrap();
    assert_eq!(outcome.notice, "Successfully bought 1 items for 0.100000 ETH!");
}

/// A second press while the first transaction is pending is refused
#[tokio::test]
async fn test_second_press_while_pending_is_busy() {
    let test = buyer_with_live_batch().await;
    let board = test.client.load_campaigns().await;
    let request = board.card(0).unwrap().action.unwrap().buy_units(1).unwrap();

    test.chain.delay_receipts(3);
    let (first, second) = tokio::join!(
        test.client.dispatch(request),
        test.client.dispatch(request)
    );

    assert!(first.is_ok());
    assert!(matches!(second, Err(ClientError::Busy(_))));
    assert!(!test.client.is_pending(buy_button(0)));
    assert_eq!(test.chain.snapshot().contribution(0, &test.account(1)), 10u128.pow(17));
}

#[tokio::test]
async fn test_slow_receipt_is_awaited() {
    let test = buyer_with_live_batch().await;
    let board = test.client.load_campaigns().await;
    let request = board.card(0).unwrap().action.unwrap().buy_units(2).unwrap();

    test.chain.delay_receipts(4);
    let outcome = test.client.dispatch(request).await.unwrap();
    assert_eq!(outcome.board.card(0).unwrap().view.progress_percent, 20);
    assert_eq!(outcome.receipt.block_number, 2);
}

/// A contract revert carries its reason into the notice
#[tokio::test]
async fn test_revert_reason_reaches_notice() {
    let test = buyer_with_live_batch().await;
    let session = test.client.session().unwrap();

    let err = session.crowdfunding().finalize_campaign(0).await.unwrap_err();
    assert_eq!(
        err.notice(Operation::Finalize),
        "Error: Campaign has not ended yet"
    );

    let err = session.crowdfunding().contribute(0, 0).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Reverted { reason: Some(ref r) } if r == "Contribution must be greater than zero"
    ));
}

/// A transaction mined with a failed status surfaces its reason and frees
/// the button; the chain keeps no trace of the purchase
#[tokio::test]
async fn test_reverted_receipt_releases_button() {
    let test = buyer_with_live_batch().await;
    let board = test.client.load_campaigns().await;
    let request = board.card(0).unwrap().action.unwrap().buy_units(1).unwrap();

    test.chain.revert_next_receipt("Campaign has ended");
    let err = test.client.dispatch(request).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Reverted { reason: Some(ref r) } if r == "Campaign has ended"
    ));
    assert_eq!(err.notice(Operation::Buy), "Error: Campaign has ended");
    assert!(!test.client.is_pending(buy_button(0)));
    assert_eq!(test.chain.snapshot().campaigns[0].total_raised, 0);

    assert!(test.client.dispatch(request).await.is_ok());
    assert_eq!(test.chain.snapshot().campaigns[0].total_raised, 10u128.pow(17));
}

/// A receipt that never shows up gives up once the wait is spent and frees
/// the button
#[tokio::test]
async fn test_confirmation_timeout_releases_button() {
    let chain = LocalChain::genesis().unwrap();
    chain.freeze_time(NOW);
    let config = ClientConfig {
        confirmation: ConfirmationConfig {
            initial_interval_ms: 1,
            max_interval_ms: 1,
            max_wait_secs: 0,
        },
        ..fast_config()
    };
    let test = TestHarness::with_config(chain, config);
    test.client.connect().await.unwrap();
    test.client
        .create_campaign(&batch_draft(10, "0.1", 5))
        .await
        .unwrap();
    test.switch_to(1);

    let board = test.client.load_campaigns().await;
    let request = board.card(0).unwrap().action.unwrap().buy_units(1).unwrap();

    test.chain.delay_receipts(u32::MAX);
    let err = test.client.dispatch(request).await.unwrap_err();
    assert!(matches!(err, ClientError::ConfirmationTimeout { .. }));
    assert!(!test.client.is_pending(buy_button(0)));

    // the transaction was still submitted
    assert_eq!(test.chain.snapshot().next_nonce, 2);
}

/// The client re-derives the view before submitting, so a card rendered
/// before the deadline cannot buy after it
#[tokio::test]
async fn test_stale_card_is_refused() {
    let test = buyer_with_live_batch().await;
    let board = test.client.load_campaigns().await;
    let request = board.card(0).unwrap().action.unwrap().buy_units(1).unwrap();

    test.chain.advance_time(301);
    let err = test.client.dispatch(request).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::ActionNotAllowed {
            index: 0,
            requested: AllowedAction::Buy,
            allowed: AllowedAction::None
        }
    ));
    assert_eq!(test.chain.snapshot().next_nonce, 1);
}

#[tokio::test]
async fn test_unknown_campaign() {
    let test = buyer_with_live_batch().await;
    assert!(matches!(
        test.client.dispatch(ActionRequest::Finalize { index: 9 }).await,
        Err(ClientError::CampaignNotFound(9))
    ));
}

#[tokio::test]
async fn test_insufficient_funds() {
    let test = TestHarness::connected().await;
    test.client
        .create_campaign(&batch_draft(1, "20000", 5))
        .await
        .unwrap();
    test.switch_to(1);

    let board = test.client.load_campaigns().await;
    let request = board.card(0).unwrap().action.unwrap().buy_units(1).unwrap();
    let err = test.client.dispatch(request).await.unwrap_err();
    assert!(matches!(err, ClientError::Wallet { code: -32000, .. }));
    assert_eq!(
        err.notice(Operation::Buy),
        "Failed to buy items. Check logs for details."
    );
}

#[tokio::test]
async fn test_invalid_draft_submits_nothing() {
    let test = TestHarness::connected().await;
    let draft = CampaignDraft::ProductionBatch {
        company: "Acme".to_string(),
        product: String::new(),
        quantity: 10,
        price_per_unit: Decimal::ONE,
        duration: CampaignDuration::new(0, 1, 0),
    };

    let err = test.client.create_campaign(&draft).await.unwrap_err();
    assert_eq!(
        err.notice(Operation::CreateCampaign),
        "Please fill in Company Name and Product Name!"
    );
    assert!(!test.client.is_pending(ButtonId::CreateCampaign));
    assert!(test.chain.snapshot().campaigns.is_empty());
}
