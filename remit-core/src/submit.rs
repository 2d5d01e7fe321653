//! The payment submission pipeline.
//!
//! One `submit` call drives a payment through validation, a fresh balance
//! check, and dispatch on whichever route the submitter was built with. The
//! pipeline suspends only at collaborator calls and keeps no state across
//! submissions, so a submitter is reusable as soon as a call returns.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Result, SubmitError};
use crate::gateway::{RemittanceContract, WalletGateway};
use crate::notify::{NotificationSink, Notice, NullSink};
use crate::payment::{validate, NormalizedPayment, PaymentRequest, Receipt, RouteKind};

/// Where dispatch sends a payment. Fixed when the submitter is built.
pub enum DispatchRoute {
    /// Through the remittance contract; the message is forwarded on-chain.
    Contract(Arc<dyn RemittanceContract>),
    /// A plain wallet transfer; the message is dropped.
    Direct,
}

impl DispatchRoute {
    /// Marker for the route, as recorded on receipts.
    pub fn kind(&self) -> RouteKind {
        match self {
            DispatchRoute::Contract(_) => RouteKind::Contract,
            DispatchRoute::Direct => RouteKind::Direct,
        }
    }
}

/// Result of one submission attempt.
pub type SubmissionResult = Result<Receipt>;

/// Drives payment submissions against a wallet and an optional remittance
/// contract.
pub struct PaymentSubmitter {
    wallet: Arc<dyn WalletGateway>,
    route: DispatchRoute,
    sink: Arc<dyn NotificationSink>,
}

impl PaymentSubmitter {
    /// Build a submitter that routes payments through the remittance
    /// contract.
    pub fn with_contract(
        wallet: Arc<dyn WalletGateway>,
        contract: Arc<dyn RemittanceContract>,
    ) -> Self {
        Self {
            wallet,
            route: DispatchRoute::Contract(contract),
            sink: Arc::new(NullSink),
        }
    }

    /// Build a submitter that sends plain transfers.
    pub fn direct(wallet: Arc<dyn WalletGateway>) -> Self {
        Self {
            wallet,
            route: DispatchRoute::Direct,
            sink: Arc::new(NullSink),
        }
    }

    /// Attach a notification sink.
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Route this submitter dispatches on.
    pub fn route_kind(&self) -> RouteKind {
        self.route.kind()
    }

    /// Submit one payment end to end.
    ///
    /// Runs validation, a fresh balance check, and dispatch, in that order;
    /// the first failure short-circuits. Exactly one notice reaches the
    /// sink per call. Dispatch moves real funds: callers must not start a
    /// second submission for the same account while one is in flight (the
    /// pipeline itself takes no lock).
    pub async fn submit(&self, request: &PaymentRequest) -> SubmissionResult {
        let outcome = self.run(request).await;

        match &outcome {
            Ok(receipt) => {
                info!("payment sent: {}", receipt.tx_hash);
                self.sink.notify(&Notice::PaymentSent {
                    tx_hash: receipt.tx_hash,
                });
            }
            Err(err) => {
                warn!("payment failed during {:?}: {}", err.phase(), err);
                self.sink.notify(&Notice::PaymentFailed {
                    reason: err.to_string(),
                });
            }
        }

        outcome
    }

    async fn run(&self, request: &PaymentRequest) -> SubmissionResult {
        let payment = validate(request)?;
        debug!(
            "request validated: {} wei to {}",
            payment.value_wei, payment.recipient
        );

        let account = self
            .wallet
            .account()
            .ok_or(SubmitError::WalletNotConnected)?;
        let available_wei = self
            .wallet
            .balance(account)
            .await
            .map_err(SubmitError::BalanceUnavailable)?;
        if available_wei < payment.value_wei {
            return Err(SubmitError::InsufficientBalance {
                required_wei: payment.value_wei,
                available_wei,
            });
        }

        self.dispatch(&payment).await
    }

    async fn dispatch(&self, payment: &NormalizedPayment) -> SubmissionResult {
        let tx_hash = match &self.route {
            DispatchRoute::Contract(contract) => {
                debug!("dispatching through remittance contract");
                contract
                    .send_payment(payment.recipient, &payment.message, payment.value_wei)
                    .await
                    .map_err(SubmitError::Dispatch)?
            }
            DispatchRoute::Direct => {
                if !payment.message.is_empty() {
                    debug!("direct transfers carry no message; dropping it");
                }
                self.wallet
                    .transfer(payment.recipient, payment.value_wei)
                    .await
                    .map_err(SubmitError::Dispatch)?
            }
        };

        Ok(Receipt {
            tx_hash,
            recipient: payment.recipient,
            value_wei: payment.value_wei,
            route: self.route.kind(),
        })
    }
}
