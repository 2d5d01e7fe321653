//! Submission outcome notifications.

use crate::payment::TxHash;

/// Notice emitted once per completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The payment was accepted on-chain.
    PaymentSent {
        /// Hash of the accepted transaction.
        tx_hash: TxHash,
    },
    /// The payment failed.
    PaymentFailed {
        /// Display text of the error.
        reason: String,
    },
}

/// Receives submission outcome notices.
///
/// Notices are advisory: the pipeline emits exactly one per completed
/// submission, never waits on the sink, and ignores whatever the sink does
/// with it. Implementations must not block.
pub trait NotificationSink: Send + Sync {
    /// Handle one notice.
    fn notify(&self, notice: &Notice);
}

/// Sink that drops every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notice: &Notice) {}
}
