use fxrecon_core::{MatchOutcome, RemainingEntry, Transaction};

/// Port for BUY/SELL pairing algorithms
///
/// Implementations must be deterministic: identical inputs give identical
/// outcomes, and reordering records with distinct timestamps changes nothing.
/// OTHER records are ignored.
pub trait MatchingAlgorithm: Send + Sync {
    /// Match a period's transactions, starting from open inventory
    ///
    /// Opening entries are queued ahead of the period's own transactions.
    fn match_with_opening(
        &self,
        opening: &[RemainingEntry],
        transactions: &[Transaction],
    ) -> MatchOutcome;

    /// Match a period's transactions with empty queues
    fn match_transactions(&self, transactions: &[Transaction]) -> MatchOutcome {
        self.match_with_opening(&[], transactions)
    }

    /// Get the name of the algorithm
    fn name(&self) -> &str;
}
