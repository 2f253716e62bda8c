use fxrecon_core::{Rate, Side};

/// Port for the caller's last-known-good rate store
///
/// Consulted by caller-side rate resolution, never by the matcher.
pub trait RateCache {
    /// Last rate remembered for a side
    fn last_rate(&self, side: Side) -> Option<Rate>;

    /// Remember a rate that passed validation
    fn remember(&mut self, side: Side, rate: Rate);
}
