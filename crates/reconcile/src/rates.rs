//! Caller-side rate resolution
//!
//! Validates a candidate rate and falls back to the last good rate held in a
//! [`RateCache`]. Runs before the engine; the matcher never sees the cache.

use std::collections::HashMap;

use fxrecon_core::{Rate, Side};
use fxrecon_matching::{PositiveRate, validate};
use fxrecon_ports::{RateCache, RateResult};
use log::warn;

/// Last-known-good rates kept in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateCache {
    rates: HashMap<Side, Rate>,
}

impl InMemoryRateCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateCache for InMemoryRateCache {
    fn last_rate(&self, side: Side) -> Option<Rate> {
        self.rates.get(&side).copied()
    }

    fn remember(&mut self, side: Side, rate: Rate) {
        self.rates.insert(side, rate);
    }
}

pub struct RateResolver<C: RateCache> {
    cache: C,
}

impl<C: RateCache> RateResolver<C> {
    pub fn new(cache: C) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Validate `candidate`, falling back to the cached rate for `side`
    ///
    /// A valid candidate replaces the cached rate. When neither is usable the
    /// candidate's own error is returned.
    pub fn resolve(&mut self, side: Side, candidate: Rate) -> RateResult<PositiveRate> {
        match validate(candidate) {
            Ok(rate) => {
                self.cache.remember(side, rate.get());
                Ok(rate)
            }
            Err(err) => {
                let fallback = self.cache.last_rate(side).map(validate);
                match fallback {
                    Some(Ok(rate)) => {
                        warn!(
                            "{} rate {} rejected ({}), using cached rate {}",
                            side.as_str(),
                            candidate,
                            err,
                            rate.get()
                        );
                        Ok(rate)
                    }
                    _ => Err(err),
                }
            }
        }
    }
}
