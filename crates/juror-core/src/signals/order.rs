//! Display ordering for signals and groups.
//!
//! Within a group: `verdict` first, then headline signals, then
//! `statement`, then everything else by name. The sort is stable.
//! Groups: `overall` first, the rest keep their order.

use std::cmp::Ordering;

use super::score::VERDICT_KEY;
use super::{Signal, SignalGroup, OVERALL_GROUP};

const STATEMENT_KEY: &str = "statement";

/// Sort signals into display order, in place.
pub fn order_signals(signals: &mut [Signal]) {
    signals.sort_by(compare_signals);
}

/// Move the `overall` group to the front without reordering the rest.
pub fn order_groups(groups: &mut [SignalGroup]) {
    groups.sort_by_key(|group| group.name() != OVERALL_GROUP);
}

fn compare_signals(a: &Signal, b: &Signal) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

fn sort_key(signal: &Signal) -> (bool, bool, bool, &str) {
    (
        signal.name() != VERDICT_KEY,
        !signal.is_headline(),
        signal.name() != STATEMENT_KEY,
        signal.name(),
    )
}
