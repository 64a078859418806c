use itertools::iproduct;
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Reverse;

use crate::data::{PreferredTime, Slot};
use crate::roster::Roster;

/// Every slot of the week in random order, then stably pulled towards the
/// subject's preferred time of day.
///
/// Shuffling spreads a teacher's periods across the week instead of packing
/// them into the earliest free slots.
pub(crate) fn candidate_slots<R: Rng + ?Sized>(
    roster: &Roster,
    preferred: Option<PreferredTime>,
    rng: &mut R,
) -> Vec<Slot> {
    let mut slots: Vec<Slot> = iproduct!(0..roster.days(), 0..roster.periods())
        .map(|(day, period)| Slot::new(day, period))
        .collect();
    slots.shuffle(rng);
    match preferred {
        Some(PreferredTime::Morning) => slots.sort_by_key(|slot| slot.period),
        Some(PreferredTime::Afternoon) => slots.sort_by_key(|slot| Reverse(slot.period)),
        None => {}
    }
    slots
}
