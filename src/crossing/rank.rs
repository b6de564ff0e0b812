//! Right-of-way ranking for ready trains.
//!
//! The arbiter reduces the ready frontier pairwise with [`duel`]; applying
//! it left-to-right yields the single global best. Every tie resolves
//! deterministically — priority first, then load time and id within a
//! direction, then the current `Turn` across directions.

use crate::crossing::train::{Direction, Priority, Train, TrainId};

/// Decides which of two ready trains has right of way.
///
/// 1. Higher priority wins outright, irrespective of direction or load.
/// 2. Equal priority, same direction: smaller load duration wins; on an
///    exact tie, the smaller id (earlier admission) wins.
/// 3. Equal priority, opposite directions: the train whose direction
///    matches `turn` wins.
#[must_use]
pub fn duel<'a>(a: &'a Train, b: &'a Train, turn: Direction) -> &'a Train {
    match (a.priority, b.priority) {
        (Priority::High, Priority::Low) => a,
        (Priority::Low, Priority::High) => b,
        _ if a.direction == b.direction => match a.load_ticks.cmp(&b.load_ticks) {
            std::cmp::Ordering::Less => a,
            std::cmp::Ordering::Greater => b,
            std::cmp::Ordering::Equal => {
                if a.id <= b.id {
                    a
                } else {
                    b
                }
            }
        },
        _ => {
            if a.direction == turn {
                a
            } else {
                b
            }
        }
    }
}

/// Reduces a frontier to the train that crosses next.
///
/// Returns `None` only for an empty frontier. `trains` is the full
/// per-train table indexed by id.
#[must_use]
pub fn select_next(frontier: &[TrainId], trains: &[Train], turn: Direction) -> Option<TrainId> {
    frontier
        .iter()
        .map(|id| &trains[id.index()])
        .reduce(|best, challenger| duel(best, challenger, turn))
        .map(|train| train.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn train(id: usize, direction: Direction, priority: Priority, load_ticks: u64) -> Train {
        Train {
            id: TrainId(id),
            direction,
            priority,
            load_ticks,
            cross_ticks: 1,
        }
    }

    #[test]
    fn high_priority_beats_low_regardless_of_load() {
        let slow_high = train(0, Direction::West, Priority::High, 99);
        let fast_low = train(1, Direction::East, Priority::Low, 1);
        assert_eq!(duel(&slow_high, &fast_low, Direction::East).id, TrainId(0));
        assert_eq!(duel(&fast_low, &slow_high, Direction::East).id, TrainId(0));
    }

    #[test]
    fn same_direction_smaller_load_wins() {
        let a = train(0, Direction::East, Priority::Low, 5);
        let b = train(1, Direction::East, Priority::Low, 2);
        assert_eq!(duel(&a, &b, Direction::West).id, TrainId(1));
    }

    #[test]
    fn equal_load_same_direction_smaller_id_wins() {
        // Loads 3 and 3, ids 2 and 5: id 2 crosses first.
        let a = train(2, Direction::East, Priority::Low, 3);
        let b = train(5, Direction::East, Priority::Low, 3);
        assert_eq!(duel(&a, &b, Direction::West).id, TrainId(2));
        assert_eq!(duel(&b, &a, Direction::West).id, TrainId(2));
    }

    #[test]
    fn opposite_directions_follow_turn() {
        let east = train(0, Direction::East, Priority::Low, 3);
        let west = train(1, Direction::West, Priority::Low, 3);
        assert_eq!(duel(&east, &west, Direction::East).id, TrainId(0));
        assert_eq!(duel(&east, &west, Direction::West).id, TrainId(1));
    }

    #[test]
    fn select_next_empty_frontier_is_none() {
        assert_eq!(select_next(&[], &[], Direction::East), None);
    }

    #[test]
    fn select_next_reduces_full_frontier() {
        let trains = vec![
            train(0, Direction::East, Priority::Low, 1),
            train(1, Direction::West, Priority::High, 9),
            train(2, Direction::East, Priority::High, 4),
        ];
        let frontier = [TrainId(0), TrainId(1), TrainId(2)];
        // High beats low; among the highs, 4 < 9 in... different directions,
        // so the turn decides: East favors train 2.
        assert_eq!(
            select_next(&frontier, &trains, Direction::East),
            Some(TrainId(2))
        );
        assert_eq!(
            select_next(&frontier, &trains, Direction::West),
            Some(TrainId(1))
        );
    }

    fn arb_train(id: usize) -> impl Strategy<Value = Train> {
        (any::<bool>(), any::<bool>(), 0u64..20).prop_map(move |(east, high, load_ticks)| Train {
            id: TrainId(id),
            direction: if east { Direction::East } else { Direction::West },
            priority: if high { Priority::High } else { Priority::Low },
            load_ticks,
            cross_ticks: 1,
        })
    }

    proptest! {
        /// The winner does not depend on the order the frontier is scanned.
        #[test]
        fn winner_is_invariant_under_scan_order(
            trains in (1usize..8)
                .prop_flat_map(|n| (0..n).map(arb_train).collect::<Vec<_>>()),
            turn_east in any::<bool>(),
        ) {
            let turn = if turn_east { Direction::East } else { Direction::West };
            let ids: Vec<TrainId> = trains.iter().map(|t| t.id).collect();

            let forward = select_next(&ids, &trains, turn);
            let reversed: Vec<TrainId> = ids.iter().rev().copied().collect();
            let backward = select_next(&reversed, &trains, turn);
            prop_assert_eq!(forward, backward);

            for rotation in 1..ids.len() {
                let mut rotated = ids.clone();
                rotated.rotate_left(rotation);
                prop_assert_eq!(select_next(&rotated, &trains, turn), forward);
            }
        }

        /// Exactly one of two distinct trains wins, whichever argument
        /// order they are compared in.
        #[test]
        fn duel_is_antisymmetric(
            a in arb_train(0),
            b in arb_train(1),
            turn_east in any::<bool>(),
        ) {
            let turn = if turn_east { Direction::East } else { Direction::West };
            prop_assert_eq!(duel(&a, &b, turn).id, duel(&b, &a, turn).id);
        }
    }
}
