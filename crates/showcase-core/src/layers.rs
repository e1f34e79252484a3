//! Paint-order manipulation.
//!
//! Paint order is a back-to-front sequence: index 0 is painted first and
//! therefore sits visually at the bottom.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a layer reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderDirection {
    /// Topmost.
    Front,
    /// Bottommost.
    Back,
    /// Swap with the next shape above.
    Up,
    /// Swap with the next shape below.
    Down,
}

impl ReorderDirection {
    pub fn all() -> &'static [ReorderDirection] {
        &[
            ReorderDirection::Front,
            ReorderDirection::Up,
            ReorderDirection::Down,
            ReorderDirection::Back,
        ]
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            ReorderDirection::Front => "To Front",
            ReorderDirection::Back => "To Back",
            ReorderDirection::Up => "Move Up",
            ReorderDirection::Down => "Move Down",
        }
    }
}

impl fmt::Display for ReorderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReorderDirection::Front => "front",
            ReorderDirection::Back => "back",
            ReorderDirection::Up => "up",
            ReorderDirection::Down => "down",
        };
        f.write_str(name)
    }
}

impl FromStr for ReorderDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(ReorderDirection::Front),
            "back" => Ok(ReorderDirection::Back),
            "up" | "forward" => Ok(ReorderDirection::Up),
            "down" | "backward" => Ok(ReorderDirection::Down),
            other => Err(format!("unknown reorder direction: {other}")),
        }
    }
}

/// Move the item at `index` within a back-to-front sequence.
///
/// Returns the item's new index, or `None` if the order did not change
/// (the item was already at the requested boundary or `index` is out of range).
pub fn reorder<T>(items: &mut Vec<T>, index: usize, direction: ReorderDirection) -> Option<usize> {
    let len = items.len();
    if index >= len {
        return None;
    }
    match direction {
        ReorderDirection::Front => {
            if index == len - 1 {
                return None;
            }
            let item = items.remove(index);
            items.push(item);
            Some(len - 1)
        }
        ReorderDirection::Back => {
            if index == 0 {
                return None;
            }
            let item = items.remove(index);
            items.insert(0, item);
            Some(0)
        }
        ReorderDirection::Up => {
            if index == len - 1 {
                return None;
            }
            items.swap(index, index + 1);
            Some(index + 1)
        }
        ReorderDirection::Down => {
            if index == 0 {
                return None;
            }
            items.swap(index, index - 1);
            Some(index - 1)
        }
    }
}

/// Position at which an item with rank `z_order` is inserted so that ranks
/// stay non-decreasing. Equal ranks keep insertion order.
pub fn insertion_index<T>(items: &[T], z_order: i32, rank: impl Fn(&T) -> i32) -> usize {
    items.partition_point(|item| rank(item) <= z_order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&'static str]) -> Vec<&'static str> {
        items.to_vec()
    }

    #[test]
    fn test_front_and_up_from_initial_order() {
        let mut order = ids(&["r1", "c1", "s1"]);
        assert_eq!(reorder(&mut order, 0, ReorderDirection::Front), Some(2));
        assert_eq!(order, ["c1", "s1", "r1"]);

        let mut order = ids(&["r1", "c1", "s1"]);
        assert_eq!(reorder(&mut order, 0, ReorderDirection::Up), Some(1));
        assert_eq!(order, ["c1", "r1", "s1"]);
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut order = ids(&["r1", "c1", "s1"]);
        assert_eq!(reorder(&mut order, 2, ReorderDirection::Front), None);
        assert_eq!(reorder(&mut order, 2, ReorderDirection::Up), None);
        assert_eq!(reorder(&mut order, 0, ReorderDirection::Back), None);
        assert_eq!(reorder(&mut order, 0, ReorderDirection::Down), None);
        assert_eq!(reorder(&mut order, 7, ReorderDirection::Front), None);
        assert_eq!(order, ["r1", "c1", "s1"]);
    }

    #[test]
    fn test_back_and_down() {
        let mut order = ids(&["r1", "c1", "s1"]);
        assert_eq!(reorder(&mut order, 2, ReorderDirection::Back), Some(0));
        assert_eq!(order, ["s1", "r1", "c1"]);
        assert_eq!(reorder(&mut order, 2, ReorderDirection::Down), Some(1));
        assert_eq!(order, ["s1", "c1", "r1"]);
    }

    #[test]
    fn test_any_sequence_is_a_permutation() {
        let directions = ReorderDirection::all();
        let mut order: Vec<u32> = (0..6).collect();
        // Deterministic pseudo-random walk over indices and directions.
        let mut state = 0x2545_f491_u32;
        for _ in 0..500 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let index = (state % 6) as usize;
            let direction = directions[(state / 6 % 4) as usize];
            reorder(&mut order, index, direction);
            let mut sorted = order.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..6).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_insertion_index_keeps_ties_in_order() {
        let ranks = [0, 1, 1, 3];
        assert_eq!(insertion_index(&ranks, 1, |r| *r), 3);
        assert_eq!(insertion_index(&ranks, -1, |r| *r), 0);
        assert_eq!(insertion_index(&ranks, 5, |r| *r), 4);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("Front".parse::<ReorderDirection>(), Ok(ReorderDirection::Front));
        assert_eq!("forward".parse::<ReorderDirection>(), Ok(ReorderDirection::Up));
        assert!("sideways".parse::<ReorderDirection>().is_err());
    }
}
