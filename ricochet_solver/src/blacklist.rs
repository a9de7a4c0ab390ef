use fxhash::FxHashMap;
use ricochet_board::{Position, Robot};

/// Limits how often a robot may be moved onto the same field during one search.
///
/// Every robot has its own visit counter per field. A destination is admitted as long as its
/// counter does not exceed the limit, so a limit of `n` admits each field `n + 1` times per robot.
/// Without a limit every destination is admitted, but the visits are still counted.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    limit: Option<usize>,
    visits: FxHashMap<Robot, FxHashMap<Position, usize>>,
}

impl Blacklist {
    /// Creates a new blacklist with the given `limit`, `None` means unlimited.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            visits: FxHashMap::default(),
        }
    }

    /// Returns the limit of the blacklist.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Checks if `robot` may be moved to `pos` and counts the visit if so.
    pub fn admit(&mut self, robot: Robot, pos: Position) -> bool {
        let counter = self
            .visits
            .entry(robot)
            .or_default()
            .entry(pos)
            .or_insert(0);

        match self.limit {
            Some(limit) if *counter > limit => false,
            _ => {
                *counter += 1;
                true
            }
        }
    }

    /// Returns how often `robot` has been admitted to `pos`.
    pub fn visits(&self, robot: Robot, pos: Position) -> usize {
        self.visits
            .get(&robot)
            .and_then(|fields| fields.get(&pos))
            .copied()
            .unwrap_or(0)
    }
}
