/***************************************/
/*       Public data structures        */
/***************************************/

/// Per-floor pending-request flags plus the nearest-request searches.
///
/// One flag per floor index, fixed length. A flag is true while a call for
/// that floor has been registered and not yet served by a door-open cycle.
/// Registering the same floor twice is idempotent.
pub struct RequestRegister {
    flags: Vec<bool>,
}

impl RequestRegister {
    pub fn new(n_floors: usize) -> RequestRegister {
        RequestRegister {
            flags: vec![false; n_floors],
        }
    }

    pub fn set(&mut self, index: usize) {
        self.flags[index] = true;
    }

    pub fn clear(&mut self, index: usize) {
        self.flags[index] = false;
    }

    pub fn is_pending(&self, index: usize) -> bool {
        self.flags[index]
    }

    /// Closest pending index at or above `from`.
    pub fn closest_up(&self, from: usize) -> Option<usize> {
        (from..self.flags.len()).find(|&index| self.flags[index])
    }

    /// Closest pending index at or below `from`.
    pub fn closest_down(&self, from: usize) -> Option<usize> {
        (0..=from).rev().find(|&index| self.flags[index])
    }

    /// Closest pending index in either direction, used when the car is
    /// idle. On equal distance the downward candidate wins.
    pub fn closest_any(&self, from: usize) -> Option<usize> {
        match (self.closest_down(from), self.closest_up(from)) {
            (Some(down), Some(up)) => {
                if from - down <= up - from {
                    Some(down)
                } else {
                    Some(up)
                }
            }
            (Some(down), None) => Some(down),
            (None, up) => up,
        }
    }
}
