/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    pub fn to_u8(&self) -> u8 {
        match *self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Idle => 2,
        }
    }
}

impl From<u8> for Direction {
    fn from(item: u8) -> Self {
        match item {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Idle,
            _ => panic!("Invalid direction value"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LiftState {
    pub floor: u8,
    pub direction: Direction,
    #[serde(rename = "doorOpen")]
    pub door_open: bool,
}

/// Car state snapshot shared between the control loop and the status
/// accessors. Written only by the control-loop thread; reads are
/// informational and not ordered against loop transitions.
pub struct LiftStatus {
    floor_index: AtomicUsize,
    direction: AtomicU8,
    door_open: AtomicBool,
}

impl LiftStatus {
    pub fn new() -> LiftStatus {
        LiftStatus {
            floor_index: AtomicUsize::new(0),
            direction: AtomicU8::new(Direction::Idle.to_u8()),
            door_open: AtomicBool::new(false),
        }
    }

    pub fn floor_index(&self) -> usize {
        self.floor_index.load(Ordering::Relaxed)
    }

    pub fn set_floor_index(&self, index: usize) {
        self.floor_index.store(index, Ordering::Relaxed);
    }

    pub fn direction(&self) -> Direction {
        Direction::from(self.direction.load(Ordering::Relaxed))
    }

    pub fn set_direction(&self, direction: Direction) {
        self.direction.store(direction.to_u8(), Ordering::Relaxed);
    }

    pub fn is_door_open(&self) -> bool {
        self.door_open.load(Ordering::Relaxed)
    }

    pub fn set_door_open(&self, open: bool) {
        self.door_open.store(open, Ordering::Relaxed);
    }
}
