use crate::config::LiftConfig;
use crate::lift::register::RequestRegister;
use crate::shared::{Direction, LiftState, LiftStatus};
use crossbeam_channel as cbc;
use log::{error, info};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// How often a parked control loop re-checks for work on its own, in
/// addition to being woken by incoming events.
const WAIT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/**
 * Caller-facing handle for one elevator car.
 *
 * Construction spawns the control loop on its own thread; calls are
 * submitted with `submit_event` and served by the loop asynchronously.
 * The status accessors read a shared snapshot the loop keeps current.
 * Dropping the handle (or calling `stop`) stops and joins the loop.
 *
 * # Fields
 * - `first_floor`:     Lowest serviced floor number.
 * - `n_floors`:        Number of serviced floors.
 * - `event_tx`:        Sends call events into the control loop.
 * - `terminate_tx`:    Signals the control loop to stop.
 * - `status`:          Shared car state snapshot written by the loop.
 * - `fsm_thread`:      Join handle of the control-loop thread.
 */
pub struct Lift {
    first_floor: u8,
    n_floors: u8,
    event_tx: cbc::Sender<CallEvent>,
    terminate_tx: cbc::Sender<()>,
    status: Arc<LiftStatus>,
    fsm_thread: Option<thread::JoinHandle<()>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CallError {
    #[error("floor {0} is outside the serviced range")]
    FloorOutOfRange(u8),
    #[error("the lift has been stopped")]
    Stopped,
}

/// A single call: target floor index plus origin. Cabin-origin calls also
/// close an open door early.
struct CallEvent {
    index: usize,
    from_cabin: bool,
}

enum State {
    Wait,
    MoveUp,
    MoveDown,
    DoorOpen,
}

impl Lift {
    pub fn new(config: &LiftConfig) -> Lift {
        let (event_tx, event_rx) = cbc::unbounded::<CallEvent>();
        let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();
        let status = Arc::new(LiftStatus::new());

        let fsm = LiftFsm::new(config, event_rx, terminate_rx, Arc::clone(&status));
        let fsm_thread = thread::Builder::new()
            .name("lift_fsm".into())
            .spawn(move || fsm.run())
            .unwrap();

        Lift {
            first_floor: config.first_floor,
            n_floors: config.n_floors,
            event_tx,
            terminate_tx,
            status,
            fsm_thread: Some(fsm_thread),
        }
    }

    /// Register a call for `floor`. `from_cabin` marks calls made from
    /// inside the car; besides being served like any other call they close
    /// an open door early.
    pub fn submit_event(&self, floor: u8, from_cabin: bool) -> Result<(), CallError> {
        let index = match self.floor_to_index(floor) {
            Some(index) => index,
            None => {
                error!("call for floor {} out of range", floor);
                return Err(CallError::FloorOutOfRange(floor));
            }
        };

        if from_cabin {
            info!("request from cabin for floor {}", floor);
        } else {
            info!("request from outside for floor {}", floor);
        }

        self.event_tx
            .send(CallEvent { index, from_cabin })
            .map_err(|_| CallError::Stopped)
    }

    pub fn current_floor(&self) -> u8 {
        self.first_floor + self.status.floor_index() as u8
    }

    pub fn direction(&self) -> Direction {
        self.status.direction()
    }

    pub fn is_door_open(&self) -> bool {
        self.status.is_door_open()
    }

    /// Combined snapshot for status reporting. The fields are read
    /// independently; the combination is informational, not atomic.
    pub fn state(&self) -> LiftState {
        LiftState {
            floor: self.current_floor(),
            direction: self.direction(),
            door_open: self.is_door_open(),
        }
    }

    /// Stop the control loop and wait for its thread to exit. Runs at most
    /// once; also invoked on drop. Later submissions fail with
    /// `CallError::Stopped`.
    pub fn stop(&mut self) {
        if let Some(fsm_thread) = self.fsm_thread.take() {
            let _ = self.terminate_tx.send(());
            if fsm_thread.join().is_err() {
                error!("control loop thread panicked");
            }
        }
    }

    fn floor_to_index(&self, floor: u8) -> Option<usize> {
        let index = floor.checked_sub(self.first_floor)? as usize;
        if index < self.n_floors as usize {
            Some(index)
        } else {
            None
        }
    }
}

impl Drop for Lift {
    fn drop(&mut self) {
        self.stop();
    }
}

/**
 * Control loop for one elevator car.
 *
 * The loop cycles through four behaviors (wait, move up, move down, door
 * open) selected by an explicit state tag. Each iteration first registers
 * all queued call events, then checks for the stop signal, then runs one
 * step of the current behavior. The request register is owned by this
 * thread; the handle communicates exclusively through the event channel.
 *
 * # Fields
 * - `event_rx`:       Receives call events from the handle.
 * - `terminate_rx`:   Receives the stop signal.
 * - `register`:       Per-floor pending-request flags.
 * - `status`:         Shared snapshot mirrored for the status accessors.
 * - `current_index`:  Car position as a zero-based floor index.
 * - `direction`:      Current travel direction.
 * - `first_floor`:    Lowest serviced floor number, for log messages.
 * - `travel_time`:    Time to pass one floor.
 * - `door_hold`:      Door-open dwell when no cabin event arrives.
 * - `running`:        Cleared once the stop signal is observed.
 */
struct LiftFsm {
    event_rx: cbc::Receiver<CallEvent>,
    terminate_rx: cbc::Receiver<()>,
    register: RequestRegister,
    status: Arc<LiftStatus>,
    current_index: usize,
    direction: Direction,
    first_floor: u8,
    travel_time: Duration,
    door_hold: Duration,
    running: bool,
}

impl LiftFsm {
    fn new(
        config: &LiftConfig,
        event_rx: cbc::Receiver<CallEvent>,
        terminate_rx: cbc::Receiver<()>,
        status: Arc<LiftStatus>,
    ) -> LiftFsm {
        LiftFsm {
            event_rx,
            terminate_rx,
            register: RequestRegister::new(config.n_floors as usize),
            status,
            current_index: 0,
            direction: Direction::Idle,
            first_floor: config.first_floor,
            travel_time: config.travel_time,
            door_hold: config.door_hold,
            running: true,
        }
    }

    fn run(mut self) {
        let mut state = State::Wait;
        while self.running {
            self.drain_events();
            if self.terminate_rx.try_recv().is_ok() {
                break;
            }
            state = match state {
                State::Wait => self.wait(),
                State::MoveUp => self.move_up(),
                State::MoveDown => self.move_down(),
                State::DoorOpen => self.open_door(),
            };
        }
        info!("control loop stopped");
    }

    /// Parked behavior. Blocks until a request shows up or the stop signal
    /// fires, re-checking the register at a bounded interval.
    fn wait(&mut self) -> State {
        self.set_direction(Direction::Idle);
        loop {
            if let Some(target) = self.register.closest_any(self.current_index) {
                if target > self.current_index {
                    return State::MoveUp;
                }
                return State::MoveDown;
            }
            cbc::select! {
                recv(self.event_rx) -> event => match event {
                    Ok(event) => self.register_call(event),
                    Err(_) => {
                        self.running = false;
                        return State::Wait;
                    }
                },
                recv(self.terminate_rx) -> _ => {
                    self.running = false;
                    return State::Wait;
                }
                default(WAIT_POLL_INTERVAL) => {}
            }
        }
    }

    /// Travel behavior; one invocation covers at most one floor traversal.
    fn move_up(&mut self) -> State {
        self.set_direction(Direction::Up);

        if self.register.is_pending(self.current_index) {
            return State::DoorOpen;
        }

        if self.register.closest_up(self.current_index).is_some() {
            info!("moving up from floor {}", self.current_floor());
            self.set_current_index(self.current_index + 1);
            thread::sleep(self.travel_time);
            return State::MoveUp;
        }

        if self.register.closest_down(self.current_index).is_some() {
            return State::MoveDown;
        }

        State::Wait
    }

    fn move_down(&mut self) -> State {
        self.set_direction(Direction::Down);

        if self.register.is_pending(self.current_index) {
            return State::DoorOpen;
        }

        if self.register.closest_down(self.current_index).is_some() {
            info!("moving down from floor {}", self.current_floor());
            self.set_current_index(self.current_index - 1);
            thread::sleep(self.travel_time);
            return State::MoveDown;
        }

        if self.register.closest_up(self.current_index).is_some() {
            return State::MoveUp;
        }

        State::Wait
    }

    /// Door behavior. Holds the door for the configured dwell; a cabin
    /// call arriving while the door is open closes it immediately. Events
    /// already queued when the cycle begins are registered up front and do
    /// not shorten this cycle.
    fn open_door(&mut self) -> State {
        self.drain_events();

        info!("door open at floor {}", self.current_floor());
        self.set_door_open(true);

        let deadline = Instant::now() + self.door_hold;
        loop {
            let remaining = match deadline.checked_duration_since(Instant::now()) {
                Some(remaining) => remaining,
                None => break,
            };
            cbc::select! {
                recv(self.event_rx) -> event => match event {
                    Ok(event) => {
                        let from_cabin = event.from_cabin;
                        self.register_call(event);
                        if from_cabin {
                            break;
                        }
                    }
                    Err(_) => {
                        self.running = false;
                        break;
                    }
                },
                default(remaining) => break,
            }
        }

        self.register.clear(self.current_index);
        self.set_door_open(false);
        info!("door closed at floor {}", self.current_floor());

        match self.direction {
            Direction::Up => State::MoveUp,
            Direction::Down => State::MoveDown,
            Direction::Idle => State::Wait,
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.register_call(event);
        }
    }

    fn register_call(&mut self, event: CallEvent) {
        self.register.set(event.index);
    }

    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.status.set_direction(direction);
    }

    fn set_current_index(&mut self, index: usize) {
        self.current_index = index;
        self.status.set_floor_index(index);
    }

    fn set_door_open(&mut self, open: bool) {
        self.status.set_door_open(open);
    }

    fn current_floor(&self) -> u8 {
        self.first_floor + self.current_index as u8
    }
}
