/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::warn;
use std::io;
use std::io::BufRead;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::lift::Lift;

/**
 * Line-oriented console for injecting call events.
 *
 * Reads whitespace-separated tokens from stdin; the first character of
 * each token selects the action:
 * - 'a'..'z': outside call for floor (letter - 'a' + 1)
 * - 'A'..'Z': cabin call for the same floor numbering
 * - '?':      print the current car state as one JSON line
 * - '=':      leave the loop
 *
 * Out-of-range calls are rejected and logged by the controller itself;
 * the console keeps reading.
 */
pub fn run(lift: &Lift) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => return,
        };
        for token in line.split_whitespace() {
            if !process_token(lift, token) {
                return;
            }
        }
    }
}

/// Handle one input token. Returns false when the console should exit.
fn process_token(lift: &Lift, token: &str) -> bool {
    let key = match token.chars().next() {
        Some(key) => key,
        None => return true,
    };

    match key {
        'a'..='z' => {
            let floor = key as u8 - b'a' + 1;
            let _ = lift.submit_event(floor, false);
        }
        'A'..='Z' => {
            let floor = key as u8 - b'A' + 1;
            let _ = lift.submit_event(floor, true);
        }
        '?' => match serde_json::to_string(&lift.state()) {
            Ok(state) => println!("{}", state),
            Err(e) => warn!("failed to encode state: {}", e),
        },
        '=' => return false,
        _ => warn!("unrecognized input: {}", token),
    }

    true
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod console_tests {
    use super::process_token;
    use crate::config::LiftConfig;
    use crate::lift::Lift;
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    fn setup_lift() -> Lift {
        // 20 ms per floor, 60 ms door hold
        let config = LiftConfig::new(1, 5, 0.04, 2.0, 0.06).unwrap();
        Lift::new(&config)
    }

    #[test]
    fn test_exit_token_ends_loop() {
        let lift = setup_lift();

        assert!(!process_token(&lift, "="));
        assert!(process_token(&lift, "?"));
        assert!(process_token(&lift, "#"));
        // 'z' maps to floor 26, out of range here, but the console goes on
        assert!(process_token(&lift, "z"));
    }

    #[test]
    fn test_cabin_token_reaches_mapped_floor() {
        let lift = setup_lift();

        // 'C' is a cabin call for floor 3
        assert!(process_token(&lift, "C"));

        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if lift.current_floor() == 3 && lift.is_door_open() {
                return;
            }
            sleep(Duration::from_millis(2));
        }
        panic!("cabin call was not served at floor 3");
    }
}
