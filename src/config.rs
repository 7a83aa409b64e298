/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::time::Duration;
use thiserror::Error;

/***************************************/
/*             Constants               */
/***************************************/
/// Bounds on the serviced floor count.
pub const MIN_FLOORS: u16 = 2;
pub const MAX_FLOORS: u16 = 100;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be strictly positive")]
    NonPositive(&'static str),
    #[error("floor count {0} outside supported range {MIN_FLOORS}..={MAX_FLOORS}")]
    FloorCountOutOfRange(u16),
    #[error("last floor must not be below first floor")]
    InvertedRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiftConfig {
    pub first_floor: u8,
    pub last_floor: u8,
    pub n_floors: u8,
    pub travel_time: Duration,
    pub door_hold: Duration,
}

impl LiftConfig {
    /// Validate the startup parameters and derive the floor count and the
    /// timing constants (`travel_time` = floor height / speed).
    pub fn new(
        first_floor: u8,
        last_floor: u8,
        floor_height: f64,
        speed: f64,
        door_hold_secs: f64,
    ) -> Result<LiftConfig, ConfigError> {
        if last_floor < first_floor {
            return Err(ConfigError::InvertedRange);
        }
        let n_floors = (last_floor - first_floor) as u16 + 1;
        if !(MIN_FLOORS..=MAX_FLOORS).contains(&n_floors) {
            return Err(ConfigError::FloorCountOutOfRange(n_floors));
        }

        require_positive("floor height", floor_height)?;
        require_positive("speed", speed)?;
        require_positive("door open time", door_hold_secs)?;

        Ok(LiftConfig {
            first_floor,
            last_floor,
            n_floors: n_floors as u8,
            travel_time: Duration::from_secs_f64(floor_height / speed),
            door_hold: Duration::from_secs_f64(door_hold_secs),
        })
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive(name))
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_valid_config_derives_timings() {
        let config = LiftConfig::new(1, 10, 3.0, 2.0, 5.0).unwrap();

        assert_eq!(config.n_floors, 10);
        assert_eq!(config.travel_time, Duration::from_secs_f64(1.5));
        assert_eq!(config.door_hold, Duration::from_secs(5));
    }

    #[test]
    fn test_non_positive_parameters_rejected() {
        assert_eq!(
            LiftConfig::new(1, 10, 0.0, 2.0, 5.0),
            Err(ConfigError::NonPositive("floor height"))
        );
        assert_eq!(
            LiftConfig::new(1, 10, 3.0, -2.0, 5.0),
            Err(ConfigError::NonPositive("speed"))
        );
        assert_eq!(
            LiftConfig::new(1, 10, 3.0, 2.0, 0.0),
            Err(ConfigError::NonPositive("door open time"))
        );
        assert_eq!(
            LiftConfig::new(1, 10, f64::NAN, 2.0, 5.0),
            Err(ConfigError::NonPositive("floor height"))
        );
        assert_eq!(
            LiftConfig::new(1, 10, f64::INFINITY, 2.0, 5.0),
            Err(ConfigError::NonPositive("floor height"))
        );
    }

    #[test]
    fn test_floor_count_bounds() {
        assert_eq!(
            LiftConfig::new(5, 1, 3.0, 2.0, 5.0),
            Err(ConfigError::InvertedRange)
        );
        assert_eq!(
            LiftConfig::new(1, 1, 3.0, 2.0, 5.0),
            Err(ConfigError::FloorCountOutOfRange(1))
        );
        assert_eq!(
            LiftConfig::new(1, 120, 3.0, 2.0, 5.0),
            Err(ConfigError::FloorCountOutOfRange(120))
        );
        assert!(LiftConfig::new(1, 2, 3.0, 2.0, 5.0).is_ok());
        assert!(LiftConfig::new(1, 100, 3.0, 2.0, 5.0).is_ok());
    }
}
