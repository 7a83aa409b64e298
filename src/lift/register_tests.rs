/*
 * Unit tests for the request register
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod register_tests {
    use crate::lift::RequestRegister;

    #[test]
    fn test_empty_register_has_no_candidates() {
        let register = RequestRegister::new(8);

        assert_eq!(register.closest_up(0), None);
        assert_eq!(register.closest_down(7), None);
        assert_eq!(register.closest_any(4), None);
    }

    #[test]
    fn test_directed_search_includes_current_index() {
        let mut register = RequestRegister::new(8);

        register.set(3);

        assert_eq!(register.closest_up(3), Some(3));
        assert_eq!(register.closest_down(3), Some(3));
    }

    #[test]
    fn test_directed_search_is_one_sided() {
        let mut register = RequestRegister::new(8);

        register.set(2);

        assert_eq!(register.closest_up(3), None);
        assert_eq!(register.closest_down(1), None);
    }

    #[test]
    fn test_directed_search_picks_nearest_in_direction() {
        let mut register = RequestRegister::new(8);

        register.set(2);
        register.set(6);

        assert_eq!(register.closest_up(3), Some(6));
        assert_eq!(register.closest_down(5), Some(2));
    }

    #[test]
    fn test_undirected_search_picks_smaller_distance() {
        let mut register = RequestRegister::new(10);

        register.set(1);
        register.set(6);

        assert_eq!(register.closest_any(4), Some(6));
        assert_eq!(register.closest_any(2), Some(1));
    }

    #[test]
    fn test_undirected_search_tie_goes_down() {
        // Car at index 5 with requests at 3 and 7: equal distance, the
        // downward candidate wins.
        let mut register = RequestRegister::new(10);

        register.set(3);
        register.set(7);

        assert_eq!(register.closest_any(5), Some(3));
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut register = RequestRegister::new(4);

        register.set(2);
        register.set(2);

        assert!(register.is_pending(2));

        register.clear(2);

        assert!(!register.is_pending(2));
    }

    #[test]
    fn test_clear_leaves_other_floors_pending() {
        let mut register = RequestRegister::new(4);

        register.set(1);
        register.set(3);
        register.clear(3);

        assert!(register.is_pending(1));
        assert!(!register.is_pending(3));
    }
}
