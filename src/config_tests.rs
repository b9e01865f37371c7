/*
 * Unit tests for configuration loading
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_parse_full_config
 * - test_parse_applies_defaults
 * - test_parse_rejects_zero_floors
 * - test_parse_rejects_duplicate_names
 * - test_parse_rejects_unknown_step_person
 * - test_parse_rejects_out_of_range_travel
 * - test_parse_rejects_out_of_range_person_destination
 * - test_parse_rejects_out_of_range_destination_step
 * - test_parse_rejects_zero_passenger_lifts
 * - test_parse_reports_syntax_errors
 * - test_load_missing_file
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod tests {
    use crate::config::{load_config, parse_config, ConfigError, LiftConfig};
    use crate::scenario::Step;
    use std::path::Path;

    const FULL: &str = r#"
        [building]
        name = "Megadodo Publications"
        postcode = "W1N 4HR"
        floors = 57
        lifts = 4

        [lift]
        max_passengers = 6
        max_weight = 500

        [[people]]
        name = "Arthur"
        age = 42
        weight = 100
        destination = 31

        [[people]]
        name = "Marvin"
        weight = 220

        [[steps]]
        action = "catch"
        person = "Arthur"

        [[steps]]
        action = "travel"
        lift = 0
        floor = 31

        [[steps]]
        action = "exit"

        [[steps]]
        action = "destination"
        person = "Marvin"
        floor = 9
    "#;

    #[test]
    fn test_parse_full_config() {
        // Purpose: Verify that every section of the configuration file is read

        // Act
        let config = parse_config(FULL).unwrap();

        // Assert
        assert_eq!(config.building.name, "Megadodo Publications");
        assert_eq!(config.building.postcode.as_deref(), Some("W1N 4HR"));
        assert_eq!(config.building.floors, 57);
        assert_eq!(config.building.lifts, 4);
        assert_eq!(config.lift, LiftConfig { max_passengers: 6, max_weight: 500 });
        assert_eq!(config.people.len(), 2);
        assert_eq!(config.people[0].age, 42);
        assert_eq!(config.people[1].destination, 0);
        assert_eq!(
            config.steps,
            vec![
                Step::Catch { person: "Arthur".into() },
                Step::Travel { lift: 0, floor: 31 },
                Step::Exit,
                Step::Destination { person: "Marvin".into(), floor: 9 },
            ]
        );
    }

    #[test]
    fn test_parse_applies_defaults() {
        // Purpose: Verify that optional sections fall back to the stock lift limits

        // Arrange
        let input = r#"
            [building]
            name = "Shed"
            lifts = 1
        "#;

        // Act
        let config = parse_config(input).unwrap();

        // Assert
        assert_eq!(config.building.floors, 1);
        assert_eq!(config.building.postcode, None);
        assert_eq!(config.lift, LiftConfig::default());
        assert_eq!(config.lift.max_passengers, 8);
        assert_eq!(config.lift.max_weight, 800);
        assert!(config.people.is_empty());
        assert!(config.steps.is_empty());
    }

    #[test]
    fn test_parse_rejects_zero_floors() {
        // Purpose: Verify that a building without floors is refused

        // Arrange
        let input = r#"
            [building]
            name = "Void"
            floors = 0
            lifts = 1
        "#;

        // Act
        let result = parse_config(input);

        // Assert
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_rejects_duplicate_names() {
        // Purpose: Verify that steps can address people unambiguously

        // Arrange
        let input = r#"
            [building]
            name = "Twins"
            floors = 3
            lifts = 1

            [[people]]
            name = "Ford"
            weight = 88

            [[people]]
            name = "Ford"
            weight = 90
        "#;

        // Act
        let result = parse_config(input);

        // Assert
        match result {
            Err(ConfigError::Invalid(message)) => assert!(message.contains("Ford")),
            other => panic!("Expected invalid configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_step_person() {
        // Purpose: Verify that a step naming an undeclared person is refused

        // Arrange
        let input = r#"
            [building]
            name = "Tower"
            floors = 3
            lifts = 1

            [[steps]]
            action = "catch"
            person = "Zaphod"
        "#;

        // Act
        let result = parse_config(input);

        // Assert
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_rejects_out_of_range_travel() {
        // Purpose: Verify that travel steps are checked against the lift list and floor count

        // Arrange
        let bad_floor = r#"
            [building]
            name = "Tower"
            floors = 3
            lifts = 1

            [[steps]]
            action = "travel"
            lift = 0
            floor = 3
        "#;
        let bad_lift = r#"
            [building]
            name = "Tower"
            floors = 3
            lifts = 1

            [[steps]]
            action = "travel"
            lift = 1
            floor = 2
        "#;

        // Act & Assert
        assert!(matches!(parse_config(bad_floor), Err(ConfigError::Invalid(_))));
        assert!(matches!(parse_config(bad_lift), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_rejects_out_of_range_person_destination() {
        // Purpose: Verify that a declared person cannot want a floor the building lacks

        // Arrange
        let input = r#"
            [building]
            name = "Tower"
            floors = 3
            lifts = 1

            [[people]]
            name = "Arthur"
            weight = 100
            destination = 3
        "#;

        // Act
        let result = parse_config(input);

        // Assert
        match result {
            Err(ConfigError::Invalid(message)) => assert!(message.contains("Arthur")),
            other => panic!("Expected invalid configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_destination_step() {
        // Purpose: Verify that destination steps are checked against the floor count

        // Arrange
        let input = r#"
            [building]
            name = "Tower"
            floors = 3
            lifts = 1

            [[people]]
            name = "Ford"
            weight = 88

            [[steps]]
            action = "destination"
            person = "Ford"
            floor = 7
        "#;

        // Act
        let result = parse_config(input);

        // Assert
        match result {
            Err(ConfigError::Invalid(message)) => assert!(message.contains("floor 7")),
            other => panic!("Expected invalid configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_zero_passenger_lifts() {
        // Purpose: Verify that lifts must be able to carry somebody

        // Arrange
        let input = r#"
            [building]
            name = "Tower"
            floors = 3
            lifts = 1

            [lift]
            max_passengers = 0
        "#;

        // Act
        let result = parse_config(input);

        // Assert
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_reports_syntax_errors() {
        // Purpose: Verify that malformed TOML surfaces as a parse error

        // Act
        let result = parse_config("[building\nname = ");

        // Assert
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        // Purpose: Verify that a missing file is reported with its path

        // Act
        let result = load_config(Path::new("does/not/exist.toml"));

        // Assert
        match result {
            Err(e @ ConfigError::Io { .. }) => assert!(e.to_string().contains("exist.toml")),
            other => panic!("Expected io error, got {:?}", other),
        }
    }
}
