//! Tests for command-line argument parsing
//!
//! Note: These tests verify the argument parser configuration by creating
//! a test parser with the same structure as the main application.

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Create a command with the same argument structure as the main binary
fn create_test_command() -> ClapCommand {
    ClapCommand::new("exercise-form")
        .version("0.1.0")
        .about("Joint-angle smoothing and hysteresis rep counting")
        .arg(
            Arg::new("input")
                .value_name("PATH")
                .default_value("-")
                .help("Landmark input in JSON Lines format"),
        )
        .arg(
            Arg::new("exercise")
                .short('e')
                .long("exercise")
                .value_name("NAME")
                .help("Exercise to analyze"),
        )
        .arg(
            Arg::new("config")
                .short('C')
                .long("config")
                .value_name("PATH")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("fps")
                .long("fps")
                .value_name("RATE")
                .value_parser(clap::value_parser!(f64))
                .help("Frame rate of the recording"),
        )
        .arg(
            Arg::new("smoothing")
                .short('s')
                .long("smoothing")
                .value_name("METHOD")
                .help("Smoothing method"),
        )
        .arg(
            Arg::new("normalized")
                .long("normalized")
                .action(ArgAction::SetTrue)
                .requires_all(["width", "height"])
                .help("Landmark coordinates are normalized"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PIXELS")
                .value_parser(clap::value_parser!(f64))
                .requires("normalized")
                .help("Image width"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("PIXELS")
                .value_parser(clap::value_parser!(f64))
                .requires("normalized")
                .help("Image height"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Per-frame CSV output"),
        )
        .arg(
            Arg::new("summary")
                .long("summary")
                .value_name("PATH")
                .help("Summary YAML output"),
        )
        .arg(
            Arg::new("example-config")
                .long("example-config")
                .action(ArgAction::SetTrue)
                .help("Print an example configuration file"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debug output"),
        )
}

#[test]
fn test_help_argument() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["exercise-form", "--help"]);

    // Help should cause an error (but a specific help error)
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn test_no_arguments() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["exercise-form"]);

    // Should succeed with stdin input and no overrides
    assert!(result.is_ok());
    let matches = result.unwrap();
    assert_eq!(matches.get_one::<String>("input").map(|s| s.as_str()), Some("-"));
    assert!(matches.get_one::<String>("exercise").is_none());
    assert!(matches.get_one::<f64>("fps").is_none());
    assert!(!matches.get_flag("debug"));
}

#[test]
fn test_input_argument() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["exercise-form", "session.jsonl"]);

    assert!(result.is_ok());
    let matches = result.unwrap();
    assert_eq!(
        matches.get_one::<String>("input").map(|s| s.as_str()),
        Some("session.jsonl")
    );
}

#[test]
fn test_exercise_arguments() {
    let exercises = vec!["bicep_curl", "tricep_curl", "lateral_raise", "push_up"];

    for exercise in exercises {
        let cmd = create_test_command();
        let result = cmd.try_get_matches_from(vec!["exercise-form", "--exercise", exercise]);

        assert!(result.is_ok(), "Should accept exercise: {}", exercise);
        let matches = result.unwrap();
        assert_eq!(matches.get_one::<String>("exercise").map(|s| s.as_str()), Some(exercise));
    }
}

#[test]
fn test_smoothing_arguments() {
    let methods = vec!["savgol", "ema", "none"];

    for method in methods {
        let cmd = create_test_command();
        let result = cmd.try_get_matches_from(vec!["exercise-form", "-s", method]);

        assert!(result.is_ok(), "Should accept smoothing: {}", method);
        let matches = result.unwrap();
        assert_eq!(matches.get_one::<String>("smoothing").map(|s| s.as_str()), Some(method));
    }
}

#[test]
fn test_numeric_arguments() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["exercise-form", "--fps", "25"]);

    assert!(result.is_ok());
    assert_eq!(result.unwrap().get_one::<f64>("fps"), Some(&25.0));

    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["exercise-form", "--fps", "fast"]);
    assert!(result.is_err());
}

#[test]
fn test_normalized_requires_size() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["exercise-form", "--normalized"]);
    assert!(result.is_err());

    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["exercise-form", "--normalized", "--width", "640"]);
    assert!(result.is_err());

    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec![
        "exercise-form",
        "--normalized",
        "--width",
        "640",
        "--height",
        "480",
    ]);
    assert!(result.is_ok());
    let matches = result.unwrap();
    assert!(matches.get_flag("normalized"));
    assert_eq!(matches.get_one::<f64>("height"), Some(&480.0));
}

#[test]
fn test_size_requires_normalized() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["exercise-form", "--width", "640", "--height", "480"]);
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_boolean_flags() {
    let flags = vec!["--debug", "--example-config"];

    for flag in flags {
        let cmd = create_test_command();
        let result = cmd.try_get_matches_from(vec!["exercise-form", flag]);

        assert!(result.is_ok(), "Should accept flag: {}", flag);
        let matches = result.unwrap();

        let flag_name = flag.trim_start_matches("--");
        assert!(matches.get_flag(flag_name), "Flag {} should be set", flag);
    }
}

#[test]
fn test_multiple_arguments() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec![
        "exercise-form",
        "session.jsonl",
        "--exercise",
        "tricep_curl",
        "-C",
        "config.yaml",
        "--fps",
        "60",
        "--smoothing",
        "ema",
        "-o",
        "angles.csv",
        "--summary",
        "summary.yaml",
        "-d",
    ]);

    assert!(result.is_ok());
    let matches = result.unwrap();
    assert_eq!(
        matches.get_one::<String>("input").map(|s| s.as_str()),
        Some("session.jsonl")
    );
    assert_eq!(
        matches.get_one::<String>("exercise").map(|s| s.as_str()),
        Some("tricep_curl")
    );
    assert_eq!(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        Some("config.yaml")
    );
    assert_eq!(matches.get_one::<f64>("fps"), Some(&60.0));
    assert_eq!(matches.get_one::<String>("smoothing").map(|s| s.as_str()), Some("ema"));
    assert_eq!(
        matches.get_one::<String>("output").map(|s| s.as_str()),
        Some("angles.csv")
    );
    assert_eq!(
        matches.get_one::<String>("summary").map(|s| s.as_str()),
        Some("summary.yaml")
    );
    assert!(matches.get_flag("debug"));
}
