//! Property-based tests for unified_logger using proptest

use proptest::prelude::*;
use unified_logger::core::formatter::{render, split_payload, strip_ansi};
use unified_logger::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that labels parse back to the same level
    #[test]
    fn test_log_level_label_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.label().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that parsing ignores case
    #[test]
    fn test_log_level_case_insensitive(level in any_level(), use_lower in any::<bool>()) {
        let label = if use_lower {
            level.label().to_lowercase()
        } else {
            level.label().to_string()
        };
        prop_assert_eq!(label.parse::<LogLevel>().unwrap(), level);
    }

    /// Test that level ordering agrees with rank ordering
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        prop_assert_eq!(level1 <= level2, level1.rank() <= level2.rank());
        prop_assert_eq!(level1 < level2, level1.rank() < level2.rank());
        prop_assert_eq!(level1 == level2, level1.rank() == level2.rank());
        prop_assert_eq!(level1.meets_threshold(level2), level1.rank() >= level2.rank());
    }

    /// Test that unknown labels are rejected and fall back to INFO from the environment
    #[test]
    fn test_log_level_invalid_parse(invalid in "[a-z]{0,12}") {
        let known = LogLevel::ALL
            .iter()
            .any(|l| l.label().eq_ignore_ascii_case(&invalid))
            || invalid == "warn"
            || invalid == "fatal";
        prop_assume!(!known);
        prop_assert!(invalid.parse::<LogLevel>().is_err());
        prop_assert_eq!(LogLevel::from_env_value(Some(&invalid)), LogLevel::Info);
    }
}

// ============================================================================
// Rendering Tests
// ============================================================================

proptest! {
    /// Test that any message renders on exactly one line
    #[test]
    fn test_message_never_breaks_line(level in any_level(), message in ".*") {
        let entry = LogEntry::new(level, message);
        let out = render(&entry, false, &FormatterConfig::default());
        prop_assert!(!out.contains('\n'));
        prop_assert!(!out.contains('\r'));
    }

    /// Test that plain output carries no control characters
    #[test]
    fn test_plain_output_has_no_control_chars(level in any_level(), message in "\\PC*\\x1b?\\PC*") {
        let entry = LogEntry::new(level, message);
        let out = render(&entry, false, &FormatterConfig::default());
        prop_assert!(!out.chars().any(char::is_control));
    }

    /// Test that payload string values cannot smuggle control characters
    #[test]
    fn test_payload_values_have_no_control_chars(
        value in any::<String>(),
        pretty in any::<bool>(),
    ) {
        let entry = LogEntry::new(LogLevel::Info, "payload")
            .with_payload(Some(Payload::object().with_field("value", value.clone())));
        let style = if pretty { PayloadStyle::Pretty } else { PayloadStyle::Inline };
        let config = FormatterConfig::new().with_payload_style(style);
        let out = render(&entry, false, &config);

        prop_assert!(!out.chars().any(|c| c.is_control() && c != '\n'));
        if !pretty {
            prop_assert!(!out.chars().any(char::is_control));
            let (_, segment) = split_payload(&out).expect("payload segment");
            let parsed: serde_json::Value = serde_json::from_str(segment).unwrap();
            prop_assert_eq!(parsed["value"].as_str(), Some(value.as_str()));
        }
    }

    /// Test that stripping colors from console output yields the file output
    #[test]
    fn test_colored_strips_to_plain(
        level in any_level(),
        message in ".*",
        key in "[a-z]{1,8}",
        value in any::<i64>(),
    ) {
        let entry = LogEntry::new(level, message)
            .with_payload(Some(Payload::object().with_field(key, value)));
        let config = FormatterConfig::default();
        let plain = render(&entry, false, &config);
        let colored = render(&entry, true, &config);
        prop_assert_eq!(strip_ansi(&colored), plain);
    }

    /// Test that inline payloads parse back to the logged value
    #[test]
    fn test_inline_payload_parses_back(
        message in "[ -~]*",
        fields in prop::collection::vec(("[a-z]{1,6}", any::<i32>()), 0..6),
    ) {
        let mut payload = Payload::object();
        for (key, value) in &fields {
            payload.add_field(key.clone(), *value);
        }
        let expected = payload.as_json().cloned().unwrap();
        let entry = LogEntry::new(LogLevel::Info, message).with_payload(Some(payload));
        let out = render(&entry, false, &FormatterConfig::default());

        let (_, segment) = split_payload(&out).expect("payload segment");
        let parsed: serde_json::Value = serde_json::from_str(segment).unwrap();
        prop_assert_eq!(parsed, expected);
    }
}

// ============================================================================
// Logger Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Test that logging arbitrary input never panics and always writes one line
    #[test]
    fn test_logger_writes_one_line_per_call(level in any_level(), message in ".*") {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::builder(dir.path().join("prop.log"))
            .include_caller(false)
            .console_writer(std::io::sink())
            .build()
            .unwrap();

        logger.log(level, message);

        let content = std::fs::read_to_string(logger.path()).unwrap();
        prop_assert_eq!(content.lines().count(), 1);
        prop_assert!(content.ends_with('\n'));
    }
}
