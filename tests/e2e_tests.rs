//! End-to-end integration tests
//!
//! These tests drive complete terminal sessions against a real data file.
//! Each fixture test:
//! 1. Copies initial.json (if present) into a temporary directory
//! 2. Feeds input.txt to the terminal line by line
//! 3. Compares the resulting data file with expected.json
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - User creation and basic transactions
//! - Failed logins and unknown users
//! - Invalid amounts and insufficient funds
//! - PIN changes across sessions
//! - End of input inside an authenticated session

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_atm_terminal::{run_session, AtmError, JsonFileStorage, TerminalConfig};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Run a session over `input` against `data_file` and return the transcript
    fn run_transcript(data_file: &Path, input: &[u8]) -> Result<String, AtmError> {
        let mut output = Vec::new();
        run_session(data_file, TerminalConfig::default(), input, &mut output)?;
        Ok(String::from_utf8(output).expect("transcript is not UTF-8"))
    }

    fn read_json(path: &Path) -> serde_json::Value {
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Invalid JSON in {}: {}", path.display(), e))
    }

    /// Run a test fixture and compare the data file with expected.json
    ///
    /// # Panics
    ///
    /// Panics if fixture files cannot be read or the data file doesn't match.
    fn run_test_fixture(fixture_name: &str) {
        let fixture_dir = PathBuf::from(format!("tests/fixtures/{}", fixture_name));
        let input_path = fixture_dir.join("input.txt");
        let initial_path = fixture_dir.join("initial.json");
        let expected_path = fixture_dir.join("expected.json");

        assert!(input_path.exists(), "Input file not found: {}", input_path.display());
        assert!(
            expected_path.exists(),
            "Expected file not found: {}",
            expected_path.display()
        );

        let dir = TempDir::new().expect("Failed to create temp dir");
        let data_file = dir.path().join("users.json");
        if initial_path.exists() {
            fs::copy(&initial_path, &data_file).expect("Failed to copy initial.json");
        }

        let input = fs::read(&input_path).expect("Failed to read input.txt");
        let transcript = run_transcript(&data_file, &input)
            .unwrap_or_else(|e| panic!("Session failed for fixture {}: {}", fixture_name, e));

        let actual = read_json(&data_file);
        let expected = read_json(&expected_path);
        assert_eq!(
            actual, expected,
            "\n\nData file mismatch for fixture: {}\n\nTranscript:\n{}\n",
            fixture_name, transcript
        );
    }

    #[rstest]
    #[case("create_and_transact")]
    #[case("failed_login")]
    #[case("invalid_amounts")]
    #[case("change_pin")]
    #[case("duplicate_user")]
    #[case("end_of_input")]
    #[case("unknown_user")]
    #[case("multiple_sessions")]
    fn test_fixtures(#[case] fixture: &str) {
        run_test_fixture(fixture);
    }

    #[test]
    fn test_first_run_without_activity_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let data_file = dir.path().join("users.json");

        let transcript = run_transcript(&data_file, b"3\n").unwrap();

        assert!(transcript.contains("Goodbye!"));
        assert!(!data_file.exists());
    }

    #[test]
    fn test_history_does_not_survive_restart() {
        let dir = TempDir::new().unwrap();
        let data_file = dir.path().join("users.json");

        let first = run_transcript(&data_file, b"2\nalice\n1234\n1\nalice\n1234\n3\n50\n5\n6\n3\n")
            .unwrap();
        assert!(first.contains("Deposited €50 on "));

        let second = run_transcript(&data_file, b"1\nalice\n1234\n1\n5\n6\n3\n").unwrap();
        assert!(second.contains("Current balance: €50"));
        assert!(second.contains("No transactions found."));
    }

    #[test]
    fn test_corrupt_data_file_aborts_untouched() {
        let dir = TempDir::new().unwrap();
        let data_file = dir.path().join("users.json");
        fs::write(&data_file, "{\"alice\": {\"pin\": \"12\"").unwrap();

        let result = run_transcript(&data_file, b"3\n");

        assert!(matches!(result, Err(AtmError::CorruptData { .. })));
        assert_eq!(
            fs::read_to_string(&data_file).unwrap(),
            "{\"alice\": {\"pin\": \"12\""
        );
    }

    #[test]
    fn test_data_file_in_use_is_refused() {
        let dir = TempDir::new().unwrap();
        let data_file = dir.path().join("users.json");
        let _held = JsonFileStorage::open(&data_file).unwrap();

        let result = run_transcript(&data_file, b"3\n");

        assert!(matches!(result, Err(AtmError::StoreLocked { .. })));
    }
}
