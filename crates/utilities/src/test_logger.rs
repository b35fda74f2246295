/// Constructs a logger for tests. This logger will not print anything to the console, but will instead write to a buffer.
pub fn test_logger() {
    // Ignore double initialisations in tests since tests are ran in parallel.
    let _ = env_logger::builder().is_test(true).try_init();
}
