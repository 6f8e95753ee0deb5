// Shared proptest configuration for the engine's property tests.
//
// PROPTEST_CASES overrides the case count (default 32).

pub fn proptest_config() -> proptest::prelude::ProptestConfig {
    let base = proptest::prelude::ProptestConfig::default();
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(32)
        .max(1);

    proptest::prelude::ProptestConfig {
        failure_persistence: None,
        cases,
        ..base
    }
}
