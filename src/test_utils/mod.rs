//! Shared test utilities for staffdir.

pub mod fake_api;
pub mod fixtures;

#[cfg(test)]
pub mod arbitrary;
#[cfg(test)]
pub mod mock_server;

pub use fake_api::FakeDirectoryApi;

/// One row of a table-driven test.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

/// Run every case through `test_fn`, naming the failing row on mismatch.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F)
where
    I: std::fmt::Debug,
    E: std::fmt::Debug + PartialEq,
    F: Fn(&I) -> E,
{
    for case in cases {
        let actual = test_fn(&case.input);
        assert_eq!(
            actual, case.expected,
            "case '{}' failed for input {:?}",
            case.name, case.input
        );
    }
}
