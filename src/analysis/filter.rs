//! Path-based file exclusion.

/// Suffixes of generated Go sources (stringer/mockgen output, protobuf).
const GENERATED_SUFFIXES: &[&str] = &["gen.go", "pb.go"];

/// Suffix of Go test sources.
const TEST_SUFFIX: &str = "test.go";

/// Returns true if the file at `path` must not be inspected.
///
/// This is a plain, case-sensitive suffix match on the whole path string,
/// so `foo_pb.go` and `protopb.go` are both excluded.
pub fn is_excluded(path: &str, skip_tests: bool) -> bool {
    if GENERATED_SUFFIXES.iter().any(|suffix| path.ends_with(suffix)) {
        return true;
    }
    skip_tests && path.ends_with(TEST_SUFFIX)
}
