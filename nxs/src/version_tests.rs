use super::*;

#[test]
fn test_version_string_names_both_crates() {
    let output = get_version_string();
    assert!(output.starts_with("nxs "));
    assert!(output.contains("\nlibnxs "));
}

#[test]
fn test_version_string_contains_version_number() {
    let output = get_version_string();
    assert!(output.contains(env!("CARGO_PKG_VERSION")));
    assert!(output.contains(libnxs::version()));
}
