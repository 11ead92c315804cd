/// Get the version string for nxs and libnxs
pub fn get_version_string() -> String {
    format!(
        "nxs {}\nlibnxs {}",
        env!("CARGO_PKG_VERSION"),
        libnxs::version()
    )
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
