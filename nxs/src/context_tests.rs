use super::*;

#[test]
fn test_verbosity_from_count() {
    assert_eq!(VerbosityLevel::from_count(0), VerbosityLevel::Normal);
    assert_eq!(VerbosityLevel::from_count(1), VerbosityLevel::Verbose);
    assert_eq!(VerbosityLevel::from_count(2), VerbosityLevel::VeryVerbose);
    assert_eq!(VerbosityLevel::from_count(3), VerbosityLevel::Trace);
    assert_eq!(VerbosityLevel::from_count(9), VerbosityLevel::Trace);
}

#[test]
fn test_verbosity_ordering() {
    assert!(VerbosityLevel::Normal < VerbosityLevel::Verbose);
    assert!(VerbosityLevel::Verbose < VerbosityLevel::VeryVerbose);
    assert!(VerbosityLevel::VeryVerbose < VerbosityLevel::Trace);
}

#[test]
fn test_tracing_directive_widens_with_verbosity() {
    assert_eq!(VerbosityLevel::Normal.tracing_directive(), "warn");
    assert!(VerbosityLevel::VeryVerbose
        .tracing_directive()
        .contains("libnxs=debug"));
    assert_eq!(VerbosityLevel::Trace.tracing_directive(), "trace");
}

#[test]
fn test_build_without_config_file_uses_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("missing.toml");

    let ctx = AppContext::build_from(&path, &Overrides::default(), VerbosityLevel::Normal).unwrap();

    assert_eq!(ctx.config.server.url, "http://localhost:8081");
    assert_eq!(ctx.config.server.repository, "my-private-docker-repo");
    assert!(ctx.config.server.verify_ssl);
    assert_eq!(ctx.config.style.format, OutputFormat::Json);
    assert_eq!(ctx.verbosity, VerbosityLevel::Normal);
}

#[test]
fn test_build_config_file_overrides_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[server]
url = "https://nexus.example.com"
repository = "docker-hosted"
verify_ssl = false

[filter]
empty_groups = "omit"
"#,
    )
    .unwrap();

    let ctx = AppContext::build_from(&path, &Overrides::default(), VerbosityLevel::Verbose).unwrap();

    assert_eq!(ctx.config.server.url, "https://nexus.example.com");
    assert_eq!(ctx.config.server.repository, "docker-hosted");
    assert!(!ctx.config.server.verify_ssl);
    assert_eq!(ctx.config.server.timeout, 30);
    assert_eq!(ctx.config.filter.empty_groups, EmptyGroups::Omit);
}

#[test]
fn test_build_flags_override_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[server]
url = "https://nexus.example.com"
repository = "docker-hosted"
username = "reader"
"#,
    )
    .unwrap();

    let overrides = Overrides {
        url: Some("http://other:8081".to_string()),
        username: Some("admin".to_string()),
        verify_ssl: Some(false),
        timeout: Some(5),
        format: Some(OutputFormat::Yaml),
        color: Some(ColorChoice::Never),
        empty_groups: Some(EmptyGroups::Omit),
        ..Overrides::default()
    };
    let ctx = AppContext::build_from(&path, &overrides, VerbosityLevel::Normal).unwrap();

    assert_eq!(ctx.config.server.url, "http://other:8081");
    assert_eq!(ctx.config.server.repository, "docker-hosted");
    assert_eq!(ctx.config.server.username.as_deref(), Some("admin"));
    assert!(!ctx.config.server.verify_ssl);
    assert_eq!(ctx.config.server.timeout, 5);
    assert_eq!(ctx.config.style.format, OutputFormat::Yaml);
    assert_eq!(ctx.config.style.color, ColorChoice::Never);
    assert_eq!(ctx.config.filter.empty_groups, EmptyGroups::Omit);
}

#[test]
fn test_build_invalid_config_file_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[server\nurl = ").unwrap();

    let result = AppContext::build_from(&path, &Overrides::default(), VerbosityLevel::Normal);
    assert!(result.is_err());
}
