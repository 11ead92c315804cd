use crate::config;
use crate::context::{AppContext, VerbosityLevel};
use crate::format::{self, Formattable};
use libnxs::filter::filter_with;
use libnxs::{ClientConfig, Credentials, FilteredResult, Nexus, SearchRecord};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::Tabled;

pub mod handlers;

/// Filtered tag lists per image, serialized as a plain `{image: [tags]}` map
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ImageTags(pub FilteredResult);

/// Deduplicated search records, serialized as a plain list
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct RawRecords(pub Vec<SearchRecord>);

/// Row of the pretty image table
#[derive(Debug, Tabled)]
struct ImageRow {
    #[tabled(rename = "IMAGE")]
    name: String,
    #[tabled(rename = "TAGS")]
    tags: String,
}

/// Row of the pretty record table
#[derive(Debug, Tabled)]
struct RecordRow<'a> {
    #[tabled(rename = "NAME")]
    name: &'a str,
    #[tabled(rename = "VERSION")]
    version: &'a str,
    #[tabled(rename = "SHA256")]
    digest: &'a str,
}

impl Formattable for ImageTags {
    fn format_pretty(&self) -> String {
        if self.0.is_empty() {
            return "No images found".to_string();
        }

        use tabled::{Table, settings::Style};
        let rows: Vec<ImageRow> = self
            .0
            .iter()
            .map(|(name, tags)| ImageRow {
                name: name.clone(),
                tags: if tags.is_empty() {
                    "-".to_string()
                } else {
                    tags.join(", ")
                },
            })
            .collect();
        Table::new(&rows).with(Style::empty()).to_string()
    }
}

impl Formattable for RawRecords {
    fn format_pretty(&self) -> String {
        if self.0.is_empty() {
            return "No images found".to_string();
        }

        use tabled::{Table, settings::Style};
        let rows: Vec<RecordRow> = self
            .0
            .iter()
            .map(|r| RecordRow {
                name: &r.name,
                version: &r.version,
                digest: if r.digest.is_empty() { "-" } else { r.digest.as_str() },
            })
            .collect();
        Table::new(&rows).with(Style::empty()).to_string()
    }
}

/// Arguments of a search run that are not part of the resolved configuration
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    /// Image name patterns, searched in order
    pub patterns: Vec<String>,
    /// Saved raw records to filter instead of searching
    pub input: Option<PathBuf>,
    /// Password from `--password` or `NXS_PASSWORD`
    pub password: Option<String>,
    /// Output the deduplicated records instead of the filtered tag lists
    pub raw: bool,
    /// Write to this file instead of stdout
    pub output: Option<PathBuf>,
}

/// Resolve credentials from the configured username and a password
///
/// When a username is known without a password and `interactive` is set,
/// the password is prompted for on the terminal.
pub fn resolve_credentials(
    username: Option<&str>,
    password: Option<&str>,
    interactive: bool,
) -> Result<Credentials, String> {
    let username = username.filter(|u| !u.is_empty());
    let password = match (username, password) {
        (Some(_), None) if interactive => Some(
            rpassword::prompt_password("Password: ")
                .map_err(|e| format!("Failed to read password: {}", e))?,
        ),
        (_, password) => password.map(str::to_string),
    };
    Ok(Credentials::from_parts(username, password.as_deref()))
}

/// Build a Nexus handle from the resolved context
pub fn build_nexus(ctx: &AppContext, credentials: Credentials) -> Result<Nexus, String> {
    let server = &ctx.config.server;
    let url = config::validate_server_url(&server.url)?;

    let client_config = ClientConfig::new()
        .with_timeout(server.timeout)
        .with_verify_tls(server.verify_ssl);

    Nexus::builder()
        .server_url(&url)
        .repository(&server.repository)
        .with_credentials(credentials)
        .with_client_config(client_config)
        .build()
        .map_err(|e| format!("Failed to configure Nexus client: {}", e))
}

/// Run the search and render the result in the configured format
pub async fn search(ctx: &AppContext, nexus: &Nexus, args: &SearchArgs) -> Result<String, String> {
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!(
            "Searching {} in repository '{}' for {} pattern(s)",
            nexus.server_url(),
            nexus.repository(),
            args.patterns.len()
        ),
    );
    format::print(
        ctx,
        VerbosityLevel::VeryVerbose,
        &format!("Patterns: {}", args.patterns.join(", ")),
    );

    let formatter = format::create_formatter(ctx);
    let spinner = formatter.spinner("Searching images...");
    let records = match nexus.search(&args.patterns).await {
        Ok(records) => {
            formatter.finish_progress(
                spinner,
                &format!("Found {} unique image versions", records.len()),
            );
            records
        }
        Err(e) => {
            spinner.finish_and_clear();
            return Err(format!("Search failed: {}", e));
        }
    };

    if args.raw {
        return format::format_output(&RawRecords(records), ctx.config.style.format);
    }

    render_filtered(ctx, &records)
}

/// Filter records saved by an earlier `--raw` JSON run, without contacting Nexus
pub fn filter_file(ctx: &AppContext, input: &Path) -> Result<String, String> {
    let contents = fs::read_to_string(input)
        .map_err(|e| format!("Failed to read input file {}: {}", input.display(), e))?;
    let records: Vec<SearchRecord> = serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid JSON in input file {}: {}", input.display(), e))?;

    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Loaded {} records from {}", records.len(), input.display()),
    );

    render_filtered(ctx, &records)
}

fn render_filtered(ctx: &AppContext, records: &[SearchRecord]) -> Result<String, String> {
    let images = filter_with(records, ctx.config.filter.empty_groups);
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Filtered tags for {} image(s)", images.len()),
    );

    format::format_output(&ImageTags(images), ctx.config.style.format)
}

/// Write rendered output to a file, creating parent directories
///
/// The file always ends with a newline. Returns the absolute path written.
pub fn write_output(path: &Path, content: &str) -> Result<PathBuf, String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }

    fs::write(path, terminate_line(content))
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    fs::canonicalize(path).map_err(|e| format!("Failed to resolve {}: {}", path.display(), e))
}

/// Append a newline unless the rendered output already ends with one
pub fn terminate_line(content: &str) -> String {
    if content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{}\n", content)
    }
}
