//! Check command: report style guide violations in a file.

use std::time::Duration;

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use termlint_core::analyzer::{Analyzer, CachePolicy, IssueReport};
use termlint_core::config::Config;
use termlint_core::fetch::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, FileSource, HttpSource, LibraryRef, StyleGuideSource,
};
use termlint_core::markdown;
use termlint_core::scanner::IssueKind;

use super::read_input_file;

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// File to check.
    pub file: Utf8PathBuf,

    /// Organization that owns the style guide library.
    #[arg(long)]
    pub org: Option<String>,

    /// Style guide library name.
    #[arg(long)]
    pub library: Option<String>,

    /// Share key for a private library.
    #[arg(long)]
    pub key: Option<String>,

    /// Style guide API base URL.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Read the style guide from a local JSON file instead of the API.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["org", "library", "key", "api_url"])]
    pub style_guide: Option<Utf8PathBuf>,

    /// Only report issues of this kind.
    #[arg(long, value_enum)]
    pub only: Option<IssueKind>,
}

/// Check a file against the style guide.
///
/// Fails when any issue is found, unless `--json` is given.
#[instrument(name = "cmd_check", skip_all, fields(file = %args.file))]
pub async fn cmd_check(args: CheckArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = %args.file, style_guide = ?args.style_guide, "executing check command");

    let content = read_input_file(&args.file, config.input_limit())?;
    let text = prepare_text(&content, args.file.extension() == Some("md"));
    let policy = CachePolicy::from_ttl_secs(config.cache_ttl_secs);

    let mut reports = match args.style_guide {
        Some(ref path) => {
            let analyzer = Analyzer::new(FileSource::new(path.clone())).with_cache_policy(policy);
            run_analysis(&analyzer, &text, global_json).await?
        }
        None => {
            let library = resolve_library(&args, config)?;
            let base = args
                .api_url
                .as_deref()
                .or(config.api_base_url.as_deref())
                .unwrap_or(DEFAULT_BASE_URL);
            let timeout =
                Duration::from_secs(config.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
            let source = HttpSource::new(base, &library, timeout)?;
            let analyzer = Analyzer::new(source).with_cache_policy(policy);
            run_analysis(&analyzer, &text, global_json).await?
        }
    };

    if let Some(kind) = args.only {
        reports.retain(|r| r.kind == kind);
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("{} {}", "PASS:".green(), args.file);
        return Ok(());
    }

    println!("{}", args.file.bold());
    for report in &reports {
        print_report(report);
    }

    let occurrences: usize = reports.iter().map(|r| r.matches.len()).sum();
    bail!(
        "{} has {} flagged words ({} occurrences)",
        args.file,
        reports.len(),
        occurrences,
    );
}

/// Fetch (with a spinner) and analyze.
async fn run_analysis<S: StyleGuideSource>(
    analyzer: &Analyzer<S>,
    text: &str,
    hide_spinner: bool,
) -> anyhow::Result<Vec<IssueReport>> {
    let spinner = if hide_spinner {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!(
            "loading style guide from {}",
            analyzer.source().describe()
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    let result = analyzer.analyze(text).await;
    spinner.finish_and_clear();
    result.with_context(|| {
        format!(
            "failed to load style guide from {}",
            analyzer.source().describe()
        )
    })
}

/// Flags win over config; organization and library are required.
fn resolve_library(args: &CheckArgs, config: &Config) -> anyhow::Result<LibraryRef> {
    let Some(organization) = args.org.clone().or_else(|| config.organization.clone()) else {
        bail!("no organization configured: pass --org or set `organization` in termlint.toml");
    };
    let Some(library) = args.library.clone().or_else(|| config.library.clone()) else {
        bail!("no library configured: pass --library or set `library` in termlint.toml");
    };
    let mut library = LibraryRef::new(organization, library);
    if let Some(key) = args.key.clone().or_else(|| config.library_key.clone()) {
        library = library.with_key(key);
    }
    Ok(library)
}

/// Put the file on one line of space-separated words.
fn prepare_text(content: &str, is_markdown: bool) -> String {
    if is_markdown {
        return markdown::strip_to_prose(content);
    }
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_report(report: &IssueReport) {
    let kind = match report.kind {
        IssueKind::Common => report.kind.as_str().yellow().to_string(),
        IssueKind::Avoid => report.kind.as_str().red().to_string(),
    };
    let suggestion = match report.kind {
        IssueKind::Common => report
            .term
            .display_name()
            .map(|name| format!(" → {}", name.green()))
            .unwrap_or_default(),
        IssueKind::Avoid => String::new(),
    };
    println!(
        "\n  {} \"{}\"{} ({} occurrences)",
        kind,
        report.word.bold(),
        suggestion,
        report.matches.len(),
    );
    if let Some(ref description) = report.term.description {
        println!("    {}", description.dimmed());
    }
    for m in &report.matches {
        println!(
            "    {}{} {}",
            m.pre_text.dimmed(),
            m.matched.bold().underline(),
            m.post_text.trim_end().dimmed(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(org: Option<&str>, library: Option<&str>, key: Option<&str>) -> CheckArgs {
        CheckArgs {
            file: Utf8PathBuf::from("doc.txt"),
            org: org.map(str::to_string),
            library: library.map(str::to_string),
            key: key.map(str::to_string),
            api_url: None,
            style_guide: None,
            only: None,
        }
    }

    #[test]
    fn flags_override_config() {
        let config = Config {
            organization: Some("cfg-org".to_string()),
            library: Some("cfg-lib".to_string()),
            library_key: Some("cfg-key".to_string()),
            ..Config::default()
        };
        let library = resolve_library(&args(Some("flag-org"), None, None), &config).unwrap();
        assert_eq!(library.organization, "flag-org");
        assert_eq!(library.library, "cfg-lib");
        assert_eq!(library.key.as_deref(), Some("cfg-key"));
    }

    #[test]
    fn missing_organization_fails() {
        let err = resolve_library(&args(None, Some("lib"), None), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("no organization configured"));
    }

    #[test]
    fn missing_library_fails() {
        let err = resolve_library(&args(Some("org"), None, None), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("no library configured"));
    }

    #[test]
    fn plain_text_lines_are_joined() {
        assert_eq!(
            prepare_text("the colour\n\n  is nice \n", false),
            "the colour is nice"
        );
    }

    #[test]
    fn markdown_is_stripped() {
        assert_eq!(prepare_text("# Title\n\nthe *colour*", true), "Title the colour");
    }
}
