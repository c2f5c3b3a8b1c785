//! Site Assembler: substitutes the rendered fragment and the page count into
//! the HTML template, patches the client script's page-count constant, and
//! validates the written output.
//!
//! Failure order matters: template and substitution problems abort before
//! the output file is touched; the structural validation runs after the
//! write, so those failures leave the (bad) output on disk for the caller to
//! restore over.

use crate::config::SiteConfig;
use crate::error::{DeckError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fs;

pub const CONTENT_TOKEN: &str = "{{CONTENT_PLACEHOLDER}}";
pub const COUNT_TOKEN: &str = "{{TOTAL_PAGES}}";

static SECTION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"id="page-(\d+)""#).expect("section id pattern"));
static SCRIPT_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(totalPages\s*=\s*)\d+(\s*;)").expect("script count pattern"));

/// What happened during assembly, beyond success itself.
#[derive(Debug, Default)]
pub struct AssembleReport {
    pub script_patched: bool,
    pub warnings: Vec<String>,
}

/// Substitute `fragment` and `page_count` into the template, write the
/// output wholesale, patch the client script, and validate the result.
pub fn assemble(config: &SiteConfig, fragment: &str, page_count: usize) -> Result<AssembleReport> {
    let template_path = config.template_path();
    let template = match fs::read_to_string(&template_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DeckError::TemplateMissing(template_path));
        }
        Err(e) => return Err(DeckError::Io(e)),
    };

    if !template.contains(CONTENT_TOKEN) {
        return Err(DeckError::TemplateMalformed(CONTENT_TOKEN));
    }
    if !template.contains(COUNT_TOKEN) {
        return Err(DeckError::TemplateMalformed(COUNT_TOKEN));
    }

    // One content token by contract; the count token may repeat.
    let output = template.replacen(CONTENT_TOKEN, fragment, 1);
    let output = output.replace(COUNT_TOKEN, &page_count.to_string());

    if output.contains(CONTENT_TOKEN) {
        return Err(DeckError::SubstitutionFailed(CONTENT_TOKEN));
    }
    if output.contains(COUNT_TOKEN) {
        return Err(DeckError::SubstitutionFailed(COUNT_TOKEN));
    }

    fs::write(config.output_path(), &output).map_err(DeckError::Io)?;

    let mut report = AssembleReport::default();
    match patch_script(config, page_count) {
        Ok(true) => report.script_patched = true,
        Ok(false) => report.warnings.push(format!(
            "script file has no `totalPages = <n>;` assignment, skipping patch: {}",
            config.script_path().display()
        )),
        Err(_) => report.warnings.push(format!(
            "script file not found, skipping patch: {}",
            config.script_path().display()
        )),
    }

    // Re-read what actually landed on disk.
    let written = fs::read_to_string(config.output_path()).map_err(DeckError::Io)?;
    validate_sections(&written, page_count)?;

    Ok(report)
}

/// Rewrite the `totalPages = <n>;` assignment in the client script.
/// Returns false when the pattern is absent; errors only on unreadable file.
fn patch_script(config: &SiteConfig, page_count: usize) -> Result<bool> {
    let script_path = config.script_path();
    let script = fs::read_to_string(&script_path).map_err(DeckError::Io)?;

    if !SCRIPT_COUNT.is_match(&script) {
        return Ok(false);
    }
    let patched = SCRIPT_COUNT
        .replace(&script, format!("${{1}}{page_count}${{2}}"))
        .into_owned();
    fs::write(&script_path, patched).map_err(DeckError::Io)?;
    Ok(true)
}

/// Count unique `page-<n>` identifiers, failing on the first duplicate.
pub fn count_sections(html: &str) -> Result<usize> {
    let mut seen = HashSet::new();
    for capture in SECTION_ID.captures_iter(html) {
        let id = capture[1].to_string();
        if !seen.insert(id) {
            return Err(DeckError::DuplicateId(format!("page-{}", &capture[1])));
        }
    }
    Ok(seen.len())
}

/// Structural validation of assembled output: exactly `expected` unique
/// `page-<n>` identifiers covering 1..=expected.
pub fn validate_sections(html: &str, expected: usize) -> Result<()> {
    let found = count_sections(html)?;
    if found != expected {
        return Err(DeckError::PageCountMismatch { expected, found });
    }

    // Unique and the right count, but the numbers must also cover 1..=N.
    for n in 1..=expected {
        if !html.contains(&format!("id=\"page-{n}\"")) {
            return Err(DeckError::PageCountMismatch { expected, found });
        }
    }
    Ok(())
}

/// Check the written output for leaked placeholder tokens. Used by the
/// standalone `validate` command.
pub fn check_token_leakage(html: &str) -> Result<()> {
    if html.contains(CONTENT_TOKEN) {
        return Err(DeckError::SubstitutionFailed(CONTENT_TOKEN));
    }
    if html.contains(COUNT_TOKEN) {
        return Err(DeckError::SubstitutionFailed(COUNT_TOKEN));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str =
        "<body>{{CONTENT_PLACEHOLDER}}<span id=\"page-counter\">1 / {{TOTAL_PAGES}}</span></body>";

    fn site(template: Option<&str>, script: Option<&str>) -> (tempfile::TempDir, SiteConfig) {
        let temp = tempfile::tempdir().unwrap();
        let config = SiteConfig::load(temp.path()).unwrap();
        if let Some(t) = template {
            fs::write(config.template_path(), t).unwrap();
        }
        if let Some(s) = script {
            fs::create_dir_all(config.script_path().parent().unwrap()).unwrap();
            fs::write(config.script_path(), s).unwrap();
        }
        (temp, config)
    }

    #[test]
    fn substitutes_both_tokens_completely() {
        let (_temp, config) = site(Some(TEMPLATE), None);
        let fragment = "<div id=\"page-1\">X</div><div id=\"page-2\">Y</div>";

        assemble(&config, fragment, 2).unwrap();

        let output = fs::read_to_string(config.output_path()).unwrap();
        assert_eq!(
            output,
            "<body><div id=\"page-1\">X</div><div id=\"page-2\">Y</div><span id=\"page-counter\">1 / 2</span></body>"
        );
        assert!(!output.contains(CONTENT_TOKEN));
        assert!(!output.contains(COUNT_TOKEN));
    }

    #[test]
    fn replaces_every_count_token() {
        let (_temp, config) = site(
            Some("{{CONTENT_PLACEHOLDER}} {{TOTAL_PAGES}} of {{TOTAL_PAGES}}"),
            None,
        );
        assemble(&config, "<div id=\"page-1\"></div>", 1).unwrap();
        let output = fs::read_to_string(config.output_path()).unwrap();
        assert_eq!(output, "<div id=\"page-1\"></div> 1 of 1");
    }

    #[test]
    fn missing_template_fails() {
        let (_temp, config) = site(None, None);
        let err = assemble(&config, "", 0).unwrap_err();
        assert!(matches!(err, DeckError::TemplateMissing(_)));
    }

    #[test]
    fn template_without_tokens_fails_before_writing() {
        let (_temp, config) = site(Some("<body>{{TOTAL_PAGES}}</body>"), None);
        let err = assemble(&config, "x", 1).unwrap_err();
        assert!(matches!(err, DeckError::TemplateMalformed(CONTENT_TOKEN)));
        assert!(!config.output_path().exists());

        let (_temp, config) = site(Some("<body>{{CONTENT_PLACEHOLDER}}</body>"), None);
        let err = assemble(&config, "x", 1).unwrap_err();
        assert!(matches!(err, DeckError::TemplateMalformed(COUNT_TOKEN)));
    }

    #[test]
    fn content_carrying_the_token_fails_before_writing() {
        let (_temp, config) = site(Some(TEMPLATE), None);
        let fragment = "oops {{CONTENT_PLACEHOLDER}}";
        let err = assemble(&config, fragment, 1).unwrap_err();
        assert!(matches!(err, DeckError::SubstitutionFailed(CONTENT_TOKEN)));
        assert!(!config.output_path().exists());
    }

    #[test]
    fn section_count_mismatch_is_raised_after_write() {
        let (_temp, config) = site(Some(TEMPLATE), None);
        let fragment = "<div id=\"page-1\">only one</div>";
        let err = assemble(&config, fragment, 2).unwrap_err();
        assert!(matches!(
            err,
            DeckError::PageCountMismatch {
                expected: 2,
                found: 1
            }
        ));
        // The bad output exists; restoring is the caller's call.
        assert!(config.output_path().exists());
    }

    #[test]
    fn duplicate_section_ids_are_rejected() {
        let err = validate_sections("<i id=\"page-1\"></i><i id=\"page-1\"></i>", 2).unwrap_err();
        assert!(matches!(err, DeckError::DuplicateId(id) if id == "page-1"));
    }

    #[test]
    fn section_numbers_must_cover_one_to_n() {
        let err = validate_sections("<i id=\"page-1\"></i><i id=\"page-3\"></i>", 2).unwrap_err();
        assert!(matches!(err, DeckError::PageCountMismatch { .. }));
    }

    #[test]
    fn script_patch_rewrites_the_constant() {
        let (_temp, config) = site(Some(TEMPLATE), Some("this.totalPages = 3;\nlet x = 1;"));
        let report = assemble(&config, "<div id=\"page-1\"></div>", 1).unwrap();
        assert!(report.script_patched);
        assert!(report.warnings.is_empty());

        let script = fs::read_to_string(config.script_path()).unwrap();
        assert!(script.contains("this.totalPages = 1;"));
    }

    #[test]
    fn missing_script_is_a_warning_not_an_error() {
        let (_temp, config) = site(Some(TEMPLATE), None);
        let report = assemble(&config, "<div id=\"page-1\"></div>", 1).unwrap();
        assert!(!report.script_patched);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("not found"));
    }

    #[test]
    fn script_without_pattern_is_a_warning() {
        let (_temp, config) = site(Some(TEMPLATE), Some("console.log('hi');"));
        let report = assemble(&config, "<div id=\"page-1\"></div>", 1).unwrap();
        assert!(!report.script_patched);
        assert!(report.warnings[0].contains("no `totalPages"));
    }
}
