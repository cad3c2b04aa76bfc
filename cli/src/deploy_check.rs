//! Deploy-readiness checks on a project checkout.
//!
//! Findings are either blocking errors or warnings. Only errors fail the
//! command. Nothing here touches the network or the backend.

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Variables the deployed services cannot start without.
pub const REQUIRED_ENV_VARS: &[&str] = &["SUPABASE_URL", "SUPABASE_ANON_KEY", "SUPABASE_SERVICE_ROLE_KEY"];

const TARGET_PATTERNS: &[&str] = &["target", "target/", "/target", "/target/"];
const ENV_PATTERNS: &[&str] = &[".env", "/.env", ".env*"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn error(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, message: message.into() }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, message: message.into() }
    }
}

fn read(dir: &Path, name: &str) -> Option<String> {
    fs::read_to_string(dir.join(name)).ok()
}

/// Pattern on a `.gitignore` line, without surrounding space or a trailing ` #` comment.
fn ignore_pattern(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let pattern = line
        .find(|c: char| c.is_whitespace())
        .map_or(line, |at| if line[at..].trim_start().starts_with('#') { &line[..at] } else { line });
    Some(pattern.trim_end())
}

fn lists_any(content: &str, patterns: &[&str]) -> bool {
    content.lines().filter_map(ignore_pattern).any(|p| patterns.contains(&p))
}

fn defines(content: &str, var: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .any(|(name, _)| name.trim() == var)
}

fn check_manifest(dir: &Path, findings: &mut Vec<Finding>) {
    match read(dir, "Cargo.toml") {
        None => findings.push(Finding::error("Cargo.toml not found")),
        Some(manifest) => match manifest.parse::<toml::Table>() {
            Err(e) => findings.push(Finding::error(format!("Cargo.toml is not valid TOML: {}", e.message()))),
            Ok(table) => {
                if !table.contains_key("workspace") && !table.contains_key("package") {
                    findings.push(Finding::error("Cargo.toml has neither [workspace] nor [package]"));
                }
            }
        },
    }
    if !dir.join("Cargo.lock").is_file() {
        findings.push(Finding::warning("Cargo.lock not found; builds will not be reproducible"));
    }
}

fn check_gitignore(dir: &Path, findings: &mut Vec<Finding>) {
    let Some(gitignore) = read(dir, ".gitignore") else {
        findings.push(Finding::error(".gitignore not found"));
        return;
    };
    if !lists_any(&gitignore, ENV_PATTERNS) {
        findings.push(Finding::error(".gitignore does not exclude .env; secrets could be committed"));
    }
    if !lists_any(&gitignore, TARGET_PATTERNS) {
        findings.push(Finding::warning(".gitignore does not exclude target/"));
    }
}

fn check_env_template(dir: &Path, findings: &mut Vec<Finding>) {
    let Some(template) = read(dir, ".env.example") else {
        findings.push(Finding::warning(".env.example not found"));
        return;
    };
    for var in REQUIRED_ENV_VARS {
        if !defines(&template, var) {
            findings.push(Finding::warning(format!(".env.example does not list {var}")));
        }
    }
}

/// Static checks on files in `dir`.
#[must_use]
pub fn inspect_files(dir: &Path) -> Vec<Finding> {
    let mut findings = Vec::new();
    check_manifest(dir, &mut findings);
    check_gitignore(dir, &mut findings);
    check_env_template(dir, &mut findings);
    findings
}

/// Findings from `git status --porcelain` output. `None` means git could
/// not report on the directory.
#[must_use]
pub fn git_findings(porcelain: Option<&str>) -> Vec<Finding> {
    match porcelain {
        None => vec![Finding::warning("git status unavailable; cannot confirm the tree is committed")],
        Some(out) => {
            let changed = out.lines().filter(|l| !l.trim().is_empty()).count();
            if changed == 0 {
                Vec::new()
            } else {
                vec![Finding::warning(format!("{changed} uncommitted change(s) in the working tree"))]
            }
        }
    }
}

fn git_porcelain(dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .args(["status", "--porcelain"])
        .current_dir(dir)
        .output()
        .ok()?;
    if !output.status.success() {
        debug!(status = ?output.status, "git status failed");
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

/// Every check, file-based first.
#[must_use]
pub fn run(dir: &Path) -> Vec<Finding> {
    let mut findings = inspect_files(dir);
    findings.extend(git_findings(git_porcelain(dir).as_deref()));
    findings
}

#[must_use]
pub fn blocking(findings: &[Finding]) -> usize {
    findings.iter().filter(|f| f.severity == Severity::Error).count()
}

#[must_use]
pub fn render(findings: &[Finding]) -> Vec<String> {
    if findings.is_empty() {
        return vec!["ready to deploy: no issues found".into()];
    }
    let mut lines: Vec<String> = findings
        .iter()
        .map(|f| match f.severity {
            Severity::Error => format!("  error    {}", f.message),
            Severity::Warning => format!("  warning  {}", f.message),
        })
        .collect();
    let errors = blocking(findings);
    lines.push(format!("{errors} error(s), {} warning(s)", findings.len() - errors));
    lines
}

#[cfg(test)]
#[path = "deploy_check_test.rs"]
mod tests;
