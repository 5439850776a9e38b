//! Doctor — host toolchain health checks
//!
//! Answers "can this machine actually execute the supported languages?"
//! before a request has to find out the hard way. Each language resolves
//! its toolchain the same way the sandbox does, the workspace root gets a
//! writability check, and the remote judge URL is validated when that
//! backend is selected. Consumed by `codebox doctor`.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{Backend, CodeboxConfig, RemoteConfig};
use crate::language::Language;
use crate::sandbox::{ExecutionPolicy, toolchain};

/// Result of a single health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub fix_hint: Option<String>,
}

/// Status of a health check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
    Skip,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Warn => write!(f, "WARN"),
            CheckStatus::Fail => write!(f, "FAIL"),
            CheckStatus::Skip => write!(f, "SKIP"),
        }
    }
}

/// Full doctor report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorReport {
    pub checks: Vec<CheckResult>,
    pub pass_count: usize,
    pub warn_count: usize,
    pub fail_count: usize,
    pub skip_count: usize,
}

impl DoctorReport {
    pub fn is_healthy(&self) -> bool {
        self.fail_count == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} warnings, {} failed, {} skipped",
            self.pass_count, self.warn_count, self.fail_count, self.skip_count
        )
    }
}

/// Run all toolchain and environment checks.
pub fn run_doctor(config: &CodeboxConfig) -> DoctorReport {
    info!("Running toolchain checks...");
    let mut checks = Vec::new();

    for language in Language::all() {
        checks.push(check_language(language));
    }
    checks.push(check_workspace_root(&config.sandbox));
    checks.push(check_remote_judge(config.gateway.backend, &config.remote));

    let pass_count = checks.iter().filter(|c| c.status == CheckStatus::Pass).count();
    let warn_count = checks.iter().filter(|c| c.status == CheckStatus::Warn).count();
    let fail_count = checks.iter().filter(|c| c.status == CheckStatus::Fail).count();
    let skip_count = checks.iter().filter(|c| c.status == CheckStatus::Skip).count();

    let report = DoctorReport {
        checks,
        pass_count,
        warn_count,
        fail_count,
        skip_count,
    };

    if report.is_healthy() {
        info!("Doctor: all checks passed ({})", report.summary());
    } else {
        warn!("Doctor: issues found ({})", report.summary());
    }

    report
}

fn check_language(language: Language) -> CheckResult {
    // Java needs both halves of the toolchain; report a partial install
    // as a warning instead of a bare failure.
    if language == Language::Java {
        return check_java();
    }

    let name = format!("toolchain_{language}");
    match toolchain::resolve(language) {
        Ok(toolchain) => CheckResult {
            name,
            status: CheckStatus::Pass,
            message: format!(
                "{} toolchain found: {}",
                language.display_name(),
                toolchain.primary.display()
            ),
            fix_hint: None,
        },
        Err(err) => CheckResult {
            name,
            status: CheckStatus::Fail,
            message: err.to_string(),
            fix_hint: Some(install_hint(language).to_string()),
        },
    }
}

fn check_java() -> CheckResult {
    let name = "toolchain_java".to_string();
    let javac = which::which("javac").ok();
    let java = which::which("java").ok();

    match (javac, java) {
        (Some(javac), Some(java)) => CheckResult {
            name,
            status: CheckStatus::Pass,
            message: format!(
                "Java toolchain found: javac {}, java {}",
                javac.display(),
                java.display()
            ),
            fix_hint: None,
        },
        (Some(javac), None) => CheckResult {
            name,
            status: CheckStatus::Warn,
            message: format!("javac found ({}) but java is missing", javac.display()),
            fix_hint: Some(install_hint(Language::Java).to_string()),
        },
        (None, Some(java)) => CheckResult {
            name,
            status: CheckStatus::Warn,
            message: format!("java found ({}) but javac is missing", java.display()),
            fix_hint: Some(install_hint(Language::Java).to_string()),
        },
        (None, None) => CheckResult {
            name,
            status: CheckStatus::Fail,
            message: "javac/java not found on PATH.".to_string(),
            fix_hint: Some(install_hint(Language::Java).to_string()),
        },
    }
}

fn install_hint(language: Language) -> &'static str {
    match language {
        Language::Python => "Install Python 3 (e.g. apt install python3)",
        Language::Javascript => "Install Node.js (e.g. apt install nodejs)",
        Language::Cpp => "Install GCC (e.g. apt install g++)",
        Language::Java => "Install a JDK (e.g. apt install default-jdk)",
    }
}

fn check_workspace_root(policy: &ExecutionPolicy) -> CheckResult {
    let root = policy
        .workspace_root
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    let canary = root.join(".codebox_doctor_test");

    match std::fs::write(&canary, "test") {
        Ok(()) => {
            let _ = std::fs::remove_file(&canary);
            CheckResult {
                name: "workspace_root".to_string(),
                status: CheckStatus::Pass,
                message: format!("Workspace root writable: {}", root.display()),
                fix_hint: None,
            }
        }
        Err(err) => CheckResult {
            name: "workspace_root".to_string(),
            status: CheckStatus::Fail,
            message: format!("Workspace root not writable: {err}"),
            fix_hint: Some(format!("Check permissions on {}", root.display())),
        },
    }
}

fn check_remote_judge(backend: Backend, remote: &RemoteConfig) -> CheckResult {
    let name = "remote_judge".to_string();
    if backend != Backend::Remote {
        return CheckResult {
            name,
            status: CheckStatus::Skip,
            message: "local backend selected; remote judge not checked".to_string(),
            fix_hint: None,
        };
    }

    match reqwest::Url::parse(&remote.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => CheckResult {
            name,
            status: CheckStatus::Pass,
            message: format!("Remote judge URL valid: {url}"),
            fix_hint: None,
        },
        Ok(url) => CheckResult {
            name,
            status: CheckStatus::Fail,
            message: format!(
                "Remote judge URL has scheme {}, expected http or https",
                url.scheme()
            ),
            fix_hint: Some("Set [remote] base_url to a full http(s) URL".to_string()),
        },
        Err(err) => CheckResult {
            name,
            status: CheckStatus::Fail,
            message: format!("Remote judge URL invalid: {err}"),
            fix_hint: Some("Set [remote] base_url to a full http(s) URL".to_string()),
        },
    }
}
