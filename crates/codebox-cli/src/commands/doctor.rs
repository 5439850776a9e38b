//! Doctor command — report toolchain readiness for each language

use std::process::ExitCode;

use anyhow::Result;
use codebox_core::doctor::{run_doctor, CheckStatus};
use codebox_core::CodeboxConfig;

pub fn execute(config: &CodeboxConfig) -> Result<ExitCode> {
    let report = run_doctor(config);

    for check in &report.checks {
        println!("[{}] {}: {}", check.status, check.name, check.message);
        if check.status != CheckStatus::Pass
            && let Some(hint) = &check.fix_hint
        {
            println!("       hint: {hint}");
        }
    }
    println!();
    println!("{}", report.summary());

    if report.is_healthy() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
