//! Languages command — list supported languages and locate their tools

use std::process::ExitCode;

use anyhow::Result;
use codebox_core::sandbox::toolchain;
use codebox_core::Language;

pub fn execute() -> Result<ExitCode> {
    println!(
        "{:<12} {:<12} {:<6} {:<12} TOOLCHAIN",
        "LANGUAGE", "NAME", "EXT", "KIND"
    );
    for language in Language::all() {
        let kind = if language.is_compiled() {
            "compiled"
        } else {
            "interpreted"
        };
        let toolchain = match toolchain::resolve(language) {
            Ok(toolchain) => toolchain.primary.display().to_string(),
            Err(_) => "not found".to_string(),
        };
        println!(
            "{:<12} {:<12} {:<6} {:<12} {}",
            language.as_str(),
            language.display_name(),
            language.extension(),
            kind,
            toolchain
        );
    }
    Ok(ExitCode::SUCCESS)
}
