//! Run command — execute a source file and print the captured output

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use codebox_core::harness::{strip_code_fences, wrap_runnable_code};
use codebox_core::sandbox::LocalSandbox;
use codebox_core::{CodeboxConfig, ExecutionRequest, ExecutionResult, Language, RemoteJudge, Runner};

pub async fn execute(
    config: CodeboxConfig,
    file: PathBuf,
    language: Option<String>,
    stdin: Option<PathBuf>,
    wrap: bool,
    remote: bool,
) -> Result<ExitCode> {
    let language = resolve_language(&file, language.as_deref())?;

    let mut source = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read source file: {}", file.display()))?;
    if wrap {
        source = wrap_runnable_code(language, &strip_code_fences(&source));
    }

    let mut request = ExecutionRequest::new(language, source);
    if let Some(path) = stdin {
        let input = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read stdin file: {}", path.display()))?;
        request = request.with_stdin(input);
    }

    let runner: Arc<dyn Runner> = if remote {
        Arc::new(RemoteJudge::new(&config.remote))
    } else {
        Arc::new(LocalSandbox::new(config.sandbox))
    };

    let result = runner.execute(&request).await;
    print_result(&result);
    if run_failed(&result) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Picks the language from an explicit tag, falling back to the file extension.
fn resolve_language(file: &Path, tag: Option<&str>) -> Result<Language> {
    if let Some(tag) = tag {
        return Ok(tag.parse()?);
    }
    file.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
        .with_context(|| {
            format!(
                "Cannot infer language from {}; pass --language",
                file.display()
            )
        })
}

fn print_result(result: &ExecutionResult) {
    if let Some(compile_output) = &result.compile_output
        && !compile_output.is_empty()
    {
        println!("=== COMPILER OUTPUT ===");
        println!("{}", compile_output.trim_end());
    }

    println!("=== STDOUT ===");
    if result.stdout.is_empty() {
        println!("(no output)");
    } else {
        println!("{}", result.stdout.trim_end());
    }

    if !result.stderr.is_empty() {
        println!("=== STDERR ===");
        println!("{}", result.stderr.trim_end());
    }
}

/// A run counts as failed when the program produced errors and nothing else.
fn run_failed(result: &ExecutionResult) -> bool {
    let compile_failed = result
        .compile_output
        .as_deref()
        .is_some_and(|out| !out.is_empty())
        && result.stdout.is_empty()
        && result.stderr.is_empty();
    let runtime_failed = result.stdout.is_empty() && !result.stderr.is_empty();
    compile_failed || runtime_failed
}
