//! Local sandbox — compile and run code with the host toolchains
//!
//! One request flows through validate → resolve toolchain → create
//! workspace → compile (compiled languages) → run, with each phase bounded
//! by the policy's time limits. Every failure is recovered into the uniform
//! [`ExecutionResult`] shape; `run` never returns `Err` and never panics on
//! user code.
//!
//! WARNING: this executes arbitrary code directly on the host. Use it for
//! trusted input or development hosts only; deployments serving untrusted
//! code should select the remote judge backend instead.

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use super::policy::ExecutionPolicy;
use super::toolchain::{self, Toolchain};
use super::workspace::{MAIN_CLASS, Workspace};
use crate::error::SandboxError;
use crate::language::Language;
use crate::result::{ExecutionRequest, ExecutionResult};
use crate::runner::Runner;

/// The local execution engine.
pub struct LocalSandbox {
    policy: ExecutionPolicy,
}

/// Captured streams and exit state of one compile or run phase.
struct PhaseOutput {
    stdout: String,
    stderr: String,
    success: bool,
}

impl LocalSandbox {
    pub fn new(policy: ExecutionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ExecutionPolicy {
        &self.policy
    }

    /// Execute one request. Total: every failure kind comes back as an
    /// error-shaped result, never as `Err` or a panic.
    pub async fn run(&self, request: &ExecutionRequest) -> ExecutionResult {
        let started = Instant::now();
        debug!(
            "Sandbox: executing {} request ({} bytes)",
            request.language,
            request.source.len()
        );

        let result = match self.try_run(request).await {
            Ok(result) => result,
            Err(err) => {
                warn!("Sandbox: {} request failed: {}", request.language, err);
                err.into_result()
            }
        };

        info!(
            "Sandbox: {} request finished ({}ms)",
            request.language,
            started.elapsed().as_millis()
        );
        result
    }

    async fn try_run(&self, request: &ExecutionRequest) -> Result<ExecutionResult, SandboxError> {
        // Cheap rejections first: nothing touches the filesystem or spawns
        // a process for a request that cannot run.
        if request.source.len() > self.policy.max_source_bytes {
            return Err(SandboxError::SourceTooLarge {
                size: request.source.len(),
                limit: self.policy.max_source_bytes,
            });
        }
        let toolchain = toolchain::resolve(request.language)?;

        let workspace = Workspace::create(
            request.language,
            &request.source,
            self.policy.workspace_root.as_deref(),
        )
        .await?;

        let mut compile_output = None;
        if let Some(command) = compile_command(request.language, &toolchain, &workspace) {
            let phase = run_phase(command, "", self.policy.compile_timeout()).await?;
            // Compilers put diagnostics on stderr; fall back to stdout for
            // the ones that do not.
            let diagnostics = if phase.stderr.is_empty() {
                phase.stdout
            } else {
                phase.stderr
            };
            if !phase.success {
                debug!("Sandbox: {} compilation failed", request.language);
                return Ok(ExecutionResult::compile_failure(diagnostics));
            }
            compile_output = Some(diagnostics);
        }

        let command = run_command(request.language, &toolchain, &workspace);
        let phase = match run_phase(command, &request.stdin, self.policy.run_timeout()).await {
            Ok(phase) => phase,
            // Diagnostics already captured by a successful compile survive
            // a dead run phase.
            Err(err) => {
                warn!("Sandbox: {} run phase failed: {}", request.language, err);
                return Ok(ExecutionResult {
                    stdout: String::new(),
                    stderr: err.to_string(),
                    compile_output,
                });
            }
        };

        // A nonzero exit is the program's own business: its stdout/stderr
        // are returned verbatim, not converted into a sandbox error.
        Ok(ExecutionResult {
            stdout: phase.stdout,
            stderr: phase.stderr,
            compile_output,
        })
    }
}

impl Default for LocalSandbox {
    fn default() -> Self {
        Self::new(ExecutionPolicy::default())
    }
}

#[async_trait]
impl Runner for LocalSandbox {
    fn name(&self) -> &str {
        "local"
    }

    async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult {
        self.run(request).await
    }
}

/// Build the compile invocation, or `None` for interpreted languages.
fn compile_command(
    language: Language,
    toolchain: &Toolchain,
    workspace: &Workspace,
) -> Option<Command> {
    let mut command = Command::new(&toolchain.primary);
    command.current_dir(workspace.path());
    match language {
        Language::Cpp => {
            command
                .arg(workspace.source_file_name())
                .args(["-O2", "-std=c++17", "-o"])
                .arg(workspace.binary_file());
            Some(command)
        }
        Language::Java => {
            command.arg(workspace.source_file_name());
            Some(command)
        }
        Language::Python | Language::Javascript => None,
    }
}

/// Build the run invocation for the compiled artifact or the interpreter.
fn run_command(language: Language, toolchain: &Toolchain, workspace: &Workspace) -> Command {
    let mut command = match language {
        Language::Python | Language::Javascript => {
            let mut command = Command::new(&toolchain.primary);
            command.arg(workspace.source_file_name());
            command
        }
        Language::Java => {
            // resolve() always pairs a launcher with javac
            let launcher = toolchain
                .launcher
                .as_deref()
                .unwrap_or(toolchain.primary.as_path());
            let mut command = Command::new(launcher);
            command.arg("-cp").arg(workspace.path()).arg(MAIN_CLASS);
            command
        }
        Language::Cpp => Command::new(workspace.binary_file()),
    };
    command.current_dir(workspace.path());
    command
}

/// Spawn one phase, feed its stdin, and capture both streams verbatim.
///
/// On expiry the whole process tree is terminated and reaped; partial
/// output is discarded and the phase reports [`SandboxError::Timeout`].
async fn run_phase(
    mut command: Command,
    stdin: &str,
    limit: Duration,
) -> Result<PhaseOutput, SandboxError> {
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    command.process_group(0);

    let mut child = command.spawn()?;

    let stdin_pipe = child.stdin.take();
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    let phase = async {
        let feed = async move {
            if let Some(mut sink) = stdin_pipe {
                // The child may exit without draining its stdin.
                match sink.write_all(stdin.as_bytes()).await {
                    Err(err) if err.kind() != std::io::ErrorKind::BrokenPipe => return Err(err),
                    _ => {}
                }
                // Dropping the sink closes the pipe so the child sees EOF.
            }
            Ok(())
        };
        let (fed, stdout, stderr) = tokio::join!(
            feed,
            read_stream(stdout_pipe),
            read_stream(stderr_pipe)
        );
        fed?;
        let status = child.wait().await?;
        Ok::<_, std::io::Error>((stdout?, stderr?, status))
    };

    match tokio::time::timeout(limit, phase).await {
        Ok(Ok((stdout, stderr, status))) => Ok(PhaseOutput {
            stdout,
            stderr,
            success: status.success(),
        }),
        Ok(Err(err)) => Err(SandboxError::Io(err)),
        Err(_elapsed) => {
            if let Err(err) = kill_process_tree(&mut child) {
                warn!("Sandbox: failed to kill process group: {}", err);
            }
            let _ = child.start_kill();
            // Reap the direct child so nothing survives as a zombie.
            let _ = child.wait().await;
            Err(SandboxError::Timeout)
        }
    }
}

/// Read a piped stream to EOF. Output is kept verbatim and unbounded.
async fn read_stream<R: AsyncRead + Unpin>(stream: Option<R>) -> std::io::Result<String> {
    let Some(mut stream) = stream else {
        return Ok(String::new());
    };
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// SIGKILL the child's whole process group. Children are spawned with
/// `process_group(0)`, so grandchildren go down with them.
#[cfg(unix)]
fn kill_process_tree(child: &mut Child) -> std::io::Result<()> {
    use std::io::ErrorKind;

    if let Some(pid) = child.id() {
        let pid = pid as libc::pid_t;
        let pgid = unsafe { libc::getpgid(pid) };
        if pgid == -1 {
            let err = std::io::Error::last_os_error();
            if err.kind() != ErrorKind::NotFound {
                return Err(err);
            }
            return Ok(());
        }

        let result = unsafe { libc::killpg(pgid, libc::SIGKILL) };
        if result == -1 {
            let err = std::io::Error::last_os_error();
            if err.kind() != ErrorKind::NotFound {
                return Err(err);
            }
        }
    }

    Ok(())
}

/// Best effort off Unix: no process groups, kill the direct child.
#[cfg(not(unix))]
fn kill_process_tree(child: &mut Child) -> std::io::Result<()> {
    let _ = child.start_kill();
    Ok(())
}
