//! Per-request workspace — an ephemeral directory holding one source file
//!
//! Each request gets a fresh uniquely-named directory; `tempfile`'s RAII
//! guard removes it recursively when the workspace drops, so cleanup holds
//! on every exit path, early returns and panics included.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use regex::Regex;
use tempfile::TempDir;
use tracing::debug;

use crate::error::SandboxError;
use crate::language::Language;

/// The class name and source file stem every request is normalized to.
pub const MAIN_CLASS: &str = "Main";

/// An ephemeral directory with the request's source written as
/// `Main.<ext>`.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    source_file: PathBuf,
}

impl Workspace {
    /// Create the workspace and write the source file. `root` overrides the
    /// system temp directory as the parent.
    ///
    /// Java sources have their primary public class renamed to `Main` first,
    /// so arbitrary generated code still satisfies the file-name/class-name
    /// rule.
    pub async fn create(
        language: Language,
        source: &str,
        root: Option<&Path>,
    ) -> Result<Workspace, SandboxError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("codebox-");
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        let source = match language {
            Language::Java => normalize_java_class(source),
            _ => Cow::Borrowed(source),
        };

        let source_file = dir.path().join(format!("{MAIN_CLASS}.{}", language.extension()));
        tokio::fs::write(&source_file, source.as_bytes()).await?;

        debug!(workspace = %dir.path().display(), language = %language, "workspace created");

        Ok(Workspace { dir, source_file })
    }

    /// The workspace directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// File name of the written source (`Main.py`, `Main.java`, ...).
    pub fn source_file_name(&self) -> String {
        self.source_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Where the compiled native binary lands for C++ requests.
    pub fn binary_file(&self) -> PathBuf {
        let name = if cfg!(windows) { "program.exe" } else { "program" };
        self.dir.path().join(name)
    }
}

/// Rewrite the declared public class name to `Main`.
///
/// Declaration-site only: references to the old name inside the code are
/// left alone, which matches how single-class generated snippets are shaped.
pub fn normalize_java_class(source: &str) -> Cow<'_, str> {
    use std::sync::OnceLock;

    static PUBLIC_CLASS_RE: OnceLock<Regex> = OnceLock::new();
    let re = PUBLIC_CLASS_RE.get_or_init(|| Regex::new(r"public\s+class\s+\w+").unwrap());

    re.replace(source, format!("public class {MAIN_CLASS}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_workspace_writes_source_under_root() {
        let root = tempfile::tempdir().unwrap();
        let workspace = Workspace::create(Language::Python, "print(1)", Some(root.path()))
            .await
            .unwrap();

        assert!(workspace.path().starts_with(root.path()));
        assert!(
            workspace
                .path()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("codebox-")
        );
        assert_eq!(workspace.source_file_name(), "Main.py");
        let written = std::fs::read_to_string(workspace.path().join("Main.py")).unwrap();
        assert_eq!(written, "print(1)");
    }

    #[tokio::test]
    async fn test_workspace_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let path = {
            let workspace = Workspace::create(Language::Javascript, "console.log(1)", Some(root.path()))
                .await
                .unwrap();
            workspace.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_java_source_is_normalized_before_writing() {
        let workspace = Workspace::create(
            Language::Java,
            "public class Solution { public static void main(String[] a) {} }",
            None,
        )
        .await
        .unwrap();

        assert_eq!(workspace.source_file_name(), "Main.java");
        let written = std::fs::read_to_string(workspace.path().join("Main.java")).unwrap();
        assert!(written.starts_with("public class Main"));
        assert!(!written.contains("class Solution"));
    }

    #[test]
    fn test_normalize_java_class_rewrites_first_declaration() {
        let source = "public class Solution {\n    int x;\n}";
        assert_eq!(
            normalize_java_class(source),
            "public class Main {\n    int x;\n}"
        );
    }

    #[test]
    fn test_normalize_java_class_leaves_main_alone() {
        let source = "public class Main {}";
        assert_eq!(normalize_java_class(source), source);
    }

    #[test]
    fn test_normalize_java_class_without_declaration() {
        let source = "int helper() { return 1; }";
        assert_eq!(normalize_java_class(source), source);
    }

    #[tokio::test]
    async fn test_binary_file_lands_in_workspace() {
        let workspace = Workspace::create(Language::Cpp, "int main() {}", None)
            .await
            .unwrap();
        let binary = workspace.binary_file();
        assert_eq!(binary.parent(), Some(workspace.path()));
        let expected = if cfg!(windows) { "program.exe" } else { "program" };
        assert_eq!(binary.file_name().unwrap().to_string_lossy(), expected);
    }
}
