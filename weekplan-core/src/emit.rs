//! Writing the finished document: plain `.tex`, or `.pdf` via a LaTeX
//! compiler run in a scratch directory.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use tokio::process::Command;

use crate::error::{PlannerError, PlannerResult};

const SOURCE_FILE: &str = "calendar.tex";
const ARTIFACT_FILE: &str = "calendar.pdf";

/// What to produce, decided by the destination's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// LaTeX source, written verbatim
    Source,
    /// Compiled PDF
    Binary,
}

impl OutputFormat {
    /// Exact, case-sensitive match on the end of the full path.
    pub fn from_path(path: &Path) -> PlannerResult<Self> {
        let name = path.to_string_lossy();
        if name.ends_with(".tex") {
            Ok(OutputFormat::Source)
        } else if name.ends_with(".pdf") {
            Ok(OutputFormat::Binary)
        } else {
            Err(PlannerError::UnsupportedOutput(name.into_owned()))
        }
    }
}

/// External typesetting command. The source file name is appended as the
/// last argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Compiler {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler {
            program: "lualatex".to_string(),
            args: vec![
                "--halt-on-error".to_string(),
                "--interaction=nonstopmode".to_string(),
            ],
        }
    }
}

pub struct Emitter {
    compiler: Compiler,
    scratch_root: Option<PathBuf>,
}

impl Emitter {
    pub fn new(compiler: Compiler) -> Self {
        Emitter {
            compiler,
            scratch_root: None,
        }
    }

    /// Create scratch directories under `root` instead of the system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    pub async fn emit(
        &self,
        document: &str,
        destination: &Path,
        format: OutputFormat,
    ) -> PlannerResult<()> {
        match format {
            OutputFormat::Source => {
                tokio::fs::write(destination, document).await?;
                Ok(())
            }
            OutputFormat::Binary => self.compile(document, destination).await,
        }
    }

    /// The scratch directory is removed when `scratch` drops, so every early
    /// return below cleans up as well.
    async fn compile(&self, document: &str, destination: &Path) -> PlannerResult<()> {
        let scratch = self.scratch_dir()?;
        tokio::fs::write(scratch.path().join(SOURCE_FILE), document).await?;

        tracing::info!(
            program = %self.compiler.program,
            dir = %scratch.path().display(),
            "compiling planner"
        );

        let output = Command::new(&self.compiler.program)
            .args(&self.compiler.args)
            .arg(SOURCE_FILE)
            .current_dir(scratch.path())
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|source| PlannerError::CompilerSpawn {
                program: self.compiler.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PlannerError::CompilerFailed {
                program: self.compiler.program.clone(),
                status: output.status.to_string(),
                output: String::from_utf8_lossy(&output.stdout).into_owned(),
            });
        }

        tokio::fs::copy(scratch.path().join(ARTIFACT_FILE), destination).await?;
        scratch.close()?;

        Ok(())
    }

    fn scratch_dir(&self) -> PlannerResult<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("weekplan-");

        let dir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "\\documentclass{article}\n\\begin{document}x\\end{document}\n";

    fn missing_compiler() -> Compiler {
        Compiler {
            program: "/nonexistent/weekplan-compiler".to_string(),
            args: vec![],
        }
    }

    #[cfg(unix)]
    fn shell(script: &str) -> Compiler {
        Compiler {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    fn is_empty_dir(path: &Path) -> bool {
        std::fs::read_dir(path).unwrap().next().is_none()
    }

    #[test]
    fn format_from_suffix() {
        assert_eq!(OutputFormat::from_path(Path::new("out.tex")).unwrap(), OutputFormat::Source);
        assert_eq!(OutputFormat::from_path(Path::new("/tmp/a/out.pdf")).unwrap(), OutputFormat::Binary);

        for bad in ["out.TEX", "out.Pdf", "out.pdf.bak", "out", "out.txt"] {
            assert!(
                matches!(OutputFormat::from_path(Path::new(bad)), Err(PlannerError::UnsupportedOutput(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn default_compiler_is_lualatex() {
        let compiler = Compiler::default();
        assert_eq!(compiler.program, "lualatex");
        assert_eq!(compiler.args, ["--halt-on-error", "--interaction=nonstopmode"]);
    }

    #[tokio::test]
    async fn source_mode_never_runs_the_compiler() {
        let out = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let destination = out.path().join("planner.tex");

        Emitter::new(missing_compiler())
            .with_scratch_root(scratch.path())
            .emit(DOCUMENT, &destination, OutputFormat::Source)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&destination).unwrap(), DOCUMENT);
        assert!(is_empty_dir(scratch.path()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn binary_mode_copies_artifact_and_cleans_up() {
        let out = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let destination = out.path().join("planner.pdf");

        Emitter::new(shell("cp \"$0\" calendar.pdf"))
            .with_scratch_root(scratch.path())
            .emit(DOCUMENT, &destination, OutputFormat::Binary)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&destination).unwrap(), DOCUMENT);
        assert!(is_empty_dir(scratch.path()), "scratch directory left behind");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failed_compile_reports_output_and_cleans_up() {
        let out = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let destination = out.path().join("planner.pdf");

        let err = Emitter::new(shell("echo '! Undefined control sequence.'; exit 1"))
            .with_scratch_root(scratch.path())
            .emit(DOCUMENT, &destination, OutputFormat::Binary)
            .await
            .unwrap_err();

        match err {
            PlannerError::CompilerFailed { output, .. } => {
                assert!(output.contains("Undefined control sequence"), "output was: {output}");
            }
            other => panic!("expected CompilerFailed, got {other:?}"),
        }
        assert!(!destination.exists());
        assert!(is_empty_dir(scratch.path()), "scratch directory left behind");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_artifact_is_an_io_error() {
        let out = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();

        let err = Emitter::new(shell("true"))
            .with_scratch_root(scratch.path())
            .emit(DOCUMENT, &out.path().join("planner.pdf"), OutputFormat::Binary)
            .await
            .unwrap_err();

        assert!(matches!(err, PlannerError::Io(_)));
        assert!(is_empty_dir(scratch.path()));
    }

    #[tokio::test]
    async fn missing_compiler_cleans_up() {
        let out = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();

        let err = Emitter::new(missing_compiler())
            .with_scratch_root(scratch.path())
            .emit(DOCUMENT, &out.path().join("planner.pdf"), OutputFormat::Binary)
            .await
            .unwrap_err();

        assert!(matches!(err, PlannerError::CompilerSpawn { .. }));
        assert!(is_empty_dir(scratch.path()));
    }
}
