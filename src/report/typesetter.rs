use crate::config::TypesetterConfig;
use crate::error::{ReportError, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Outcome of one typesetter invocation. The log is kept either way.
#[derive(Debug)]
pub struct TypesetRun {
    pub status: ExitStatus,
    pub log_path: PathBuf,
}

impl TypesetRun {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn into_result(self) -> Result<PathBuf> {
        if self.success() {
            Ok(self.log_path)
        } else {
            Err(ReportError::BuildFailure {
                status: self.status,
                log_path: self.log_path,
            })
        }
    }
}

/// External document compiler, run once per call with its console output
/// captured to a log file.
#[derive(Debug, Clone)]
pub struct Typesetter {
    program: String,
    args: Vec<String>,
}

impl Typesetter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &TypesetterConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with `{source}` and `{jobname}` filled in.
    pub fn arguments(&self, source: &str, jobname: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace("{source}", source).replace("{jobname}", jobname))
            .collect()
    }

    /// Runs the program in `workdir`, blocking until it exits. Stdout and
    /// stderr both go to `log_path`.
    pub fn run(&self, workdir: &Path, source: &str, jobname: &str, log_path: &Path) -> Result<TypesetRun> {
        let args = self.arguments(source, jobname);

        let mut log = File::create(log_path)?;
        writeln!(log, "$ {} {}", self.program, args.join(" "))?;
        log.flush()?;
        let stderr_log = log.try_clone()?;

        tracing::info!("running {} in {}", self.program, workdir.display());
        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(stderr_log))
            .status();

        let status = match status {
            Ok(status) => status,
            Err(source) => {
                if let Ok(mut log) = OpenOptions::new().append(true).open(log_path) {
                    let _ = writeln!(log, "failed to launch {}: {}", self.program, source);
                }
                return Err(ReportError::Launch {
                    program: self.program.clone(),
                    source,
                });
            }
        };

        if status.success() {
            tracing::debug!("{} finished; log at {}", self.program, log_path.display());
        } else {
            tracing::error!(
                "{} exited with {}; see {}",
                self.program,
                status,
                log_path.display()
            );
        }

        Ok(TypesetRun {
            status,
            log_path: log_path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn arguments_substitute_placeholders() {
        let typesetter = Typesetter::from_config(&TypesetterConfig::default());
        assert_eq!(typesetter.program(), "pdflatex");
        assert_eq!(
            typesetter.arguments("report.tex", "sample1"),
            vec![
                "-interaction=nonstopmode",
                "-shell-escape",
                "-jobname=sample1",
                "report.tex"
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn output_and_errors_land_in_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("build.log");
        let typesetter = Typesetter::new(
            "sh",
            vec!["-c".to_string(), "echo out {jobname}; echo err >&2".to_string()],
        );

        let run = typesetter.run(dir.path(), "report.tex", "job", &log_path).unwrap();
        assert!(run.success());

        let log = fs::read_to_string(&log_path).unwrap();
        assert!(log.starts_with("$ sh -c"));
        assert!(log.contains("out job\n"));
        assert!(log.contains("err\n"));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_a_build_failure() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("build.log");
        let typesetter = Typesetter::new("sh", vec!["-c".to_string(), "exit 2".to_string()]);

        let run = typesetter.run(dir.path(), "report.tex", "job", &log_path).unwrap();
        assert!(!run.success());
        match run.into_result() {
            Err(ReportError::BuildFailure { log_path: path, .. }) => assert_eq!(path, log_path),
            other => panic!("expected BuildFailure, got {:?}", other),
        }
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("build.log");
        let typesetter = Typesetter::new("definitely-not-a-typesetter-7f3a", vec![]);

        let result = typesetter.run(dir.path(), "report.tex", "job", &log_path);
        assert!(matches!(result, Err(ReportError::Launch { .. })));
        assert!(fs::read_to_string(&log_path).unwrap().contains("failed to launch"));
    }
}
