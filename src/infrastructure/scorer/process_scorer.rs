use crate::config::ScorerEnvConfig;
use crate::domain::errors::ScoringError;
use crate::domain::ports::Scorer;
use crate::domain::pricing::{FeatureVector, InvocationOutcome, parse_scorer_output};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, warn};

/// Scorer backed by an external program, one process per invocation.
///
/// Runs `<interpreter> <script> <json-array>` from the configured working
/// directory. The program must print exactly one decimal number on stdout and
/// exit 0; anything else is a failure. Both streams are read to EOF before the
/// exit status is inspected.
pub struct ProcessScorer {
    config: ScorerEnvConfig,
}

impl ProcessScorer {
    pub fn new(config: ScorerEnvConfig) -> Self {
        Self { config }
    }

    fn command(&self, payload: &str) -> Command {
        let mut cmd = Command::new(&self.config.interpreter);
        cmd.arg(&self.config.script)
            .arg(payload)
            .current_dir(&self.config.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timed out invocation drops the child; make sure it dies with it.
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Scorer for ProcessScorer {
    async fn score(&self, features: &FeatureVector) -> InvocationOutcome {
        let payload = features.to_json_arg();
        debug!(
            "Launching scorer: {} {} {} (cwd: {:?})",
            self.config.interpreter, self.config.script, payload, self.config.working_dir
        );

        let child = self.command(&payload).spawn().map_err(|e| {
            error!(
                "Failed to launch scorer {:?} in {:?}: {}",
                self.config.interpreter, self.config.working_dir, e
            );
            ScoringError::Launch {
                program: self.config.interpreter.clone(),
                reason: e.to_string(),
            }
        })?;

        let collected = match self.config.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(collected) => collected,
                Err(_) => {
                    warn!(
                        "Scorer exceeded {:?} for features {}; process killed",
                        limit, payload
                    );
                    return Err(ScoringError::TimedOut {
                        timeout_secs: limit.as_secs(),
                    });
                }
            },
            None => child.wait_with_output().await,
        };

        let output = collected.map_err(|e| {
            error!("Failed to collect scorer output: {}", e);
            ScoringError::ProcessFailed {
                exit_code: None,
                stderr: format!("failed to collect scorer output: {}", e),
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            error!(
                "Scorer failed ({}) for features {}. stderr: {} | stdout: {}",
                output.status,
                payload,
                stderr.trim(),
                stdout.trim()
            );
            return Err(ScoringError::ProcessFailed {
                exit_code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        if !stderr.trim().is_empty() {
            warn!("Scorer exited 0 but wrote to stderr: {}", stderr.trim());
        }
        debug!("Scorer stdout: {:?}", stdout);

        parse_scorer_output(&stdout).inspect_err(|e| {
            error!("Unparseable scorer output {:?}: {}", stdout, e);
        })
    }

    fn name(&self) -> &str {
        "external process"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn features() -> FeatureVector {
        FeatureVector::new([100.0, 0.15, 4.5, 1200.0]).unwrap()
    }

    #[test]
    fn test_command_layout() {
        let scorer = ProcessScorer::new(ScorerEnvConfig {
            interpreter: "python3".to_string(),
            script: "predict.py".to_string(),
            working_dir: PathBuf::from("python"),
            timeout: None,
        });

        let cmd = scorer.command("[100.0,0.15,4.5,1200.0]");
        let std_cmd = cmd.as_std();
        let args: Vec<_> = std_cmd.get_args().collect();

        assert_eq!(std_cmd.get_program(), "python3");
        assert_eq!(args, vec!["predict.py", "[100.0,0.15,4.5,1200.0]"]);
        assert_eq!(std_cmd.get_current_dir(), Some(PathBuf::from("python").as_path()));
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_launch_error() {
        let scorer = ProcessScorer::new(ScorerEnvConfig {
            interpreter: "/nonexistent/bin/price-scorer-interpreter".to_string(),
            script: "predict.py".to_string(),
            working_dir: std::env::temp_dir(),
            timeout: None,
        });

        let err = scorer.score(&features()).await.unwrap_err();
        match err {
            ScoringError::Launch { program, .. } => {
                assert_eq!(program, "/nonexistent/bin/price-scorer-interpreter");
            }
            other => panic!("expected launch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_working_dir_is_launch_error() {
        let scorer = ProcessScorer::new(ScorerEnvConfig {
            interpreter: "sh".to_string(),
            script: "predict.sh".to_string(),
            working_dir: PathBuf::from("/nonexistent/scorer/workdir"),
            timeout: None,
        });

        let err = scorer.score(&features()).await.unwrap_err();
        assert!(matches!(err, ScoringError::Launch { .. }));
    }
}
