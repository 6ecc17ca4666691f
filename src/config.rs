use std::path::{Path, PathBuf};

use crate::cli::LogsArgs;
use crate::errors::{AppError, AppResult};

pub const DEFAULT_NAMESPACE: &str = "default";

/// Settings for one `logs` invocation, built once from the parsed flags.
#[derive(Clone, Debug)]
pub struct LogsConfig {
    pub namespace: String,
    pub directory: Option<PathBuf>,
    pub verbose: bool,
    pub concurrency: usize,
    pub fail_fast: bool,
    pub kubeconfig: Option<PathBuf>,
}

impl LogsConfig {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            directory: None,
            verbose: false,
            concurrency: 1,
            fail_fast: false,
            kubeconfig: None,
        }
    }

    pub fn from_args(args: LogsArgs, verbose: bool, kubeconfig: Option<PathBuf>) -> Self {
        let namespace = if args.namespace.trim().is_empty() {
            DEFAULT_NAMESPACE.to_string()
        } else {
            args.namespace
        };

        Self {
            directory: args.directory,
            verbose,
            concurrency: usize::from(args.concurrency).max(1),
            fail_fast: args.fail_fast,
            kubeconfig,
            ..Self::new(namespace)
        }
    }

    /// Explicit directory, or `./logs/<namespace>`.
    pub fn output_dir(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.clone(),
            None => default_output_dir(&self.namespace),
        }
    }
}

pub fn default_output_dir(namespace: &str) -> PathBuf {
    Path::new(".").join("logs").join(namespace)
}

/// Path of the kubeconfig file: the explicit one, or `~/.kube/config`.
pub fn kubeconfig_path(explicit: Option<&Path>) -> AppResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let home = std::env::home_dir()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| {
            AppError::ConfigResolution("could not determine the user home directory".to_string())
        })?;

    Ok(home.join(".kube").join("config"))
}
