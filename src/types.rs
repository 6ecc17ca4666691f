use std::path::PathBuf;

use crate::errors::AppError;

/// A pod as returned by a single listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodRef {
    pub namespace: String,
    pub name: String,
}

impl PodRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.log", self.name)
    }
}

/// Fully buffered log content of one pod.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogPayload {
    pub bytes: Vec<u8>,
}

impl From<Vec<u8>> for LogPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub directory: PathBuf,
    pub file: PathBuf,
}

#[derive(Debug)]
pub struct PodOutcome {
    pub pod: PodRef,
    pub result: Result<OutputTarget, AppError>,
}

impl PodOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-pod outcomes of one run, in listing order.
#[derive(Debug)]
pub struct RunReport {
    pub namespace: String,
    pub directory: PathBuf,
    pub outcomes: Vec<PodOutcome>,
}

impl RunReport {
    pub fn written(&self) -> impl Iterator<Item = &OutputTarget> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&PodRef, &AppError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.pod, e)))
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}
