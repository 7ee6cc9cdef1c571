//! Job descriptor for a collection run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Who the ranking is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Role description, e.g. "Travel Planner"
    pub role: String,
}

/// What the persona needs to get done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobToBeDone {
    /// Task description
    pub task: String,
}

/// One input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// File name relative to the input directory
    pub filename: String,
    /// Optional human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Identifiers used to name the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeInfo {
    /// Challenge identifier
    pub challenge_id: String,
    /// Test case name
    pub test_case_name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Input of a collection run: persona, job and documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptor {
    /// Persona
    pub persona: Persona,
    /// Job to be done
    pub job_to_be_done: JobToBeDone,
    /// Documents to analyze, in order
    pub documents: Vec<DocumentRef>,
    /// Optional challenge identifiers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_info: Option<ChallengeInfo>,
}

impl JobDescriptor {
    /// Create a descriptor for the given documents.
    pub fn new(
        role: impl Into<String>,
        task: impl Into<String>,
        filenames: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            persona: Persona { role: role.into() },
            job_to_be_done: JobToBeDone { task: task.into() },
            documents: filenames
                .into_iter()
                .map(|f| DocumentRef {
                    filename: f.into(),
                    title: None,
                })
                .collect(),
            challenge_info: None,
        }
    }

    /// Parse and validate a descriptor from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let job: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidJob(e.to_string()))?;
        job.validate()?;
        Ok(job)
    }

    /// Read, parse and validate a descriptor file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::InvalidJob(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Check that persona, task and documents are present.
    pub fn validate(&self) -> Result<()> {
        if self.persona.role.trim().is_empty() {
            return Err(Error::InvalidJob("persona role is empty".into()));
        }
        if self.job_to_be_done.task.trim().is_empty() {
            return Err(Error::InvalidJob("job task is empty".into()));
        }
        if self.documents.is_empty() {
            return Err(Error::InvalidJob("no documents listed".into()));
        }
        if let Some(i) = self.documents.iter().position(|d| d.filename.trim().is_empty()) {
            return Err(Error::InvalidJob(format!("document {} has no filename", i)));
        }
        Ok(())
    }

    /// Persona role.
    pub fn persona(&self) -> &str {
        &self.persona.role
    }

    /// Job task.
    pub fn task(&self) -> &str {
        &self.job_to_be_done.task
    }

    /// File name of the collection report.
    pub fn output_file_name(&self) -> String {
        match &self.challenge_info {
            Some(info) => format!("{}_{}_output.json", info.challenge_id, info.test_case_name),
            None => "collection_output.json".to_string(),
        }
    }
}
