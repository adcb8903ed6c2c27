// SPDX-License-Identifier: MIT

//! Artifact packaging
//!
//! Assembles the canonical spec text and generated code artifacts into
//! a downloadable zip archive. Pure assembly: content is never
//! transformed, and an artifact present in memory is always written.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::ZipWriter;

use crate::codegen::{GeneratedCode, Language};
use crate::error::BundleError;
use crate::spec::SPEC_FILE_NAME;

/// Static container build file shipped with deployment scaffolding
pub const DOCKERFILE: &str = "\
FROM python:3.12-slim

WORKDIR /app
COPY . .
RUN pip install --no-cache-dir langgraph langchain-core

CMD [\"python\", \"implementation.py\"]
";

/// Static orchestration file shipped with deployment scaffolding
pub const DOCKER_COMPOSE: &str = "\
services:
  workflow:
    build: .
    restart: unless-stopped
";

/// Name of the produced archive
pub const ARCHIVE_FILE_NAME: &str = "workflow.zip";

/// A set of artifacts ready for packaging
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    /// Rendered canonical spec text
    pub spec: String,
    pub python: Option<GeneratedCode>,
    pub typescript: Option<GeneratedCode>,
    /// Include the static Dockerfile / docker-compose.yml pair
    pub deployment: bool,
}

impl Bundle {
    pub fn new(spec: impl Into<String>) -> Self {
        Self {
            spec: spec.into(),
            ..Self::default()
        }
    }

    /// Attach generated code for one language
    pub fn with_language(mut self, language: Language, code: GeneratedCode) -> Self {
        match language {
            Language::Python => self.python = Some(code),
            Language::TypeScript => self.typescript = Some(code),
        }
        self
    }

    /// Include the deployment scaffolding files
    pub fn with_deployment(mut self) -> Self {
        self.deployment = true;
        self
    }

    fn languages(&self) -> impl Iterator<Item = (Language, &GeneratedCode)> {
        [
            (Language::Python, self.python.as_ref()),
            (Language::TypeScript, self.typescript.as_ref()),
        ]
        .into_iter()
        .filter_map(|(language, code)| code.map(|c| (language, c)))
    }

    /// File names the archive will contain, in archive order
    pub fn file_names(&self) -> Vec<String> {
        let mut names = vec![SPEC_FILE_NAME.to_string()];
        for (language, _) in self.languages() {
            names.push(format!("stub.{}", language.extension()));
            names.push(format!("implementation.{}", language.extension()));
        }
        if self.deployment {
            names.push("Dockerfile".to_string());
            names.push("docker-compose.yml".to_string());
        }
        names
    }

    /// Write the archive into an in-memory byte buffer
    pub fn to_zip_bytes(&self) -> Result<Vec<u8>, BundleError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        writer.start_file(SPEC_FILE_NAME, options)?;
        writer.write_all(self.spec.as_bytes())?;

        for (language, code) in self.languages() {
            writer.start_file(format!("stub.{}", language.extension()), options)?;
            writer.write_all(code.stub.as_bytes())?;
            writer.start_file(format!("implementation.{}", language.extension()), options)?;
            writer.write_all(code.implementation.as_bytes())?;
        }

        if self.deployment {
            writer.start_file("Dockerfile", options)?;
            writer.write_all(DOCKERFILE.as_bytes())?;
            writer.start_file("docker-compose.yml", options)?;
            writer.write_all(DOCKER_COMPOSE.as_bytes())?;
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}
