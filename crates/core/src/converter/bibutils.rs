//! bibutils-based conversion engine.
//!
//! bibutils converts everything through MODS XML: a `<format>2xml` reader
//! turns the input into MODS, and an `xml2<format>` writer turns MODS into the
//! target format. Both run as child processes connected through memory
//! buffers; the whole pipeline is bounded by a single timeout.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::EngineConfig;
use super::error::ConversionError;
use super::traits::ConversionEngine;
use crate::catalog::FormatId;

/// Format id of the MODS hub format.
pub const MODS: &str = "mods";

/// bibutils command-line engine.
pub struct BibutilsEngine {
    config: EngineConfig,
}

impl BibutilsEngine {
    /// Creates a new bibutils engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Creates an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Tool that reads `format` into MODS, `None` when the input already is MODS.
    fn reader_tool(format: &str) -> Result<Option<&'static str>, ConversionError> {
        let tool = match format {
            MODS => return Ok(None),
            "ris" => "ris2xml",
            "bibtex" => "bib2xml",
            "biblatex" => "biblatex2xml",
            "end" => "end2xml",
            "endx" => "endx2xml",
            "med" => "med2xml",
            "nbib" => "nbib2xml",
            "isi" => "isi2xml",
            "wordbib" => "wordbib2xml",
            "ebi" => "ebi2xml",
            "copac" => "copac2xml",
            other => {
                return Err(ConversionError::engine_failure(
                    format!("bibutils cannot read format {}", other),
                    None,
                ))
            }
        };
        Ok(Some(tool))
    }

    /// Tool that writes MODS as `format`, `None` when the output is MODS.
    fn writer_tool(format: &str) -> Result<Option<&'static str>, ConversionError> {
        let tool = match format {
            MODS => return Ok(None),
            "ris" => "xml2ris",
            "bibtex" => "xml2bib",
            "end" => "xml2end",
            "nbib" => "xml2nbib",
            "isi" => "xml2isi",
            "wordbib" => "xml2wordbib",
            "ads" => "xml2ads",
            other => {
                return Err(ConversionError::engine_failure(
                    format!("bibutils cannot write format {}", other),
                    None,
                ))
            }
        };
        Ok(Some(tool))
    }

    /// Runs one tool with `input` on stdin and returns its stdout.
    async fn run_tool(
        &self,
        tool: &str,
        args: &[String],
        input: Vec<u8>,
    ) -> Result<Vec<u8>, ConversionError> {
        let program = self.config.program(tool);
        debug!("Running {} ({} bytes of input)", program.display(), input.len());

        let mut child = Command::new(&program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(&program, e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ConversionError::engine_failure("stdin was not captured", None))?;

        let feed = async move {
            // The tool may exit before reading everything; a broken pipe then
            // surfaces through its exit status instead.
            let _ = stdin.write_all(&input).await;
            drop(stdin);
        };

        let (_, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(ConversionError::engine_failure(
                format!("{} exited with code: {:?}", tool, output.status.code()),
                (!stderr.is_empty()).then_some(stderr),
            ));
        }
        if !stderr.is_empty() {
            debug!("{} stderr: {}", tool, stderr);
        }

        Ok(output.stdout)
    }

    async fn run_pipeline(
        &self,
        from: &FormatId,
        to: &FormatId,
        input: &str,
    ) -> Result<String, ConversionError> {
        let reader = Self::reader_tool(from.as_str())?;
        let writer = Self::writer_tool(to.as_str())?;

        let mods = match reader {
            Some(tool) => {
                self.run_tool(tool, &self.config.reader_args, input.as_bytes().to_vec())
                    .await?
            }
            None => input.as_bytes().to_vec(),
        };

        if !contains_mods_record(&mods) {
            return Err(ConversionError::malformed_input(format!(
                "no {} records could be read from the input",
                from
            )));
        }

        let output = match writer {
            Some(tool) => self.run_tool(tool, &self.config.writer_args, mods).await?,
            None => mods,
        };

        let output = String::from_utf8(output).map_err(|_| {
            ConversionError::engine_failure("bibutils produced non UTF-8 output", None)
        })?;

        if output.trim().is_empty() {
            return Err(ConversionError::malformed_input(format!(
                "no {} records could be produced from the input",
                to
            )));
        }

        Ok(output)
    }
}

/// Whether MODS XML holds at least one `<mods>` record.
fn contains_mods_record(xml: &[u8]) -> bool {
    let xml = String::from_utf8_lossy(xml);
    xml.contains("<mods>") || xml.contains("<mods ")
}

fn spawn_error(program: &Path, err: std::io::Error) -> ConversionError {
    if err.kind() == std::io::ErrorKind::NotFound {
        ConversionError::engine_failure(
            format!("bibutils tool not found: {}", program.display()),
            None,
        )
    } else {
        ConversionError::from(err)
    }
}

#[async_trait]
impl ConversionEngine for BibutilsEngine {
    fn name(&self) -> &str {
        "bibutils"
    }

    async fn convert(
        &self,
        from: &FormatId,
        to: &FormatId,
        input: &str,
    ) -> Result<String, ConversionError> {
        let limit = Duration::from_secs(self.config.timeout_secs);
        match timeout(limit, self.run_pipeline(from, to, input)).await {
            Ok(result) => result,
            // Dropping the pipeline future kills any running tool.
            Err(_) => Err(ConversionError::engine_failure(
                format!(
                    "conversion timed out after {} seconds",
                    self.config.timeout_secs
                ),
                None,
            )),
        }
    }

    async fn validate(&self) -> Result<(), ConversionError> {
        for tool in ["ris2xml", "xml2ris"] {
            let program = self.config.program(tool);
            Command::new(&program)
                .arg("--version")
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
                .map_err(|e| spawn_error(&program, e))?;
        }
        Ok(())
    }
}
