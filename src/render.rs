//! Rendering collaborators.
//!
//! The final binary encoding is not done here. A [`PdfRenderer`] turns the
//! combined styled markup into PDF bytes; a [`WordRenderer`] turns the
//! combined block list into DOCX bytes. [`CommandRenderer`] delegates either
//! job to an external program over stdin/stdout, e.g. `weasyprint - -`.
//! Word-processor writers receive the blocks as JSON (image bytes base64).

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, info};

use crate::blocks::DocumentBlock;
use crate::error::RenderError;

/// Renders styled markup to PDF bytes.
pub trait PdfRenderer {
    fn render_pdf(&self, markup: &str) -> Result<Vec<u8>, RenderError>;
}

/// Renders document blocks to word-processor bytes.
pub trait WordRenderer {
    fn render_docx(&self, blocks: &[DocumentBlock]) -> Result<Vec<u8>, RenderError>;
}

impl<R: PdfRenderer + ?Sized> PdfRenderer for &R {
    fn render_pdf(&self, markup: &str) -> Result<Vec<u8>, RenderError> {
        (**self).render_pdf(markup)
    }
}

impl<R: WordRenderer + ?Sized> WordRenderer for &R {
    fn render_docx(&self, blocks: &[DocumentBlock]) -> Result<Vec<u8>, RenderError> {
        (**self).render_docx(blocks)
    }
}

/// Stand-in for a format nobody configured a renderer for.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl PdfRenderer for Unconfigured {
    fn render_pdf(&self, _markup: &str) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::NotConfigured { format: "PDF" })
    }
}

impl WordRenderer for Unconfigured {
    fn render_docx(&self, _blocks: &[DocumentBlock]) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::NotConfigured { format: "DOCX" })
    }
}

/// External program that reads the document on stdin and writes the
/// rendered bytes to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    #[must_use]
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a whitespace-separated command line. `None` when blank.
    ///
    /// ```
    /// use webpage_binder::render::CommandRenderer;
    ///
    /// assert_eq!(
    ///     CommandRenderer::parse("weasyprint - -"),
    ///     Some(CommandRenderer::weasyprint())
    /// );
    /// assert!(CommandRenderer::parse("   ").is_none());
    /// ```
    #[must_use]
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }

    /// `weasyprint - -`: HTML on stdin, PDF on stdout.
    #[must_use]
    pub fn weasyprint() -> Self {
        Self::new("weasyprint", ["-", "-"])
    }

    fn name(&self) -> String {
        self.program.clone()
    }

    /// Run the program with `input` on stdin and collect stdout.
    fn run(&self, input: Vec<u8>) -> Result<Vec<u8>, RenderError> {
        let io_error = |source| RenderError::Io {
            renderer: self.name(),
            source,
        };

        info!("rendering with {} ({} input bytes)", self.program, input.len());
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(io_error)?;

        // stdin is written concurrently with draining stdout.
        let writer = child
            .stdin
            .take()
            .map(|mut stdin| thread::spawn(move || stdin.write_all(&input)));

        let output = child.wait_with_output().map_err(io_error)?;
        let written = match writer.map(thread::JoinHandle::join) {
            None | Some(Ok(Ok(()))) => Ok(()),
            Some(Ok(Err(source))) => Err(io_error(source)),
            Some(Err(_)) => Err(RenderError::Failed {
                renderer: self.name(),
                reason: "stdin writer panicked".to_string(),
            }),
        };
        let status = output.status;
        let stdout = output.stdout;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !status.success() {
            let detail = stderr.trim();
            return Err(RenderError::Failed {
                renderer: self.name(),
                reason: if detail.is_empty() {
                    format!("exited with {status}")
                } else {
                    format!("exited with {status}: {detail}")
                },
            });
        }
        if stdout.is_empty() {
            return Err(RenderError::Failed {
                renderer: self.name(),
                reason: "produced no output".to_string(),
            });
        }
        // Exited cleanly without reading all input: the output is truncated.
        written?;

        debug!("{} produced {} bytes", self.program, stdout.len());
        Ok(stdout)
    }
}

impl PdfRenderer for CommandRenderer {
    fn render_pdf(&self, markup: &str) -> Result<Vec<u8>, RenderError> {
        self.run(markup.as_bytes().to_vec())
    }
}

impl WordRenderer for CommandRenderer {
    fn render_docx(&self, blocks: &[DocumentBlock]) -> Result<Vec<u8>, RenderError> {
        let json = serde_json::to_vec(blocks).map_err(|e| RenderError::Failed {
            renderer: self.name(),
            reason: e.to_string(),
        })?;
        self.run(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_reports_format() {
        let err = Unconfigured.render_docx(&[]);
        assert!(matches!(err, Err(RenderError::NotConfigured { format: "DOCX" })));
        let err = Unconfigured.render_pdf("<p>x</p>");
        assert!(matches!(err, Err(RenderError::NotConfigured { format: "PDF" })));
    }

    #[test]
    fn test_parse_command_line() {
        let renderer = CommandRenderer::parse("  pandoc -f json  -o - ");
        assert_eq!(renderer, Some(CommandRenderer::new("pandoc", ["-f", "json", "-o", "-"])));
    }

    #[test]
    fn test_missing_program_is_io_error() {
        let renderer = CommandRenderer::new("definitely-not-a-renderer-binary", Vec::<String>::new());
        assert!(matches!(renderer.render_pdf("<p>x</p>"), Err(RenderError::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_markup_piped_through_program() {
        let renderer = CommandRenderer::new("cat", Vec::<String>::new());
        let bytes = renderer.render_pdf("<p>hello</p>");
        assert_eq!(bytes.ok(), Some(b"<p>hello</p>".to_vec()));
    }

    #[cfg(unix)]
    #[test]
    fn test_blocks_piped_as_json() {
        let renderer = CommandRenderer::new("cat", Vec::<String>::new());
        let bytes = renderer.render_docx(&[DocumentBlock::paragraph("x")]);
        assert_eq!(bytes.ok(), Some(br#"[{"type":"paragraph","text":"x"}]"#.to_vec()));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_render_error() {
        let renderer = CommandRenderer::new("false", Vec::<String>::new());
        assert!(matches!(renderer.render_pdf("x"), Err(RenderError::Failed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_unread_input_is_io_error() {
        let renderer = CommandRenderer::new("echo", ["done"]);
        let markup = "<p>x</p>".repeat(200_000);
        assert!(matches!(renderer.render_pdf(&markup), Err(RenderError::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_output_is_render_error() {
        let renderer = CommandRenderer::new("true", Vec::<String>::new());
        assert!(matches!(renderer.render_pdf("x"), Err(RenderError::Failed { .. })));
    }
}
