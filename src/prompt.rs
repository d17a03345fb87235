//! Interactive collection of the generation request.

use std::io::{self, BufRead, Write};

use crate::cli::Cli;
use crate::config::DefaultsConfig;
use crate::error::GenError;
use crate::request::{
    normalize_extension, validate_template, FileKind, GenerationRequest, ImageDimensions,
};
use crate::size::parse_size;

/// Line-based question/answer over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter. When `interactive` is false every question resolves
    /// to its default, and questions without one fail.
    #[must_use]
    pub fn new(input: R, output: W, interactive: bool) -> Self {
        Self { input, output, interactive }
    }

    /// Ask once. An empty answer means `default`.
    ///
    /// # Errors
    ///
    /// Returns an error if input is closed, or if prompting is disabled and
    /// there is no default.
    pub fn ask(&mut self, label: &str, default: Option<&str>) -> Result<String, GenError> {
        if !self.interactive {
            return default.map(str::to_string).ok_or_else(|| {
                GenError::InvalidArgument(format!("{label} is required when --no-input is set"))
            });
        }

        match default {
            Some(d) => write!(self.output, "{label} [{d}]: ")?,
            None => write!(self.output, "{label}: ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GenError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("input closed while asking for {label}"),
            )));
        }

        let answer = line.trim();
        Ok(match (answer.is_empty(), default) {
            (true, Some(d)) => d.to_string(),
            _ => answer.to_string(),
        })
    }

    /// Ask until `parse` accepts the answer.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Prompter::ask`]. In non-interactive mode a
    /// default that fails to parse is returned as an error instead of looping.
    pub fn ask_with<T>(
        &mut self,
        label: &str,
        default: Option<&str>,
        parse: impl Fn(&str) -> Result<T, GenError>,
    ) -> Result<T, GenError> {
        loop {
            let answer = self.ask(label, default)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) if !self.interactive => return Err(e),
                Err(e) => writeln!(self.output, "  {e}")?,
            }
        }
    }
}

/// Build a request from flags, asking for whatever is missing.
///
/// Order: extension, size, filename template, count, then width and height
/// for image extensions only.
///
/// # Errors
///
/// Returns an error if a required answer cannot be obtained.
pub fn collect_request<R: BufRead, W: Write>(
    cli: &Cli,
    defaults: &DefaultsConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<GenerationRequest, GenError> {
    let extension = match &cli.ext {
        Some(ext) => ext.clone(),
        None => {
            prompter.ask_with("File extension (e.g. txt, png, xlsx)", None, normalize_extension)?
        }
    };
    let kind = FileKind::from_extension(&extension);

    let size_bytes = match cli.size {
        Some(size) => size,
        None => {
            // Images ignore the size, so they get a default instead of a hard stop.
            let default = kind.is_image().then_some("0");
            prompter.ask_with("Target size (e.g. 100, 512KB, 10MB)", default, parse_size)?
        }
    };

    let filename_template = match &cli.name {
        Some(name) => name.clone(),
        None => prompter.ask_with(
            "Filename ({n} = file number)",
            Some(defaults.filename.as_str()),
            validate_template,
        )?,
    };

    let count = match cli.count {
        Some(count) => count,
        None => {
            let default = defaults.count.to_string();
            prompter.ask_with("Number of files", Some(default.as_str()), |s| {
                parse_positive("Number of files", s)
            })?
        }
    };

    let image_dimensions = if kind.is_image() {
        let width = match cli.width {
            Some(w) => w,
            None => {
                let default = defaults.width.to_string();
                prompter.ask_with("Width (px)", Some(default.as_str()), |s| parse_positive("Width", s))?
            }
        };
        let height = match cli.height {
            Some(h) => h,
            None => {
                let default = defaults.height.to_string();
                prompter
                    .ask_with("Height (px)", Some(default.as_str()), |s| parse_positive("Height", s))?
            }
        };
        Some(ImageDimensions { width, height })
    } else {
        None
    };

    let request =
        GenerationRequest { extension, size_bytes, filename_template, count, image_dimensions };
    log::debug!("Request: {request:?}");
    Ok(request)
}

fn parse_positive(what: &str, input: &str) -> Result<u32, GenError> {
    match input.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(GenError::InvalidArgument(format!(
            "{what} must be a whole number of at least 1, got '{}'",
            input.trim()
        ))),
    }
}
