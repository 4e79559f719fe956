//! Converter backed by an external ImageMagick-compatible program.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{ResizeError, Result};

use super::traits::{Converter, ConverterInfo};

/// Runs `<program> <input> -resize <spec> <output>` once per file.
#[derive(Debug, Clone)]
pub struct ExternalConverter {
    program: OsString,
}

impl ExternalConverter {
    /// Create a converter that invokes `program`.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program this converter runs.
    pub fn program(&self) -> &std::ffi::OsStr {
        &self.program
    }

    fn command(&self, input: &Path, spec: &str, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(input)
            .arg("-resize")
            .arg(spec)
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        command
    }
}

impl Converter for ExternalConverter {
    fn resize(&self, input: &Path, spec: &str, output: &Path) -> Result<()> {
        log::debug!(
            "Running {} {} -resize {} {}",
            self.program.to_string_lossy(),
            input.display(),
            spec,
            output.display()
        );

        let out = match self.command(input, spec, output).output() {
            Ok(out) => out,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ResizeError::ConverterNotFound(
                    self.program.to_string_lossy().into_owned(),
                ));
            }
            Err(err) => return Err(err.into()),
        };

        let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();

        if !out.status.success() {
            return Err(ResizeError::ConversionFailed {
                input: input.to_path_buf(),
                code: out.status.code(),
                stderr,
            });
        }

        if !stderr.is_empty() {
            log::warn!("{}: {}", input.display(), stderr);
        }

        Ok(())
    }

    fn info(&self) -> ConverterInfo {
        ConverterInfo {
            name: "ImageMagick".to_string(),
            program: self.program.to_string_lossy().into_owned(),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Writes an executable stand-in for `convert` that records its
    /// arguments into the output file, or fails for inputs named `*bad*`.
    fn fake_convert(dir: &Path) -> PathBuf {
        let script = dir.join("fake-convert");
        fs::write(
            &script,
            "#!/bin/sh\n\
             case \"$(basename \"$1\")\" in *bad*) echo \"cannot read $1\" >&2; exit 7;; esac\n\
             printf '%s %s %s' \"$1\" \"$2\" \"$3\" > \"$4\"\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    /// `ETXTBSY` ("text file busy") on Linux.
    const ETXTBSY: i32 = 26;

    /// Retries while the freshly written script is still open for writing
    /// in a child forked by a concurrently running test.
    fn resize(
        converter: &ExternalConverter,
        input: &Path,
        spec: &str,
        output: &Path,
    ) -> Result<()> {
        for _ in 0..50 {
            match converter.resize(input, spec, output) {
                Err(ResizeError::Io(err)) if err.raw_os_error() == Some(ETXTBSY) => {
                    std::thread::sleep(std::time::Duration::from_millis(10));
                }
                other => return other,
            }
        }
        converter.resize(input, spec, output)
    }

    #[test]
    fn test_external_converter_argument_order() {
        let dir = TempDir::new().unwrap();
        let converter = ExternalConverter::new(fake_convert(dir.path()));

        let input = dir.path().join("a.jpg");
        let output = dir.path().join("a_resized.jpg");
        fs::write(&input, "pixels").unwrap();

        resize(&converter, &input, "800x", &output).unwrap();

        let recorded = fs::read_to_string(&output).unwrap();
        assert_eq!(recorded, format!("{} -resize 800x", input.display()));
    }

    #[test]
    fn test_external_converter_failure() {
        let dir = TempDir::new().unwrap();
        let converter = ExternalConverter::new(fake_convert(dir.path()));

        let input = dir.path().join("bad.jpg");
        let output = dir.path().join("bad_resized.jpg");

        let err = resize(&converter, &input, "x600", &output).unwrap_err();
        match err {
            ResizeError::ConversionFailed { code, stderr, .. } => {
                assert_eq!(code, Some(7));
                assert!(stderr.contains("cannot read"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_external_converter_missing_program() {
        let dir = TempDir::new().unwrap();
        let converter = ExternalConverter::new(dir.path().join("no-such-convert"));

        let err = converter
            .resize(Path::new("a.jpg"), "10x", Path::new("a_resized.jpg"))
            .unwrap_err();
        assert!(matches!(err, ResizeError::ConverterNotFound(_)));
    }

    #[test]
    fn test_external_converter_info() {
        let converter = ExternalConverter::new("convert");
        assert_eq!(converter.info().program, "convert");
        assert_eq!(converter.program(), "convert");
    }
}
