//! MeCab-backed tokenizer.
//!
//! Runs the `mecab` executable with its default output format, one line per
//! morpheme and an `EOS` line closing each input line:
//!
//! ```text
//! 猫	名詞,一般,*,*,*,*,猫,ネコ,ネコ
//! が	助詞,格助詞,一般,*,*,*,が,ガ,ガ
//! EOS
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use super::{Morpheme, Tokenizer};
use crate::error::{Error, Result};

const EOS: &str = "EOS";

/// Tokenizer that shells out to MeCab.
#[derive(Debug, Clone)]
pub struct MecabTokenizer {
    program: OsString,
    args: Vec<OsString>,
}

impl Default for MecabTokenizer {
    fn default() -> Self {
        Self {
            program: OsString::from("mecab"),
            args: Vec::new(),
        }
    }
}

impl MecabTokenizer {
    /// Use `mecab` from `PATH` with its default dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific executable.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a specific system dictionary directory (`-d`).
    pub fn with_dictionary(mut self, dir: impl AsRef<Path>) -> Self {
        self.args.push(OsString::from("-d"));
        self.args.push(dir.as_ref().as_os_str().to_owned());
        self
    }

    fn run(&self, input: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Tokenizer(format!("cannot start {:?}: {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Tokenizer("stdin not captured".into()))?;
        // Feed from another thread so a full stdout pipe cannot stall the write.
        let input = input.to_owned();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        let written = writer.join();
        if !output.status.success() {
            return Err(Error::Tokenizer(format!(
                "{:?} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        written.map_err(|_| Error::Tokenizer("stdin writer panicked".into()))??;
        String::from_utf8(output.stdout)
            .map_err(|e| Error::Tokenizer(format!("non-UTF-8 output: {e}")))
    }
}

/// Split MeCab output into one morpheme list per `EOS`-terminated sentence.
pub(crate) fn parse_output(output: &str) -> Result<Vec<Vec<Morpheme>>> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();
    for (idx, line) in output.lines().enumerate() {
        if line == EOS {
            sentences.push(std::mem::take(&mut current));
            continue;
        }
        if line.is_empty() {
            continue;
        }
        let (surface, features) = line.split_once('\t').ok_or_else(|| Error::Parse {
            line: idx + 1,
            message: format!("expected 'surface<TAB>features', got '{line}'"),
        })?;
        current.push(Morpheme::new(surface, features));
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    Ok(sentences)
}

impl Tokenizer for MecabTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>> {
        let mut batch = self.tokenize_batch(&[text])?;
        Ok(batch.pop().unwrap_or_default())
    }

    fn tokenize_batch(&self, texts: &[&str]) -> Result<Vec<Vec<Morpheme>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if texts.iter().any(|t| t.contains('\n')) {
            return Err(Error::InvalidParameter {
                name: "texts",
                message: "texts passed to MeCab must be single lines",
            });
        }
        let mut input = texts.join("\n");
        input.push('\n');

        let sentences = parse_output(&self.run(&input)?)?;
        if sentences.len() != texts.len() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} sentences", texts.len()),
                actual: format!("{} sentences", sentences.len()),
            });
        }
        Ok(sentences)
    }
}
