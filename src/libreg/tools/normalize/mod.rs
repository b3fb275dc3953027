//! Unicode to plain ASCII conversion.
//!
//! Every line goes through three steps in a fixed order: typographic symbols
//! are replaced through [`SUBSTITUTIONS`], the remaining text is decomposed
//! (NFKD) with combining marks dropped, and whatever is still outside the
//! 7-bit range is deleted. Line terminators are ASCII and therefore pass
//! through untouched.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, instrument};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::libreg::tools::error::{Result, ToolError};

/// Symbols without a useful decomposition and their ASCII spelling.
pub const SUBSTITUTIONS: &[(char, &str)] = &[
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2012}', "-"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{201E}', "\""),
    ('\u{00AB}', "\""),
    ('\u{00BB}', "\""),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201A}', "'"),
    ('\u{00B4}', "'"),
    ('\u{2026}', "..."),
    ('\u{2022}', "-"),
    ('\u{00B7}', "-"),
    ('\u{2116}', "No."),
    ('\u{00A7}', "S"),
    ('\u{00D7}', "x"),
    ('\u{00F7}', "/"),
    ('\u{00A0}', " "),
];

/// Line and change counters collected while converting a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub lines: usize,
    pub changed_lines: usize,
}

/// Looks up the ASCII replacement for a single character.
pub fn replacement(c: char) -> Option<&'static str> {
    SUBSTITUTIONS
        .iter()
        .find(|(symbol, _)| *symbol == c)
        .map(|(_, ascii)| *ascii)
}

/// Replaces every mapped symbol in one pass. Inserted text is never
/// rescanned.
pub fn substitute_symbols(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| replacement(c).is_some()) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match replacement(c) {
            Some(ascii) => out.push_str(ascii),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Decomposes `text` (NFKD) and drops combining marks, so `č` becomes `c`.
pub fn strip_diacritics(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Deletes every character outside the 7-bit ASCII range.
pub fn retain_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// Runs the full conversion on a piece of text.
///
/// ```rust
/// # use libreg_tools::normalize::to_ascii;
/// assert_eq!(to_ascii("café – \u{201C}nice\u{201D}"), "cafe - \"nice\"");
/// assert_eq!(to_ascii("100 \u{00D7} 2"), "100 x 2");
/// ```
pub fn to_ascii(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }

    let substituted = substitute_symbols(text);
    let stripped = strip_diacritics(&substituted);
    Cow::Owned(retain_ascii(&stripped))
}

/// Converts `reader` line by line into `writer`.
///
/// Lines end after `\n`; the terminator bytes are copied verbatim. A line
/// that is not valid UTF-8 aborts the conversion with
/// [`ToolError::Encoding`].
pub fn normalize_stream<R, W>(mut reader: R, mut writer: W) -> Result<NormalizeStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = NormalizeStats::default();
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        stats.lines += 1;

        let line = String::from_utf8(std::mem::take(&mut buffer)).map_err(|source| {
            ToolError::Encoding {
                line: stats.lines,
                source,
            }
        })?;

        let converted = to_ascii(&line);
        if converted != line.as_str() {
            stats.changed_lines += 1;
        }
        writer.write_all(converted.as_bytes())?;
    }

    writer.flush()?;
    Ok(stats)
}

/// Converts the file at `input` into `output`. The output is created (or
/// truncated) before the input is read.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn normalize_file(input: &Path, output: &Path) -> Result<NormalizeStats> {
    let writer = BufWriter::new(File::create(output)?);
    let reader = BufReader::new(File::open(input)?);
    debug!("streams opened");

    let stats = normalize_stream(reader, writer)?;
    info!(
        lines = stats.lines,
        changed_lines = stats.changed_lines,
        "conversion finished"
    );
    Ok(stats)
}
