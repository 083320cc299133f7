//! Line classification for preprocessed variant transcripts.
//!
//! The transcript grammar is line based. Each line is one of:
//!
//! * a variant separator (a row of slashes) directly followed by a keyword header,
//! * a `#line N` or `#line N "path"` directive,
//! * a `-- <stage> shader for <api>:` stage marker,
//! * anything else, which is plain content.
//!
//! Markers whose payload does not parse come out as [`LineKind::Inert`].

use serde::Deserialize;

pub const VARIANT_SEPARATOR: &str = "//////////////////////////////////////////////////////";
pub const GLOBAL_KEYWORDS_PREFIX: &str = "Global Keywords: ";
pub const LOCAL_KEYWORDS_PREFIX: &str = "Local Keywords: ";
pub const KEYWORDS_PREFIX: &str = "Keywords: ";
pub const LINE_DIRECTIVE_PREFIX: &str = "#line ";
pub const STAGE_MARKER_PREFIX: &str = "-- ";
pub const STAGE_MARKER_INFIX: &str = " shader for ";

/// Which keyword header flavor the toolchain emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranscriptDialect {
    /// `Global Keywords:` + `Local Keywords:` headers when set, a single `Keywords:` header otherwise
    pub local_keywords: bool,
}

impl Default for TranscriptDialect {
    fn default() -> Self {
        TranscriptDialect {
            local_keywords: true,
        }
    }
}

impl TranscriptDialect {
    fn global_prefix(&self) -> &'static str {
        if self.local_keywords {
            GLOBAL_KEYWORDS_PREFIX
        } else {
            KEYWORDS_PREFIX
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    VariantStart {
        global_keywords: &'a str,
        local_keywords: Option<&'a str>,
    },

    /// `#line N`: the line counter jumps, the file stays the same
    LineJump(i64),

    /// `#line N "path"`; an empty path stands for the shader's own source
    FileStart { line: i64, path: &'a str },

    /// `-- Vertex shader for "d3d11":`, carrying the trimmed stage label
    Stage(&'a str),

    /// Looked like a marker, but the payload didn't parse
    Inert,

    Content(&'a str),
}

pub struct TranscriptLexer<'a, S> {
    lines: &'a [S],
    pos: usize,
    dialect: TranscriptDialect,
}

impl<'a, S: AsRef<str>> TranscriptLexer<'a, S> {
    pub fn new(lines: &'a [S], dialect: TranscriptDialect) -> Self {
        TranscriptLexer {
            lines,
            pos: 0,
            dialect,
        }
    }

    fn line_at(&self, idx: usize) -> Option<&'a str> {
        self.lines.get(idx).map(<S as AsRef<str>>::as_ref)
    }

    fn classify(&self, idx: usize) -> LineKind<'a> {
        let line = match self.line_at(idx) {
            Some(line) => line,
            None => return LineKind::Inert,
        };

        if line == VARIANT_SEPARATOR {
            if let Some(kind) = self.variant_header(idx) {
                return kind;
            }
        }

        if let Some(directive) = line.strip_prefix(LINE_DIRECTIVE_PREFIX) {
            return classify_line_directive(directive);
        }

        if line.starts_with(STAGE_MARKER_PREFIX) && line.contains(STAGE_MARKER_INFIX) {
            let stage =
                line[STAGE_MARKER_PREFIX.len()..].trim_matches(|c: char| c == ':' || c == ' ');
            return LineKind::Stage(stage);
        }

        LineKind::Content(line)
    }

    fn variant_header(&self, separator_idx: usize) -> Option<LineKind<'a>> {
        let global_keywords = self
            .line_at(separator_idx + 1)?
            .strip_prefix(self.dialect.global_prefix())?
            .trim();

        let local_keywords = if self.dialect.local_keywords {
            let local = self
                .line_at(separator_idx + 2)
                .and_then(|line| line.strip_prefix(LOCAL_KEYWORDS_PREFIX));
            if local.is_none() {
                log::debug!(
                    "variant header at line {} has no local keyword line",
                    separator_idx + 1
                );
            }
            Some(local.unwrap_or_default().trim())
        } else {
            None
        };

        Some(LineKind::VariantStart {
            global_keywords,
            local_keywords,
        })
    }
}

impl<'a, S: AsRef<str>> Iterator for TranscriptLexer<'a, S> {
    type Item = (usize, LineKind<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.lines.len() {
            return None;
        }

        let idx = self.pos;
        self.pos += 1;
        Some((idx, self.classify(idx)))
    }
}

fn classify_line_directive(directive: &str) -> LineKind<'_> {
    match directive.find(' ') {
        Some(space) if space > 0 => match directive[..space].parse() {
            Ok(line) => LineKind::FileStart {
                line,
                path: directive[space..].trim().trim_matches('"'),
            },
            Err(_) => LineKind::Inert,
        },
        _ => match directive.trim().parse() {
            Ok(line) => LineKind::LineJump(line),
            Err(_) => LineKind::Inert,
        },
    }
}
