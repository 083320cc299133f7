use std::collections::HashSet;

use crate::index::sorted_key_for;
use crate::lexer::{LineKind, TranscriptDialect, TranscriptLexer};
use crate::path_normalizer::PathNormalizer;
use crate::variant::{FileSection, Variant};

pub const DETAILS_SECTION: &str = "Details";

enum BuildState {
    NoVariant,
    InVariant(Variant),
    InSection(Variant, FileSection),
}

/// Assembles variants from classified transcript lines in a single forward pass.
pub struct VariantBuilder<'n> {
    source_shader_path: String,
    normalizer: &'n PathNormalizer,
    state: BuildState,
    line_counter: i64,
    variants: Vec<Variant>,
}

impl<'n> VariantBuilder<'n> {
    pub fn new(source_shader_path: &str, normalizer: &'n PathNormalizer) -> Self {
        VariantBuilder {
            source_shader_path: source_shader_path.to_string(),
            normalizer,
            state: BuildState::NoVariant,
            line_counter: 0,
            variants: Vec::new(),
        }
    }

    pub fn parse<S: AsRef<str>>(
        mut self,
        lines: &[S],
        dialect: TranscriptDialect,
    ) -> Vec<Variant> {
        for (idx, kind) in TranscriptLexer::new(lines, dialect) {
            if let LineKind::Inert = kind {
                log::debug!("line {}: malformed marker ignored", idx + 1);
            }
            self.feed(kind);
        }

        let variants = self.finish();
        log::info!(
            "parsed {} transcript lines into {} variants",
            lines.len(),
            variants.len()
        );
        variants
    }

    pub fn feed(&mut self, kind: LineKind<'_>) {
        let state = std::mem::replace(&mut self.state, BuildState::NoVariant);

        self.state = match (state, kind) {
            (
                state,
                LineKind::VariantStart {
                    global_keywords,
                    local_keywords,
                },
            ) => {
                self.close_variant(state);
                self.line_counter = 0;

                BuildState::InVariant(Variant {
                    global_keywords: global_keywords.to_string(),
                    local_keywords: local_keywords.map(str::to_string),
                    sections: Vec::new(),
                })
            }

            // Nothing to attach to before the first variant
            (BuildState::NoVariant, _) => BuildState::NoVariant,

            (state, LineKind::FileStart { line, path }) => {
                let variant = into_variant(state);
                let path = if path.is_empty() {
                    self.source_shader_path.as_str()
                } else {
                    path
                };

                self.line_counter = line;
                let section = FileSection::new(path.to_string(), self.normalizer.normalize(path));
                BuildState::InSection(variant, section)
            }

            (state, LineKind::LineJump(line)) => {
                self.line_counter = line;
                state
            }

            (state, LineKind::Stage(stage)) => {
                let variant = into_variant(state);
                let mut section =
                    FileSection::new(self.source_shader_path.clone(), stage.to_string());
                section.push_line(stage.to_string(), 0);
                BuildState::InSection(variant, section)
            }

            // Header lines ahead of the first file marker
            (BuildState::InVariant(variant), LineKind::Content(content)) => {
                let mut details =
                    FileSection::new(DETAILS_SECTION.to_string(), DETAILS_SECTION.to_string());
                details.push_line(content.to_string(), self.line_counter);
                self.line_counter = self.line_counter.saturating_add(1);
                BuildState::InSection(variant, details)
            }

            (BuildState::InSection(variant, mut section), LineKind::Content(content)) => {
                section.push_line(content.to_string(), self.line_counter);
                self.line_counter = self.line_counter.saturating_add(1);
                BuildState::InSection(variant, section)
            }

            (state, LineKind::Inert) => state,
        };
    }

    /// Close any open variant, and return all variants in canonical order.
    ///
    /// Variants repeating an already seen keyword combination are dropped.
    pub fn finish(mut self) -> Vec<Variant> {
        let state = std::mem::replace(&mut self.state, BuildState::NoVariant);
        self.close_variant(state);

        let mut variants = self.variants;
        variants.sort_by(|a, b| {
            (&a.global_keywords, &a.local_keywords).cmp(&(&b.global_keywords, &b.local_keywords))
        });

        let mut seen = HashSet::new();
        variants.retain(|variant| {
            let key = (
                sorted_key_for(&variant.global_keywords),
                variant.local_keywords.as_deref().map(sorted_key_for),
            );
            let is_new = seen.insert(key);
            if !is_new {
                log::debug!(
                    "dropping repeated variant for keywords {:?} / {:?}",
                    variant.global_keywords,
                    variant.local_keywords
                );
            }
            is_new
        });

        variants
    }

    fn close_variant(&mut self, state: BuildState) {
        if let BuildState::NoVariant = state {
            return;
        }
        self.variants.push(into_variant(state));
    }
}

/// Drop back to the variant, committing the open section if it received any lines.
fn into_variant(state: BuildState) -> Variant {
    match state {
        BuildState::NoVariant => Variant::default(),
        BuildState::InVariant(variant) => variant,
        BuildState::InSection(mut variant, section) => {
            if !section.lines.is_empty() {
                variant.sections.push(section);
            }
            variant
        }
    }
}
