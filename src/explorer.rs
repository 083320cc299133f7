//! Session state for browsing the variants of one shader.
//!
//! `ShaderExplorer` owns the parsed variants, the keyword selections and the row the user
//! is looking at. The displayed lines are derived from the selection on demand, and the
//! selected row is remembered by its provenance, so it stays put across keyword and
//! collapse changes whenever the new view contains the same place.

use crate::diagnostics::{collect_errors, DiagnosticMessage};
use crate::gateway::{CompileRequest, CompileResult, ShaderCompilerGateway};
use crate::index::{project, VariantIndex};
use crate::keywords::KeywordSelection;
use crate::lexer::TranscriptDialect;
use crate::path_normalizer::{PathNormalizer, RootPaths};
use crate::provenance::{locate, resolve, Provenance};
use crate::variant::{LineSection, Variant};
use crate::ExplorerError;

/// Valid global keywords the toolchain leaves out of its keyword list.
pub const SYNTHETIC_GLOBAL_KEYWORDS: [&str; 2] = ["STEREO_INSTANCING_ON", "INSTANCING_ON"];

pub struct ShaderExplorer {
    normalizer: PathNormalizer,
    dialect: TranscriptDialect,
    global: KeywordSelection,
    local: Option<KeywordSelection>,
    index: VariantIndex,
    diagnostics: Vec<DiagnosticMessage>,
    transcript_path: Option<String>,
    collapsed: bool,
    selected: Option<Provenance>,
}

impl ShaderExplorer {
    pub fn new(roots: &RootPaths, dialect: TranscriptDialect) -> Self {
        ShaderExplorer {
            normalizer: PathNormalizer::new(roots),
            dialect,
            global: KeywordSelection::new(),
            local: if dialect.local_keywords {
                Some(KeywordSelection::new())
            } else {
                None
            },
            index: VariantIndex::default(),
            diagnostics: Vec::new(),
            transcript_path: None,
            collapsed: false,
            selected: None,
        }
    }

    /// Fetch everything the toolchain knows about `shader`, and parse its variants.
    ///
    /// The keyword selection is kept if it still matches a variant; otherwise the first
    /// variant is selected. A shader without preprocessed output ends up with no variants.
    pub fn load_shader<G: ShaderCompilerGateway>(
        &mut self,
        gateway: &mut G,
        shader: &G::Shader,
    ) -> Result<(), ExplorerError> {
        let source_path = gateway.source_path(shader);
        let gateway_error = |cause| ExplorerError::Gateway {
            shader: source_path.clone(),
            cause,
        };

        let messages = gateway.messages(shader).map_err(gateway_error)?;
        let details = gateway.shader_details(shader).map_err(gateway_error)?;
        let transcript = gateway.open_preprocessed(shader).map_err(gateway_error)?;

        self.diagnostics = collect_errors(&messages);
        self.set_available_keywords(&details.global_keywords, &details.local_keywords);

        match transcript {
            Some(transcript) => {
                self.load_transcript(&transcript.text, &source_path);
                log::info!(
                    "{}: toolchain reports {} variants, transcript has {}",
                    source_path,
                    details.variant_count,
                    self.index.len()
                );
                self.transcript_path = Some(transcript.path);
            }
            None => {
                log::warn!("{}: no preprocessed output", source_path);
                self.index = VariantIndex::default();
                self.transcript_path = None;
            }
        }

        if self.current_variant().is_none() {
            self.select_variant(0);
        }

        Ok(())
    }

    /// Replace the available keywords; the synthetic instancing keywords are always added
    /// to the global ones.
    pub fn set_available_keywords<G, L>(&mut self, global: &[G], local: &[L])
    where
        G: AsRef<str>,
        L: AsRef<str>,
    {
        self.global.set_available(
            global
                .iter()
                .map(|k| k.as_ref())
                .chain(SYNTHETIC_GLOBAL_KEYWORDS.iter().copied()),
        );
        if let Some(selection) = self.local.as_mut() {
            selection.set_available(local.iter().map(|k| k.as_ref()));
        }
    }

    /// Parse a transcript and publish its variants, replacing the previous ones.
    pub fn load_transcript(&mut self, text: &str, source_shader_path: &str) {
        let variants =
            crate::parse_transcript(text, source_shader_path, &self.normalizer, self.dialect);
        self.index = VariantIndex::new(variants);
    }

    pub fn variants(&self) -> &[Variant] {
        self.index.variants()
    }

    pub fn index(&self) -> &VariantIndex {
        &self.index
    }

    pub fn normalizer(&self) -> &PathNormalizer {
        &self.normalizer
    }

    /// Make the keyword selection match variant `idx`. Returns `false` if there is no such variant.
    pub fn select_variant(&mut self, idx: usize) -> bool {
        let variant = match self.index.variants().get(idx) {
            Some(variant) => variant,
            None => return false,
        };

        self.global.set_selection_str(&variant.global_keywords, false);
        if let (Some(selection), Some(local)) = (self.local.as_mut(), &variant.local_keywords) {
            selection.set_selection_str(local, false);
        }
        true
    }

    pub fn global_keywords(&self) -> &KeywordSelection {
        &self.global
    }

    pub fn global_keywords_mut(&mut self) -> &mut KeywordSelection {
        &mut self.global
    }

    pub fn local_keywords(&self) -> Option<&KeywordSelection> {
        self.local.as_ref()
    }

    pub fn local_keywords_mut(&mut self) -> Option<&mut KeywordSelection> {
        self.local.as_mut()
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Variant matching the current keyword selection.
    pub fn current_variant(&self) -> Option<&Variant> {
        let global_key = self.global.sorted_key();
        let local_key = self.local.as_ref().map(KeywordSelection::sorted_key);
        self.index.get(&global_key, local_key.as_deref())
    }

    /// Lines of the variant matching the current keyword selection; empty if none matches.
    pub fn displayed_lines(&self) -> Vec<&LineSection> {
        match self.current_variant() {
            Some(variant) => project(variant.lines(), self.collapsed),
            None => Vec::new(),
        }
    }

    /// Select a displayed row, returning where it came from.
    pub fn select_row(&mut self, row: usize) -> Option<Provenance> {
        let provenance = resolve(&self.displayed_lines(), row)?;
        self.selected = Some(provenance.clone());
        Some(provenance)
    }

    pub fn selected(&self) -> Option<&Provenance> {
        self.selected.as_ref()
    }

    /// Row of the selected place within the current view.
    pub fn selected_row(&self) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        locate(&self.displayed_lines(), selected)
    }

    /// Error messages reported for the current shader.
    pub fn diagnostics(&self) -> &[DiagnosticMessage] {
        &self.diagnostics
    }

    /// Show the variant diagnostic `idx` was reported for.
    pub fn choose_diagnostic(&mut self, idx: usize) -> bool {
        match self.diagnostics.get(idx) {
            Some(diagnostic) => {
                self.global.set_selection_str(&diagnostic.sorted_keywords, true);
                true
            }
            None => false,
        }
    }

    /// Where the toolchain wrote the transcript currently loaded, if any.
    pub fn transcript_path(&self) -> Option<&str> {
        self.transcript_path.as_deref()
    }

    /// Compile `shader` with the selected global keywords.
    pub fn compile_selected<G: ShaderCompilerGateway>(
        &self,
        gateway: &mut G,
        shader: &G::Shader,
        platform: &str,
        build_target: &str,
    ) -> Result<CompileResult, ExplorerError> {
        let request = CompileRequest {
            keywords: self.global.selected().to_vec(),
            platform: platform.to_string(),
            build_target: build_target.to_string(),
        };

        let source_path = gateway.source_path(shader);
        gateway
            .compile(shader, &request)
            .map_err(|cause| ExplorerError::Gateway {
                shader: source_path,
                cause,
            })
    }
}
