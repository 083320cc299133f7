//! **shader-variant-explorer** turns the preprocessed output of a shader, dumped for all
//! of its keyword variants at once, into a model that can be browsed one variant at a time.
//!
//! The toolchain's transcript is one long text made of variant dumps, each separated by a
//! keyword header and fragmented into many source files through `#line` directives.
//! Parsing yields a [`Variant`] per keyword combination, split into [`FileSection`]s,
//! each line of which remembers the original file and line it came from.
//!
//! Variants are looked up by their keyword combination through [`VariantIndex`], with the
//! user's choice of keywords held by [`KeywordSelection`]. A displayed row can be traced
//! back to its file, inclusion and line with [`resolve`], which is what an
//! "open file at line" action needs.
//!
//! [`ShaderExplorer`] ties all of the above together, talking to the toolchain through a
//! user-supplied [`ShaderCompilerGateway`].
//!
//! # Example
//!
//! ```rust
//! use shader_variant_explorer::{parse_transcript, PathNormalizer, RootPaths, TranscriptDialect};
//!
//! let transcript = "//////////////////////////////////////////////////////\n\
//!                   Global Keywords: FOO\n\
//!                   Local Keywords: \n\
//!                   #line 10 \"Assets/a.shader\"\n\
//!                   float4 a;\n";
//!
//! let normalizer = PathNormalizer::new(&RootPaths::default());
//! let variants = parse_transcript(transcript, "Assets/a.shader", &normalizer, TranscriptDialect::default());
//!
//! assert_eq!(variants.len(), 1);
//! assert_eq!(variants[0].global_keywords, "FOO");
//! ```

mod builder;
mod config;
mod diagnostics;
mod error;
mod explorer;
mod gateway;
mod index;
mod keywords;
mod lexer;
mod path_normalizer;
mod provenance;
mod variant;

pub use builder::*;
pub use config::*;
pub use diagnostics::*;
pub use error::*;
pub use explorer::*;
pub use gateway::*;
pub use index::*;
pub use keywords::*;
pub use lexer::*;
pub use path_normalizer::*;
pub use provenance::*;
pub use variant::*;

/// Parse a whole transcript into variants, in canonical order.
///
/// `source_shader_path` stands in for `#line` directives which don't name a file; those
/// refer to the shader's own source.
pub fn parse_transcript(
    text: &str,
    source_shader_path: &str,
    normalizer: &PathNormalizer,
    dialect: TranscriptDialect,
) -> Vec<Variant> {
    let lines: Vec<&str> = text.lines().collect();
    VariantBuilder::new(source_shader_path, normalizer).parse(&lines, dialect)
}
