//! Mapping displayed transcript rows back to their origin, and back again.
//!
//! The same file can be `#line`-included several times within one variant (shared headers
//! usually are), so a path alone does not identify a section; the occurrence index counts
//! how many sections of the same file come before it.

use serde::Serialize;

use crate::variant::LineSection;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Provenance {
    /// Empty when the row precedes every file marker
    pub canonical_path: String,

    /// 0-based index of the inclusion of `canonical_path` the row belongs to
    pub occurrence: usize,

    /// As emitted in the transcript's `#line` directives
    pub original_line_number: i64,
}

impl Provenance {
    pub fn has_origin(&self) -> bool {
        !self.canonical_path.is_empty()
    }
}

/// Find where row `selected` of `lines` came from. `None` if `selected` is out of range.
///
/// Every section start survives collapsing, so the result does not depend on whether
/// `lines` is the collapsed or the full view.
pub fn resolve<L: AsRef<LineSection>>(lines: &[L], selected: usize) -> Option<Provenance> {
    let selected_line = lines.get(selected)?.as_ref();

    let mut provenance = Provenance {
        original_line_number: selected_line.original_line_number,
        ..Default::default()
    };

    let start = lines[..=selected]
        .iter()
        .rposition(|line| line.as_ref().is_file_section_start());

    if let Some(start) = start {
        let path = lines[start]
            .as_ref()
            .file_section_start_path
            .as_deref()
            .unwrap_or_default();

        provenance.occurrence = lines[..start]
            .iter()
            .filter(|line| line.as_ref().file_section_start_path.as_deref() == Some(path))
            .count();
        provenance.canonical_path = path.to_string();
    }

    Some(provenance)
}

/// Inverse of [`resolve`]: the row index of `provenance` within `lines`.
///
/// Picks the row with the same line number inside the matching section if there is one,
/// the section's first row otherwise. `None` if `lines` holds fewer inclusions of the file.
pub fn locate<L: AsRef<LineSection>>(lines: &[L], provenance: &Provenance) -> Option<usize> {
    if !provenance.has_origin() {
        return None;
    }

    let path = provenance.canonical_path.as_str();
    let start = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.as_ref().file_section_start_path.as_deref() == Some(path))
        .map(|(idx, _)| idx)
        .nth(provenance.occurrence)?;

    let exact = lines[start..]
        .iter()
        .enumerate()
        .take_while(|&(offset, line)| offset == 0 || !line.as_ref().is_file_section_start())
        .find(|(_, line)| line.as_ref().original_line_number == provenance.original_line_number)
        .map(|(offset, _)| start + offset);

    Some(exact.unwrap_or(start))
}
