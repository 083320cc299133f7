use std::fmt;

use serde::Serialize;

/// One line of a reconstructed variant, along with information pointing back at the origin
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct LineSection {
    /// Line text, verbatim
    pub content: String,

    /// Line in the original source file this content came from
    pub original_line_number: i64,

    /// Canonical path of the file section this line opens; only set on the first line of a section
    pub file_section_start_path: Option<String>,

    /// Normalized name of the file section this line opens; only set on the first line of a section
    pub display_label: Option<String>,
}

impl LineSection {
    pub fn is_file_section_start(&self) -> bool {
        self.file_section_start_path.is_some()
    }
}

impl AsRef<LineSection> for LineSection {
    fn as_ref(&self) -> &LineSection {
        self
    }
}

/// Contiguous run of lines attributed to one source file, or to a pseudo-file such as a
/// stage marker or the variant's detail header.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct FileSection {
    pub canonical_path: String,
    pub display_name: String,
    pub lines: Vec<LineSection>,
}

impl FileSection {
    pub fn new(canonical_path: String, display_name: String) -> Self {
        FileSection {
            canonical_path,
            display_name,
            lines: Vec::new(),
        }
    }

    /// Append a line; the first one pushed carries the section's identity.
    pub fn push_line(&mut self, content: String, original_line_number: i64) {
        let is_first = self.lines.is_empty();
        self.lines.push(LineSection {
            content,
            original_line_number,
            file_section_start_path: if is_first {
                Some(self.canonical_path.clone())
            } else {
                None
            },
            display_label: if is_first {
                Some(self.display_name.clone())
            } else {
                None
            },
        });
    }
}

/// One compiled permutation of the shader
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Variant {
    /// Keywords as listed by the toolchain, space-separated
    pub global_keywords: String,

    /// `None` when the toolchain does not separate local keywords
    pub local_keywords: Option<String>,

    pub sections: Vec<FileSection>,
}

impl Variant {
    /// All lines of all sections, in order.
    pub fn lines(&self) -> impl Iterator<Item = &LineSection> {
        self.sections.iter().flat_map(|section| section.lines.iter())
    }

    /// Label used when offering this variant in a keyword combination picker.
    ///
    /// Every second space turns into a `/` so that long keyword lists stay readable
    /// when the picker splits entries into submenus.
    pub fn menu_label(&self) -> String {
        let mut label = self.global_keywords.clone();
        if let Some(local) = self.local_keywords.as_deref().filter(|s| !s.is_empty()) {
            label.push(' ');
            label.push_str(local);
        }

        let mut space_count = 0;
        let label: String = label
            .chars()
            .map(|c| {
                if c == ' ' {
                    space_count += 1;
                    if space_count % 2 == 0 {
                        return '/';
                    }
                }
                c
            })
            .collect();

        label.replace(' ', "  •  ")
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Global: {}", self.global_keywords)?;
        writeln!(f, "Local: {}", self.local_keywords.as_deref().unwrap_or(""))?;
        for section in &self.sections {
            writeln!(f, "# file: {}", section.canonical_path)?;
            for line in &section.lines {
                writeln!(f, "{:06}:  {}", line.original_line_number, line.content)?;
            }
        }
        Ok(())
    }
}
