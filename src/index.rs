use std::cmp::Ordering;
use std::collections::HashMap;

use crate::variant::{LineSection, Variant};

/// Key used for an empty keyword set.
pub const NO_KEYWORDS: &str = "<none>";

/// Keyword ordering used for lookup keys: leading underscores don't take part in the comparison.
pub fn keyword_order(a: &str, b: &str) -> Ordering {
    a.trim_start_matches('_')
        .cmp(b.trim_start_matches('_'))
        .then_with(|| a.cmp(b))
}

/// Canonical lookup key of a keyword set, e.g. `["B", "_A"]` -> `"_A B"`, or `"<none>"` if empty.
pub fn sorted_keyword_key<I>(tokens: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut tokens: Vec<I::Item> = tokens
        .into_iter()
        .filter(|token| !token.as_ref().is_empty())
        .collect();

    if tokens.is_empty() {
        return NO_KEYWORDS.to_string();
    }

    tokens.sort_by(|a, b| keyword_order(a.as_ref(), b.as_ref()));
    tokens
        .iter()
        .map(|token| token.as_ref())
        .collect::<Vec<&str>>()
        .join(" ")
}

/// [`sorted_keyword_key`] of a whitespace-separated keyword list.
pub fn sorted_key_for(keywords: &str) -> String {
    sorted_keyword_key(keywords.split_whitespace())
}

type VariantKey = (String, Option<String>);

/// Variants of one parse, addressable by their keyword combination.
#[derive(Debug, Default)]
pub struct VariantIndex {
    variants: Vec<Variant>,
    by_key: HashMap<VariantKey, usize>,
}

impl VariantIndex {
    pub fn new(variants: Vec<Variant>) -> Self {
        let mut by_key = HashMap::with_capacity(variants.len());
        for (idx, variant) in variants.iter().enumerate() {
            let key = (
                sorted_key_for(&variant.global_keywords),
                variant.local_keywords.as_deref().map(sorted_key_for),
            );
            by_key.entry(key).or_insert(idx);
        }

        VariantIndex { variants, by_key }
    }

    /// All variants, in canonical order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variant whose keyword keys equal the given ones exactly.
    pub fn get(&self, global_key: &str, local_key: Option<&str>) -> Option<&Variant> {
        let key = (global_key.to_string(), local_key.map(str::to_string));
        self.by_key.get(&key).map(|&idx| &self.variants[idx])
    }

    /// All lines of the matching variant, or nothing if there is no such variant.
    pub fn lookup(&self, global_key: &str, local_key: Option<&str>) -> Vec<&LineSection> {
        self.get(global_key, local_key)
            .map(|variant| variant.lines().collect())
            .unwrap_or_default()
    }
}

/// Keep only the first line of each file section when `collapsed` is set.
pub fn project<'a, I>(lines: I, collapsed: bool) -> Vec<&'a LineSection>
where
    I: IntoIterator<Item = &'a LineSection>,
{
    lines
        .into_iter()
        .filter(|line| !collapsed || line.is_file_section_start())
        .collect()
}
