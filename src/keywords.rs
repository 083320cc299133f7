use crate::index::{keyword_order, sorted_keyword_key};

/// Callback fired with the new selection whenever it changes.
pub type SelectionObserver = Box<dyn FnMut(&[String])>;

/// A user's choice of keywords, restricted to the keywords a shader actually declares.
///
/// The selection is kept free of duplicates and of keywords that are not available;
/// keywords that disappear from the available set are silently dropped.
#[derive(Default)]
pub struct KeywordSelection {
    available: Vec<String>,
    selected: Vec<String>,
    observers: Vec<SelectionObserver>,
}

impl KeywordSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_selection_changed(&mut self, observer: impl FnMut(&[String]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Nothing can be picked when the shader has no keywords of this kind.
    pub fn is_enabled(&self) -> bool {
        !self.available.is_empty()
    }

    pub fn is_selected(&self, token: &str) -> bool {
        self.selected.iter().any(|s| s == token)
    }

    /// Available keywords that are not selected yet.
    pub fn addable(&self) -> impl Iterator<Item = &str> + '_ {
        self.available
            .iter()
            .map(String::as_str)
            .filter(move |token| !self.is_selected(token))
    }

    /// Replace the available keywords, dropping selected ones that are no longer available.
    pub fn set_available<I>(&mut self, tokens: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.available.clear();
        for token in tokens {
            let token = token.into();
            if !token.is_empty() && !self.available.contains(&token) {
                self.available.push(token);
            }
        }

        let available = &self.available;
        self.selected.retain(|token| available.contains(token));
    }

    pub fn add(&mut self, token: &str) -> bool {
        if self.is_selected(token) || !self.available.iter().any(|s| s == token) {
            return false;
        }

        self.selected.push(token.to_string());
        self.notify();
        true
    }

    pub fn remove(&mut self, token: &str) -> bool {
        let len = self.selected.len();
        self.selected.retain(|s| s != token);
        if self.selected.len() == len {
            return false;
        }

        self.notify();
        true
    }

    /// Replace the whole selection. Unavailable tokens are skipped, and the rest is stored
    /// in lookup-key order.
    ///
    /// `notify` is off when restoring a selection derived from the variant already on display.
    pub fn set_selection<I>(&mut self, tokens: I, notify: bool)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.selected.clear();
        for token in tokens {
            let token = token.as_ref();
            if self.available.iter().any(|s| s == token) && !self.is_selected(token) {
                self.selected.push(token.to_string());
            }
        }
        self.selected.sort_by(|a, b| keyword_order(a, b));

        if notify {
            self.notify();
        }
    }

    /// [`Self::set_selection`] from a whitespace-separated list, as found in variant headers.
    pub fn set_selection_str(&mut self, keywords: &str, notify: bool) {
        self.set_selection(keywords.split_whitespace(), notify);
    }

    pub fn clear(&mut self, notify: bool) {
        self.set_selection(std::iter::empty::<&str>(), notify);
    }

    /// Lookup key for the current selection, matching [`crate::sorted_keyword_key`].
    pub fn sorted_key(&self) -> String {
        sorted_keyword_key(&self.selected)
    }

    fn notify(&mut self) {
        let selected = self.selected.as_slice();
        for observer in self.observers.iter_mut() {
            observer(selected);
        }
    }
}
