use std::collections::HashSet;

use crate::content;

/// Word-validity oracle. Submissions are only checked once `is_ready` is true.
pub trait WordOracle {
    fn is_ready(&self) -> bool;
    fn contains(&self, word: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
pub enum Dictionary {
    /// Still loading: every submission is rejected.
    #[default]
    Loading,
    Ready(HashSet<String>),
}

impl Dictionary {
    /// One word per line. Keeps purely alphabetic words of two or more letters, lowercased.
    pub fn from_word_list(text: &str) -> Self {
        let words = text
            .lines()
            .map(|l| l.trim().to_lowercase())
            .filter(|w| w.len() >= 2 && w.chars().all(|c| c.is_ascii_lowercase()))
            .collect();
        Dictionary::Ready(words)
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Dictionary::Ready(words.into_iter().map(|w| w.as_ref().to_lowercase()).collect())
    }

    /// The compiled-in starter list.
    pub fn starter() -> Self {
        Self::from_word_list(content::STARTER_WORDS)
    }

    pub fn len(&self) -> usize {
        match self {
            Dictionary::Loading => 0,
            Dictionary::Ready(words) => words.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        let set = match self {
            Dictionary::Loading => None,
            Dictionary::Ready(words) => Some(words),
        };
        set.into_iter().flat_map(|w| w.iter().map(String::as_str))
    }
}

impl WordOracle for Dictionary {
    fn is_ready(&self) -> bool {
        matches!(self, Dictionary::Ready(_))
    }

    fn contains(&self, word: &str) -> bool {
        match self {
            Dictionary::Loading => false,
            Dictionary::Ready(words) => words.contains(&word.to_lowercase()),
        }
    }
}
