//! Mapping of token strings to small integer ids.
//!
//! Comparing ids is cheaper than comparing strings while filling the alignment matrix.
//! To keep memory bounded over long evaluations, the mapping is cleared completely once it grows past a threshold.

use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use rustc_hash::FxHashMap;

/// The number of distinct tokens above which the interner is cleared.
pub const DEFAULT_INTERNER_THRESHOLD: usize = 100_000;

/// The id of an interned token.
///
/// Ids are only comparable while no reset happened in between their assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u32);

#[derive(Debug, Clone)]
pub struct TokenInterner {
    ids: FxHashMap<String, TokenId>,
    threshold: usize,
    reset_count: usize,
}

impl TokenInterner {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_INTERNER_THRESHOLD)
    }

    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            ids: Default::default(),
            threshold,
            reset_count: 0,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The amount of distinct tokens interned since the last reset.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// How often the interner was cleared so far.
    pub fn reset_count(&self) -> usize {
        self.reset_count
    }

    /// Returns the id of the token without interning it.
    pub fn get(&self, token: &str) -> Option<TokenId> {
        self.ids.get(token).copied()
    }

    /// Returns the id of the token, interning it if it is new.
    ///
    /// If the interner holds more tokens than its threshold, it is cleared first.
    pub fn assign(&mut self, token: &str) -> TokenId {
        self.reset_if_full();
        self.get_or_insert(token)
    }

    /// Clears the interner if it holds more distinct tokens than its threshold.
    ///
    /// Returns `true` if the interner was cleared.
    pub fn reset_if_full(&mut self) -> bool {
        if self.ids.len() > self.threshold {
            debug!(
                "Clearing token interner holding {} tokens (threshold {})",
                self.ids.len(),
                self.threshold
            );
            self.ids.clear();
            self.reset_count += 1;
            true
        } else {
            false
        }
    }

    /// Interns the tokens of one reference and one hypothesis.
    ///
    /// The threshold is checked once before interning, so all returned ids belong to the same generation.
    /// A single pair with many distinct tokens can therefore leave the interner above its threshold until the next call.
    pub fn intern_pair<Token: AsRef<str>>(
        &mut self,
        reference: &[Token],
        hypothesis: &[Token],
    ) -> (Vec<TokenId>, Vec<TokenId>) {
        self.reset_if_full();

        let reference = reference
            .iter()
            .map(|token| self.get_or_insert(token.as_ref()))
            .collect();
        let hypothesis = hypothesis
            .iter()
            .map(|token| self.get_or_insert(token.as_ref()))
            .collect();
        (reference, hypothesis)
    }

    fn get_or_insert(&mut self, token: &str) -> TokenId {
        match self.get(token) {
            Some(id) => id,
            None => self.insert(token),
        }
    }

    fn insert(&mut self, token: &str) -> TokenId {
        let id = TokenId(
            self.ids
                .len()
                .try_into()
                .expect("more than u32::MAX distinct tokens in one interner generation"),
        );
        self.ids.insert(token.to_owned(), id);
        id
    }
}

impl Default for TokenInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// A source of token ids for the aligner.
///
/// Implemented by an owned [`TokenInterner`] and by a [`SharedTokenInterner`] that multiple aligners can use concurrently.
pub trait TokenIdAssigner {
    fn intern_pair<Token: AsRef<str>>(
        &mut self,
        reference: &[Token],
        hypothesis: &[Token],
    ) -> (Vec<TokenId>, Vec<TokenId>);
}

impl TokenIdAssigner for TokenInterner {
    fn intern_pair<Token: AsRef<str>>(
        &mut self,
        reference: &[Token],
        hypothesis: &[Token],
    ) -> (Vec<TokenId>, Vec<TokenId>) {
        TokenInterner::intern_pair(self, reference, hypothesis)
    }
}

/// A token interner behind a mutex.
///
/// The lock is held while interning both sequences of a pair, including a potential reset.
#[derive(Debug, Clone, Default)]
pub struct SharedTokenInterner {
    interner: Arc<Mutex<TokenInterner>>,
}

impl SharedTokenInterner {
    pub fn new(interner: TokenInterner) -> Self {
        Self {
            interner: Arc::new(Mutex::new(interner)),
        }
    }

    /// Runs `f` with exclusive access to the interner.
    pub fn with_interner<Output>(&self, f: impl FnOnce(&mut TokenInterner) -> Output) -> Output {
        // The interner has no invariant that a panic in another thread could break.
        let mut interner = self.interner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut interner)
    }
}

impl TokenIdAssigner for SharedTokenInterner {
    fn intern_pair<Token: AsRef<str>>(
        &mut self,
        reference: &[Token],
        hypothesis: &[Token],
    ) -> (Vec<TokenId>, Vec<TokenId>) {
        self.with_interner(|interner| interner.intern_pair(reference, hypothesis))
    }
}
