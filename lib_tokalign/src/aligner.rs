use log::trace;

use crate::{
    alignment_configuration::AlignmentConfiguration,
    alignment_matrix::AlignmentMatrix,
    alignment_result::AlignmentResult,
    costs::EditCost,
    error::Result,
    interner::{TokenIdAssigner, TokenInterner},
};

/// Aligns hypothesis token sequences to reference token sequences.
///
/// Tokens are interned before alignment, either into an interner owned by the aligner,
/// or into a [`SharedTokenInterner`](crate::interner::SharedTokenInterner).
#[derive(Debug, Clone)]
pub struct TokenAligner<Cost, Interner = TokenInterner> {
    configuration: AlignmentConfiguration<Cost>,
    interner: Interner,
}

impl<Cost: EditCost> TokenAligner<Cost> {
    pub fn new(configuration: AlignmentConfiguration<Cost>) -> Result<Self> {
        Self::with_interner(configuration, TokenInterner::new())
    }
}

impl<Cost: EditCost, Interner: TokenIdAssigner> TokenAligner<Cost, Interner> {
    /// Creates an aligner that interns tokens into the given interner.
    ///
    /// Fails if the configuration contains negative costs.
    pub fn with_interner(
        configuration: AlignmentConfiguration<Cost>,
        interner: Interner,
    ) -> Result<Self> {
        configuration.verify()?;
        Ok(Self {
            configuration,
            interner,
        })
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Computes an optimal alignment of the hypothesis to the reference.
    ///
    /// All tokens of both sequences are interned before the alignment matrix is filled.
    /// Memory and time are quadratic in the sequence lengths.
    pub fn compute<Token: AsRef<str>>(
        &mut self,
        reference: &[Token],
        hypothesis: &[Token],
    ) -> AlignmentResult<Cost> {
        let (reference, hypothesis) = self.interner.intern_pair(reference, hypothesis);
        trace!(
            "Aligning {} reference tokens to {} hypothesis tokens",
            reference.len(),
            hypothesis.len()
        );

        let mut matrix = AlignmentMatrix::new(
            self.configuration.clone(),
            reference.len(),
            hypothesis.len(),
        );
        matrix.align(&reference, &hypothesis);
        matrix.backtrack()
    }

    /// Splits both strings at whitespace and aligns the resulting tokens.
    pub fn compute_str(&mut self, reference: &str, hypothesis: &str) -> AlignmentResult<Cost> {
        let reference: Vec<_> = reference.split_whitespace().collect();
        let hypothesis: Vec<_> = hypothesis.split_whitespace().collect();
        self.compute(&reference, &hypothesis)
    }
}
