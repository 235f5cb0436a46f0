use std::ops::AddAssign;

use crate::{
    alignment_result::AlignmentResult,
    error::{Error, Result},
};

/// Error counts summed over many sentence pairs.
///
/// The corpus error rate is the sum of all errors divided by the sum of all reference lengths,
/// not the mean of the sentence error rates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct ErrorStatistics {
    pub sentence_pairs: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub substitutions: usize,
    pub matches: usize,
    pub reference_length: usize,
    pub hypothesis_length: usize,
}

impl ErrorStatistics {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_result<Cost>(&mut self, result: &AlignmentResult<Cost>) {
        self.sentence_pairs += 1;
        self.insertions += result.insertions();
        self.deletions += result.deletions();
        self.substitutions += result.substitutions();
        self.matches += result.matches();
        self.reference_length += result.reference_length();
        self.hypothesis_length += result.hypothesis_length();
    }

    pub fn error_count(&self) -> usize {
        self.insertions + self.deletions + self.substitutions
    }

    /// Fails if no reference token was seen.
    pub fn error_rate(&self) -> Result<f64> {
        if self.reference_length == 0 {
            Err(Error::EmptyCorpus)
        } else {
            Ok(self.error_count() as f64 / self.reference_length as f64)
        }
    }
}

impl<Cost> AddAssign<&AlignmentResult<Cost>> for ErrorStatistics {
    fn add_assign(&mut self, rhs: &AlignmentResult<Cost>) {
        self.add_result(rhs);
    }
}

impl AddAssign for ErrorStatistics {
    fn add_assign(&mut self, rhs: Self) {
        self.sentence_pairs += rhs.sentence_pairs;
        self.insertions += rhs.insertions;
        self.deletions += rhs.deletions;
        self.substitutions += rhs.substitutions;
        self.matches += rhs.matches;
        self.reference_length += rhs.reference_length;
        self.hypothesis_length += rhs.hypothesis_length;
    }
}

impl<'result, Cost: 'result> FromIterator<&'result AlignmentResult<Cost>> for ErrorStatistics {
    fn from_iter<T: IntoIterator<Item = &'result AlignmentResult<Cost>>>(iter: T) -> Self {
        let mut statistics = Self::new();
        for result in iter {
            statistics += result;
        }
        statistics
    }
}
