use std::fmt::{Display, Formatter, Write};

use crate::error::{Error, Result};

/// A single step of an alignment between a reference and a hypothesis.
///
/// Indices refer to positions in the original token sequences.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum AlignmentOperation {
    Match {
        reference_index: usize,
        hypothesis_index: usize,
    },
    Substitution {
        reference_index: usize,
        hypothesis_index: usize,
    },
    /// A hypothesis token without reference counterpart.
    Insertion { hypothesis_index: usize },
    /// A reference token without hypothesis counterpart.
    Deletion { reference_index: usize },
}

impl AlignmentOperation {
    /// The reference position consumed by this operation, if any.
    pub fn reference_index(&self) -> Option<usize> {
        match self {
            Self::Match {
                reference_index, ..
            }
            | Self::Substitution {
                reference_index, ..
            }
            | Self::Deletion { reference_index } => Some(*reference_index),
            Self::Insertion { .. } => None,
        }
    }

    /// The hypothesis position consumed by this operation, if any.
    pub fn hypothesis_index(&self) -> Option<usize> {
        match self {
            Self::Match {
                hypothesis_index, ..
            }
            | Self::Substitution {
                hypothesis_index, ..
            }
            | Self::Insertion { hypothesis_index } => Some(*hypothesis_index),
            Self::Deletion { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Match { .. })
    }

    /// The short name used in alignment traces.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Match { .. } => "match",
            Self::Substitution { .. } => "sub",
            Self::Insertion { .. } => "ins",
            Self::Deletion { .. } => "del",
        }
    }

    pub fn cigar_char(&self) -> char {
        match self {
            Self::Match { .. } => 'M',
            Self::Substitution { .. } => 'S',
            Self::Insertion { .. } => 'I',
            Self::Deletion { .. } => 'D',
        }
    }

    /// Looks up the token texts this operation refers to.
    ///
    /// The reference text is `None` for insertions, the hypothesis text is `None` for deletions.
    pub fn resolve<'tokens, Token: AsRef<str>>(
        &self,
        reference: &'tokens [Token],
        hypothesis: &'tokens [Token],
    ) -> (Option<&'tokens str>, Option<&'tokens str>) {
        (
            self.reference_index()
                .map(|index| reference[index].as_ref()),
            self.hypothesis_index()
                .map(|index| hypothesis[index].as_ref()),
        )
    }
}

/// The alignment of a hypothesis to a reference together with its error counts.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct AlignmentResult<Cost> {
    operations: Vec<AlignmentOperation>,
    insertions: usize,
    deletions: usize,
    substitutions: usize,
    reference_length: usize,
    hypothesis_length: usize,
    cost: Cost,
}

impl<Cost> AlignmentResult<Cost> {
    pub(crate) fn new(
        operations: Vec<AlignmentOperation>,
        insertions: usize,
        deletions: usize,
        substitutions: usize,
        reference_length: usize,
        hypothesis_length: usize,
        cost: Cost,
    ) -> Self {
        Self {
            operations,
            insertions,
            deletions,
            substitutions,
            reference_length,
            hypothesis_length,
            cost,
        }
    }

    /// The operations in left-to-right order.
    pub fn operations(&self) -> &[AlignmentOperation] {
        &self.operations
    }

    pub fn insertions(&self) -> usize {
        self.insertions
    }

    pub fn deletions(&self) -> usize {
        self.deletions
    }

    pub fn substitutions(&self) -> usize {
        self.substitutions
    }

    pub fn matches(&self) -> usize {
        self.operations.len() - self.insertions - self.deletions - self.substitutions
    }

    pub fn reference_length(&self) -> usize {
        self.reference_length
    }

    pub fn hypothesis_length(&self) -> usize {
        self.hypothesis_length
    }

    /// The edit distance, i.e. the bottom right cell of the alignment matrix.
    pub fn cost(&self) -> &Cost {
        &self.cost
    }

    /// The sum of insertions, deletions and substitutions.
    pub fn error_count(&self) -> usize {
        self.insertions + self.deletions + self.substitutions
    }

    /// The error count divided by the reference length.
    ///
    /// Fails if the reference is empty.
    pub fn error_rate(&self) -> Result<f64> {
        if self.reference_length == 0 {
            Err(Error::EmptyReference)
        } else {
            Ok(self.error_count() as f64 / self.reference_length as f64)
        }
    }

    pub fn cigar(&self) -> String {
        let mut result = String::new();
        self.write_cigar(&mut result).unwrap();
        result
    }

    /// Writes the operations run-length encoded, e.g. `2M1S1I`.
    pub fn write_cigar(&self, writer: &mut impl Write) -> std::fmt::Result {
        let mut operations = self.operations.iter().map(AlignmentOperation::cigar_char);
        let Some(mut current) = operations.next() else {
            return Ok(());
        };
        let mut amount = 1;

        for operation in operations {
            if operation == current {
                amount += 1;
            } else {
                write!(writer, "{amount}{current}")?;
                current = operation;
                amount = 1;
            }
        }

        write!(writer, "{amount}{current}")
    }
}

impl<Cost: Display> Display for AlignmentResult<Cost> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cost {} (ins: {}, del: {}, sub: {}, ref length: {}) ",
            self.cost, self.insertions, self.deletions, self.substitutions, self.reference_length
        )?;
        self.write_cigar(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{costs::U64Cost, error::Error};

    use super::{AlignmentOperation, AlignmentResult};

    fn example() -> AlignmentResult<U64Cost> {
        AlignmentResult::new(
            vec![
                AlignmentOperation::Match {
                    reference_index: 0,
                    hypothesis_index: 0,
                },
                AlignmentOperation::Match {
                    reference_index: 1,
                    hypothesis_index: 1,
                },
                AlignmentOperation::Substitution {
                    reference_index: 2,
                    hypothesis_index: 2,
                },
                AlignmentOperation::Insertion {
                    hypothesis_index: 3,
                },
                AlignmentOperation::Deletion { reference_index: 3 },
            ],
            1,
            1,
            1,
            4,
            4,
            3u64.into(),
        )
    }

    #[test]
    fn counts_and_rate() {
        let result = example();
        assert_eq!(result.matches(), 2);
        assert_eq!(result.error_count(), 3);
        assert_eq!(result.error_rate(), Ok(0.75));
        assert_eq!(result.cigar(), "2M1S1I1D");
        assert_eq!(
            result.to_string(),
            "cost 3 (ins: 1, del: 1, sub: 1, ref length: 4) 2M1S1I1D"
        );
    }

    #[test]
    fn empty_reference_has_no_rate() {
        let result = AlignmentResult::new(
            vec![AlignmentOperation::Insertion {
                hypothesis_index: 0,
            }],
            1,
            0,
            0,
            0,
            1,
            U64Cost::from(1u64),
        );
        assert_eq!(result.error_rate(), Err(Error::EmptyReference));
        assert_eq!(result.cigar(), "1I");
    }

    #[test]
    fn resolve_tokens() {
        let reference = ["a", "b", "c", "d"];
        let hypothesis = ["a", "b", "x", "y"];
        let resolved: Vec<_> = example()
            .operations()
            .iter()
            .map(|operation| operation.resolve(&reference, &hypothesis))
            .collect();
        assert_eq!(
            resolved,
            vec![
                (Some("a"), Some("a")),
                (Some("b"), Some("b")),
                (Some("c"), Some("x")),
                (None, Some("y")),
                (Some("d"), None),
            ]
        );
    }
}
