use log::trace;

use crate::{
    alignment_result::{AlignmentOperation, AlignmentResult},
    costs::EditCost,
};

use super::{AlignmentMatrix, BaseAlignmentType, index::AlignmentMatrixIndex};

#[derive(Default)]
struct OperationCounts {
    insertions: usize,
    deletions: usize,
    substitutions: usize,
}

impl<Cost: EditCost> AlignmentMatrix<Cost> {
    /// Reconstructs an optimal alignment from a filled matrix.
    ///
    /// The walk starts at the bottom right cell and prefers a deletion over a diagonal step
    /// only if the deletion predecessor is strictly cheaper than both the insertion and the diagonal predecessor.
    /// Likewise, an insertion is only chosen if its predecessor is strictly cheaper than the diagonal predecessor
    /// and not more expensive than the deletion predecessor.
    ///
    /// A diagonal step counts as substitution if its cost differs from the cost of its predecessor plus the match cost.
    /// This is decided from the matrix alone, without looking at the tokens.
    pub fn backtrack(&self) -> AlignmentResult<Cost> {
        let mut index =
            AlignmentMatrixIndex::new(self.reference_length(), self.hypothesis_length());
        let mut operations = Vec::with_capacity(self.reference_length() + self.hypothesis_length());
        let mut counts = OperationCounts::default();

        while index.reference_index > 0 && index.hypothesis_index > 0 {
            let cost = self.matrix[index];
            let deletion_cost = self.matrix[index.predecessor(BaseAlignmentType::Deletion)];
            let insertion_cost = self.matrix[index.predecessor(BaseAlignmentType::Insertion)];
            let diagonal_cost = self.matrix[index.predecessor(BaseAlignmentType::Match)];
            let is_substitution = diagonal_cost + self.configuration.match_cost != cost;

            if deletion_cost < insertion_cost {
                if deletion_cost < diagonal_cost {
                    operations.push(counts.deletion(index));
                    index = index.predecessor(BaseAlignmentType::Deletion);
                } else {
                    operations.push(counts.diagonal(index, is_substitution));
                    index = index.predecessor(BaseAlignmentType::Match);
                }
            } else if insertion_cost < diagonal_cost {
                operations.push(counts.insertion(index));
                index = index.predecessor(BaseAlignmentType::Insertion);
            } else {
                operations.push(counts.diagonal(index, is_substitution));
                index = index.predecessor(BaseAlignmentType::Match);
            }
        }

        while index.reference_index > 0 {
            operations.push(counts.deletion(index));
            index = index.predecessor(BaseAlignmentType::Deletion);
        }

        while index.hypothesis_index > 0 {
            operations.push(counts.insertion(index));
            index = index.predecessor(BaseAlignmentType::Insertion);
        }

        debug_assert!(index.is_origin());
        operations.reverse();
        trace!("Backtracked {} alignment operations", operations.len());

        AlignmentResult::new(
            operations,
            counts.insertions,
            counts.deletions,
            counts.substitutions,
            self.reference_length(),
            self.hypothesis_length(),
            self.total_cost(),
        )
    }
}

impl OperationCounts {
    fn deletion(&mut self, index: AlignmentMatrixIndex) -> AlignmentOperation {
        self.deletions += 1;
        AlignmentOperation::Deletion {
            reference_index: index.reference_index - 1,
        }
    }

    fn insertion(&mut self, index: AlignmentMatrixIndex) -> AlignmentOperation {
        self.insertions += 1;
        AlignmentOperation::Insertion {
            hypothesis_index: index.hypothesis_index - 1,
        }
    }

    fn diagonal(
        &mut self,
        index: AlignmentMatrixIndex,
        is_substitution: bool,
    ) -> AlignmentOperation {
        let reference_index = index.reference_index - 1;
        let hypothesis_index = index.hypothesis_index - 1;

        if is_substitution {
            self.substitutions += 1;
            AlignmentOperation::Substitution {
                reference_index,
                hypothesis_index,
            }
        } else {
            AlignmentOperation::Match {
                reference_index,
                hypothesis_index,
            }
        }
    }
}
