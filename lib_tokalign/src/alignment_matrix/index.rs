use std::ops::{Index, IndexMut};

use ndarray::Array2;

use super::BaseAlignmentType;

/// A cell of the alignment matrix.
///
/// `reference_index` counts the reference tokens consumed so far, `hypothesis_index` the hypothesis tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct AlignmentMatrixIndex {
    pub(super) reference_index: usize,
    pub(super) hypothesis_index: usize,
}

impl AlignmentMatrixIndex {
    pub(super) fn new(reference_index: usize, hypothesis_index: usize) -> Self {
        Self {
            reference_index,
            hypothesis_index,
        }
    }

    pub(super) fn is_origin(&self) -> bool {
        self.reference_index == 0 && self.hypothesis_index == 0
    }

    /// The cell from which a step of the given type reaches this cell.
    pub(super) fn predecessor(&self, alignment_type: BaseAlignmentType) -> Self {
        match alignment_type {
            BaseAlignmentType::Insertion => {
                debug_assert!(self.hypothesis_index > 0);
                Self::new(self.reference_index, self.hypothesis_index - 1)
            }
            BaseAlignmentType::Deletion => {
                debug_assert!(self.reference_index > 0);
                Self::new(self.reference_index - 1, self.hypothesis_index)
            }
            BaseAlignmentType::Match | BaseAlignmentType::Substitution => {
                debug_assert!(self.reference_index > 0 && self.hypothesis_index > 0);
                Self::new(self.reference_index - 1, self.hypothesis_index - 1)
            }
        }
    }

    /// The first column without the origin, top to bottom.
    pub(super) fn reference_edge(reference_length: usize) -> impl Iterator<Item = Self> {
        (1..=reference_length).map(|reference_index| Self::new(reference_index, 0))
    }

    /// The first row without the origin, left to right.
    pub(super) fn hypothesis_edge(hypothesis_length: usize) -> impl Iterator<Item = Self> {
        (1..=hypothesis_length).map(|hypothesis_index| Self::new(0, hypothesis_index))
    }

    /// All cells outside of the first row and column, row by row.
    ///
    /// Each cell comes after its three predecessors.
    pub(super) fn inner(
        reference_length: usize,
        hypothesis_length: usize,
    ) -> impl Iterator<Item = Self> {
        (1..=reference_length).flat_map(move |reference_index| {
            (1..=hypothesis_length)
                .map(move |hypothesis_index| Self::new(reference_index, hypothesis_index))
        })
    }
}

impl<T> Index<AlignmentMatrixIndex> for Array2<T> {
    type Output = T;

    fn index(&self, index: AlignmentMatrixIndex) -> &Self::Output {
        &self[[index.reference_index, index.hypothesis_index]]
    }
}

impl<T> IndexMut<AlignmentMatrixIndex> for Array2<T> {
    fn index_mut(&mut self, index: AlignmentMatrixIndex) -> &mut Self::Output {
        &mut self[[index.reference_index, index.hypothesis_index]]
    }
}
