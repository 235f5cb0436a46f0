use index::AlignmentMatrixIndex;
use log::trace;
use ndarray::Array2;

use crate::{alignment_configuration::AlignmentConfiguration, costs::EditCost};

mod backtrack;
mod index;

/// The edit distance matrix between a reference and a hypothesis.
///
/// Cell `[i, j]` holds the minimum cost of transforming the first `i` reference tokens into the first `j` hypothesis tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentMatrix<Cost> {
    matrix: Array2<Cost>,
    configuration: AlignmentConfiguration<Cost>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseAlignmentType {
    Insertion,
    Deletion,
    Match,
    Substitution,
}

impl<Cost: EditCost> AlignmentMatrix<Cost> {
    pub fn new(
        configuration: AlignmentConfiguration<Cost>,
        reference_length: usize,
        hypothesis_length: usize,
    ) -> Self {
        Self {
            matrix: Array2::from_elem((reference_length + 1, hypothesis_length + 1), Cost::zero()),
            configuration,
        }
    }

    pub fn reference_length(&self) -> usize {
        self.matrix.dim().0 - 1
    }

    pub fn hypothesis_length(&self) -> usize {
        self.matrix.dim().1 - 1
    }

    /// The cost of the complete alignment, i.e. the bottom right cell.
    pub fn total_cost(&self) -> Cost {
        self.matrix[[self.reference_length(), self.hypothesis_length()]]
    }

    /// Fills the matrix and returns the edit distance.
    ///
    /// The sequence lengths must match the dimensions this matrix was created with.
    pub fn align<Token: Eq>(&mut self, reference: &[Token], hypothesis: &[Token]) -> Cost {
        assert_eq!(reference.len(), self.reference_length());
        assert_eq!(hypothesis.len(), self.hypothesis_length());
        trace!(
            "Filling alignment matrix of dimension {:?}",
            self.matrix.dim()
        );

        self.initialise();
        self.align_inner(reference, hypothesis);
        self.total_cost()
    }

    fn initialise(&mut self) {
        // Initialise matrix origin.
        self.matrix[[0, 0]] = Cost::zero();

        // Initialise matrix edges.
        for index in AlignmentMatrixIndex::reference_edge(self.reference_length()) {
            self.set_cost(index, BaseAlignmentType::Deletion);
        }
        for index in AlignmentMatrixIndex::hypothesis_edge(self.hypothesis_length()) {
            self.set_cost(index, BaseAlignmentType::Insertion);
        }
    }

    fn align_inner<Token: Eq>(&mut self, reference: &[Token], hypothesis: &[Token]) {
        for index in AlignmentMatrixIndex::inner(self.reference_length(), self.hypothesis_length()) {
            self.set_min_cost(index, reference, hypothesis);
        }
    }

    fn set_cost(&mut self, index: AlignmentMatrixIndex, alignment_type: BaseAlignmentType) {
        self.matrix[index] = self.compute_cost(index, alignment_type);
    }

    fn set_min_cost<Token: Eq>(
        &mut self,
        index: AlignmentMatrixIndex,
        reference: &[Token],
        hypothesis: &[Token],
    ) {
        let reference_token = &reference[index.reference_index - 1];
        let hypothesis_token = &hypothesis[index.hypothesis_index - 1];
        let diagonal_type = if reference_token == hypothesis_token {
            BaseAlignmentType::Match
        } else {
            BaseAlignmentType::Substitution
        };

        let deletion_cost = self.compute_cost(index, BaseAlignmentType::Deletion);
        let insertion_cost = self.compute_cost(index, BaseAlignmentType::Insertion);
        let diagonal_cost = self.compute_cost(index, diagonal_type);
        self.matrix[index] = deletion_cost.min(insertion_cost).min(diagonal_cost);
    }

    fn compute_cost(&self, index: AlignmentMatrixIndex, alignment_type: BaseAlignmentType) -> Cost {
        self.matrix[index.predecessor(alignment_type)] + self.configuration.cost(alignment_type)
    }

    /// Overwrites the matrix with the origin, the first column, the first row and then the inner cells row by row.
    #[cfg(test)]
    fn manual_debug_fill(&mut self, costs: impl IntoIterator<Item = Cost>) {
        let mut costs = costs.into_iter();
        for index in std::iter::once(AlignmentMatrixIndex::new(0, 0))
            .chain(AlignmentMatrixIndex::reference_edge(self.reference_length()))
            .chain(AlignmentMatrixIndex::hypothesis_edge(self.hypothesis_length()))
            .chain(AlignmentMatrixIndex::inner(self.reference_length(), self.hypothesis_length()))
        {
            self.matrix[index] = costs.next().unwrap();
        }
        assert!(costs.next().is_none());
    }
}

impl<Cost: EditCost> core::fmt::Display for AlignmentMatrix<Cost> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut cost_column_widths = vec![0; self.matrix.dim().1];
        for reference_index in 0..self.matrix.dim().0 {
            for (hypothesis_index, cost_column_width) in cost_column_widths.iter_mut().enumerate() {
                let width = self.matrix[[reference_index, hypothesis_index]]
                    .to_string()
                    .len();
                *cost_column_width = width.max(*cost_column_width);
            }
        }

        for reference_index in 0..self.matrix.dim().0 {
            write!(f, "[ ")?;
            #[allow(clippy::needless_range_loop)]
            for hypothesis_index in 0..self.matrix.dim().1 {
                write!(
                    f,
                    "{: >width$} ",
                    self.matrix[[reference_index, hypothesis_index]].to_string(),
                    width = cost_column_widths[hypothesis_index],
                )?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use noisy_float::types::{R64, r64};

    use crate::{alignment_configuration::AlignmentConfiguration, costs::U64Cost};

    use super::AlignmentMatrix;

    #[test]
    fn test_simple_alignments() {
        let reference = b"ACG";
        let hypothesis = b"ACCG";

        let configuration = AlignmentConfiguration::<U64Cost> {
            match_cost: 0u64.into(),
            substitution_cost: 2u64.into(),
            insertion_cost: 3u64.into(),
            deletion_cost: 3u64.into(),
        };
        let mut matrix = AlignmentMatrix::new(configuration, reference.len(), hypothesis.len());
        assert_eq!(matrix.align(reference, hypothesis), 3u64.into());

        let mut manual_matrix = matrix.clone();
        manual_matrix.manual_debug_fill(
            [
                // First column.
                0u64, 3, 6, 9, //
                // First row without origin.
                3, 6, 9, 12, //
                // Inner cells, row by row.
                0, 3, 6, 9, //
                3, 0, 3, 6, //
                6, 3, 2, 3,
            ]
            .into_iter()
            .map(Into::into),
        );
        assert_eq!(
            matrix, manual_matrix,
            "matrix:\n{matrix}\nmanual_matrix:\n{manual_matrix}"
        );

        let reference = b"ACCCGT";
        let hypothesis = b"ACCGT";
        let mut matrix = AlignmentMatrix::<U64Cost>::new(
            AlignmentConfiguration::default(),
            reference.len(),
            hypothesis.len(),
        );
        assert_eq!(matrix.align(reference, hypothesis), 1u64.into());

        let reference = b"ACGCCCCCT";
        let hypothesis = b"ACCCCCGCT";
        let mut matrix = AlignmentMatrix::<U64Cost>::new(
            AlignmentConfiguration::default(),
            reference.len(),
            hypothesis.len(),
        );
        assert_eq!(matrix.align(reference, hypothesis), 2u64.into());
    }

    #[test]
    fn empty_sequences() {
        let mut matrix = AlignmentMatrix::<R64>::new(AlignmentConfiguration::default(), 0, 3);
        assert_eq!(matrix.align::<u8>(&[], b"abc"), r64(3.0));

        let mut matrix = AlignmentMatrix::<R64>::new(AlignmentConfiguration::default(), 2, 0);
        assert_eq!(matrix.align::<u8>(b"ab", &[]), r64(2.0));

        let mut matrix = AlignmentMatrix::<R64>::new(AlignmentConfiguration::default(), 0, 0);
        assert_eq!(matrix.align::<u8>(&[], &[]), r64(0.0));
    }

    #[test]
    fn fractional_weights() {
        let configuration = AlignmentConfiguration {
            match_cost: r64(0.0),
            substitution_cost: r64(4.0),
            insertion_cost: r64(1.5),
            deletion_cost: r64(1.5),
        };
        let mut matrix = AlignmentMatrix::new(configuration, 3, 3);
        // A substitution is more expensive than an insertion plus a deletion.
        assert_eq!(matrix.align(b"abc", b"axc"), r64(3.0));
    }

    #[test]
    fn display() {
        let mut matrix = AlignmentMatrix::<U64Cost>::new(AlignmentConfiguration::default(), 1, 2);
        matrix.align(b"a", b"ab");
        assert_eq!(matrix.to_string(), "[ 0 1 2 ]\n[ 1 0 1 ]\n");
    }
}
