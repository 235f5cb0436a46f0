use crate::{
    alignment_matrix::BaseAlignmentType,
    costs::EditCost,
    error::{Error, Result},
};

/// The weights of the edit operations.
///
/// A match costs `match_cost`, which is zero by default.
/// All other operations cost one by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentConfiguration<Cost> {
    pub match_cost: Cost,
    pub substitution_cost: Cost,
    pub insertion_cost: Cost,
    pub deletion_cost: Cost,
}

impl<Cost: Copy> AlignmentConfiguration<Cost> {
    pub fn cost(&self, alignment_type: BaseAlignmentType) -> Cost {
        match alignment_type {
            BaseAlignmentType::Insertion => self.insertion_cost,
            BaseAlignmentType::Deletion => self.deletion_cost,
            BaseAlignmentType::Match => self.match_cost,
            BaseAlignmentType::Substitution => self.substitution_cost,
        }
    }
}

impl<Cost: EditCost> AlignmentConfiguration<Cost> {
    /// Returns an error if any cost is negative.
    pub fn verify(&self) -> Result<()> {
        for (name, cost) in [
            ("match", self.match_cost),
            ("substitution", self.substitution_cost),
            ("insertion", self.insertion_cost),
            ("deletion", self.deletion_cost),
        ] {
            if cost < Cost::zero() {
                return Err(Error::NegativeCost { name });
            }
        }

        Ok(())
    }

    pub fn has_symmetric_indels(&self) -> bool {
        self.insertion_cost == self.deletion_cost
    }
}

impl<Cost: EditCost> Default for AlignmentConfiguration<Cost> {
    fn default() -> Self {
        Self {
            match_cost: Cost::zero(),
            substitution_cost: Cost::from_usize(1),
            insertion_cost: Cost::from_usize(1),
            deletion_cost: Cost::from_usize(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use noisy_float::types::{R64, r64};

    use crate::{costs::U64Cost, error::Error};

    use super::AlignmentConfiguration;

    #[test]
    fn default_weights() {
        let configuration = AlignmentConfiguration::<U64Cost>::default();
        assert_eq!(configuration.match_cost, 0u64.into());
        assert_eq!(configuration.substitution_cost, 1u64.into());
        assert!(configuration.has_symmetric_indels());
        assert_eq!(configuration.verify(), Ok(()));
    }

    #[test]
    fn negative_weights_are_rejected() {
        let configuration = AlignmentConfiguration::<R64> {
            insertion_cost: r64(-0.5),
            ..Default::default()
        };
        assert_eq!(
            configuration.verify(),
            Err(Error::NegativeCost { name: "insertion" })
        );
    }
}
