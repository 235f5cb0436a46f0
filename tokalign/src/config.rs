use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};
use lib_tokalign::alignment_configuration::AlignmentConfiguration;
use log::info;
use noisy_float::types::R64;

/// The edit costs as given in a toml file.
///
/// Missing costs take their default values.
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CostConfig {
    #[serde(default)]
    match_cost: f64,
    #[serde(default = "unit_cost")]
    substitution_cost: f64,
    #[serde(default = "unit_cost")]
    insertion_cost: f64,
    #[serde(default = "unit_cost")]
    deletion_cost: f64,
}

fn unit_cost() -> f64 {
    1.0
}

fn to_cost(value: f64, name: &str) -> Result<R64> {
    R64::try_new(value).ok_or_else(|| anyhow!("The {name} must be a finite number"))
}

impl CostConfig {
    fn into_configuration(self) -> Result<AlignmentConfiguration<R64>> {
        let configuration = AlignmentConfiguration {
            match_cost: to_cost(self.match_cost, "match_cost")?,
            substitution_cost: to_cost(self.substitution_cost, "substitution_cost")?,
            insertion_cost: to_cost(self.insertion_cost, "insertion_cost")?,
            deletion_cost: to_cost(self.deletion_cost, "deletion_cost")?,
        };
        configuration.verify()?;
        Ok(configuration)
    }
}

/// Loads the edit costs from the given toml file, or returns the unit costs if there is none.
pub fn load_configuration(path: Option<&Path>) -> Result<AlignmentConfiguration<R64>> {
    let Some(path) = path else {
        return Ok(AlignmentConfiguration::default());
    };

    info!("Loading cost configuration {path:?}");
    let config =
        fs::read_to_string(path).with_context(|| format!("Reading cost configuration {path:?}"))?;
    parse_configuration(&config).with_context(|| format!("Parsing cost configuration {path:?}"))
}

fn parse_configuration(config: &str) -> Result<AlignmentConfiguration<R64>> {
    toml::from_str::<CostConfig>(config)?.into_configuration()
}

#[cfg(test)]
mod tests {
    use noisy_float::types::r64;

    use super::parse_configuration;

    #[test]
    fn partial_configuration() {
        let configuration = parse_configuration("substitution_cost = 1.5\n").unwrap();
        assert_eq!(configuration.match_cost, r64(0.0));
        assert_eq!(configuration.substitution_cost, r64(1.5));
        assert_eq!(configuration.insertion_cost, r64(1.0));
        assert_eq!(configuration.deletion_cost, r64(1.0));
    }

    #[test]
    fn invalid_configurations() {
        assert!(parse_configuration("deletion_cost = -1.0\n").is_err());
        assert!(parse_configuration("deletion_cost = nan\n").is_err());
        assert!(parse_configuration("indel_cost = 2.0\n").is_err());
    }
}
