// In app/src/strategy_factory.rs

use anyhow::{Context, Result};
use app_config::StrategyConfig;
use strategies::{CombinedStrategy, ParamValue, ParameterSet, Strategy, StrategyFamily};

/// Parses `name=value` pairs from the command line. Integers stay integers.
pub fn parse_params(pairs: &[String]) -> Result<ParameterSet> {
    let mut params = ParameterSet::new();
    for pair in pairs {
        let (name, raw) = pair
            .split_once('=')
            .with_context(|| format!("Parameter '{pair}' must look like name=value"))?;
        let value = match raw.trim().parse::<i64>() {
            Ok(v) => ParamValue::Int(v),
            Err(_) => ParamValue::Float(
                raw.trim()
                    .parse::<f64>()
                    .with_context(|| format!("Parameter '{name}' has a non-numeric value '{raw}'"))?,
            ),
        };
        params.insert(name.trim(), value);
    }
    Ok(params)
}

pub fn create_strategy(family: StrategyFamily, params: &ParameterSet) -> Result<Strategy> {
    Strategy::from_params(family, params).with_context(|| format!("Invalid {family} parameters [{params}]"))
}

/// Builds the combined strategy the control step backtests.
///
/// Fails when no strategies are configured.
pub fn create_control_strategy(configs: &[StrategyConfig]) -> Result<CombinedStrategy> {
    if configs.is_empty() {
        anyhow::bail!("Cannot assess: no [[control.strategies]] are configured in settings.");
    }
    let members = configs
        .iter()
        .map(|config| create_strategy(config.family, &config.params))
        .collect::<Result<Vec<_>>>()?;
    Ok(CombinedStrategy::new(members)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn integers_and_floats() {
        let params = parse_params(&args(&["period=20", "std_dev=2.5"])).unwrap();
        assert_eq!(params.get("period"), Some(ParamValue::Int(20)));
        assert_eq!(params.get("std_dev"), Some(ParamValue::Float(2.5)));
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        assert!(parse_params(&args(&["period"])).is_err());
        assert!(parse_params(&args(&["period=ten"])).is_err());
    }

    #[test]
    fn control_strategy_needs_members() {
        assert!(create_control_strategy(&[]).is_err());
        let configs = vec![StrategyConfig {
            family: StrategyFamily::Rsi,
            params: ParameterSet::new().with("period", 14),
        }];
        assert_eq!(create_control_strategy(&configs).unwrap().members().len(), 1);
    }
}
