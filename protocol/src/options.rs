#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolOption {
    pub name: &'static str,
    pub option_type: OptionType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionType {
    Spin { min: i32, max: i32 },
    Float { min: f32, max: f32 },
    Check,
}

impl OptionType {
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            OptionType::Spin { min, max } => {
                let parsed = value
                    .parse::<i32>()
                    .map_err(|e| format!("Invalid integer: {}", e))?;
                if parsed < *min || parsed > *max {
                    return Err(format!("Value {} out of range [{}, {}]", parsed, min, max));
                }
                Ok(())
            }
            OptionType::Float { min, max } => {
                let parsed = value
                    .parse::<f32>()
                    .map_err(|e| format!("Invalid number: {}", e))?;
                if !(*min..=*max).contains(&parsed) {
                    return Err(format!("Value {} out of range [{}, {}]", parsed, min, max));
                }
                Ok(())
            }
            OptionType::Check => match value {
                "true" | "false" => Ok(()),
                _ => Err("Boolean value must be 'true' or 'false'".to_string()),
            },
        }
    }

    pub fn to_protocol<T>(&self, name: &str, current_value: &T) -> String
    where
        T: ToString,
    {
        match self {
            OptionType::Spin { min, max } => format!(
                "option name {} type spin default {} min {} max {}",
                name,
                current_value.to_string(),
                min,
                max
            ),
            OptionType::Float { min, max } => format!(
                "option name {} type float default {} min {} max {}",
                name,
                current_value.to_string(),
                min,
                max
            ),
            OptionType::Check => format!(
                "option name {} type check default {}",
                name,
                current_value.to_string()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_range() {
        let spin = OptionType::Spin { min: 2, max: 200 };
        assert!(spin.validate("20").is_ok());
        assert!(spin.validate("1").is_err());
        assert!(spin.validate("2.5").is_err());
    }

    #[test]
    fn test_float_range() {
        let float = OptionType::Float { min: 0.0, max: 1.0 };
        assert!(float.validate("0.8").is_ok());
        assert!(float.validate("1").is_ok());
        assert!(float.validate("1.01").is_err());
        assert!(float.validate("high").is_err());
    }

    #[test]
    fn test_check() {
        assert!(OptionType::Check.validate("true").is_ok());
        assert!(OptionType::Check.validate("yes").is_err());
    }

    #[test]
    fn test_option_lines() {
        assert_eq!(
            OptionType::Float { min: 0.0, max: 1.0 }.to_protocol("SuccessThreshold", &0.8),
            "option name SuccessThreshold type float default 0.8 min 0 max 1"
        );
        assert_eq!(
            OptionType::Check.to_protocol("HeuristicWeighted", &true),
            "option name HeuristicWeighted type check default true"
        );
    }
}
