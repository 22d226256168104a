use serde::Serialize;
use std::fmt;

/// One parameter of a generated interceptor method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Parameter {
    /// The intercepted instance, typed as the target class
    Subject { class_name: String },
    /// Return value of the original method (after plugins)
    Result,
    /// Closure invoking the original method (around plugins)
    Proceed,
    /// A parameter taken from the signature table
    Named {
        name: String,
        default: Option<String>,
    },
    /// Arguments whose names are not known statically
    Variadic,
    /// Commented-out marker for the developer to fill in
    Placeholder,
}

pub const VARIADIC_ARGS: &str = "...$args";

impl Parameter {
    /// How the parameter is passed on when calling the original method
    pub fn forwarded(&self) -> Option<String> {
        match self {
            Parameter::Named { name, .. } => Some(format!("${name}")),
            Parameter::Variadic => Some(VARIADIC_ARGS.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Subject { class_name } => write!(f, "{class_name} $subject"),
            Parameter::Result => f.write_str("$result"),
            Parameter::Proceed => f.write_str("\\Closure $proceed"),
            Parameter::Named {
                name,
                default: Some(default),
            } => write!(f, "${name} = {default}"),
            Parameter::Named {
                name,
                default: None,
            } => write!(f, "${name}"),
            Parameter::Variadic => f.write_str(VARIADIC_ARGS),
            Parameter::Placeholder => f.write_str("//$functionParam"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let subject = Parameter::Subject {
            class_name: "\\Magento\\Catalog\\Model\\Product".to_string(),
        };
        assert_eq!(subject.to_string(), "\\Magento\\Catalog\\Model\\Product $subject");
        assert_eq!(Parameter::Proceed.to_string(), "\\Closure $proceed");

        let with_default = Parameter::Named {
            name: "storeId".to_string(),
            default: Some("null".to_string()),
        };
        assert_eq!(with_default.to_string(), "$storeId = null");
        assert_eq!(with_default.forwarded().as_deref(), Some("$storeId"));
    }

    #[test]
    fn test_only_inferred_parameters_are_forwarded() {
        assert_eq!(Parameter::Result.forwarded(), None);
        assert_eq!(Parameter::Proceed.forwarded(), None);
        assert_eq!(Parameter::Placeholder.forwarded(), None);
        assert_eq!(Parameter::Variadic.forwarded().as_deref(), Some("...$args"));
    }
}
