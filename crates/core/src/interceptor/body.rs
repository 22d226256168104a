//! Method body templates, one per plugin type

use crate::types::PluginType;

pub const PLACEHOLDER_COMMENT: &str = "//Your plugin code";

type BodyTemplate = fn(&str) -> String;

fn template(plugin_type: PluginType) -> BodyTemplate {
    match plugin_type {
        PluginType::Before => before_body,
        PluginType::Around => around_body,
        PluginType::After => after_body,
    }
}

/// Returns the (possibly modified) arguments for the original method
fn before_body(args: &str) -> String {
    format!("{PLACEHOLDER_COMMENT}\nreturn [{args}];")
}

fn around_body(args: &str) -> String {
    format!("{PLACEHOLDER_COMMENT}\n$result = $proceed({args});\nreturn $result;")
}

fn after_body(_args: &str) -> String {
    format!("{PLACEHOLDER_COMMENT}\nreturn $result;")
}

/// Renders the body for `plugin_type`, forwarding `args` where the template calls for it
pub fn render(plugin_type: PluginType, args: &[String]) -> String {
    template(plugin_type)(&args.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_before_returns_argument_list() {
        assert_eq!(
            render(PluginType::Before, &args(&["$sku", "$storeId"])),
            "//Your plugin code\nreturn [$sku, $storeId];"
        );
        assert_eq!(render(PluginType::Before, &[]), "//Your plugin code\nreturn [];");
    }

    #[test]
    fn test_around_calls_proceed() {
        assert_eq!(
            render(PluginType::Around, &args(&["...$args"])),
            "//Your plugin code\n$result = $proceed(...$args);\nreturn $result;"
        );
    }

    #[test]
    fn test_after_returns_result() {
        assert_eq!(
            render(PluginType::After, &args(&["$sku"])),
            "//Your plugin code\nreturn $result;"
        );
    }
}
