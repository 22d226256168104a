use crate::impl_case_insensitive_enum;

/// When the interceptor runs relative to the original method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PluginType {
    Before,
    #[default]
    After,
    Around,
}

impl_case_insensitive_enum!(
    PluginType,
    Before => "before",
    After => "after",
    Around => "around"
);

/// Application area the interception is registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PluginScope {
    #[default]
    All,
    Frontend,
    Backend,
    WebApi,
    GraphQl,
}

impl_case_insensitive_enum!(
    PluginScope,
    All => "all",
    Frontend => "frontend",
    Backend => "backend",
    WebApi => "webapi",
    GraphQl => "graphql"
);

impl PluginScope {
    pub const ALL: [PluginScope; 5] = [
        PluginScope::All,
        PluginScope::Frontend,
        PluginScope::Backend,
        PluginScope::WebApi,
        PluginScope::GraphQl,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form_defaults() {
        assert_eq!(PluginType::default(), PluginType::After);
        assert_eq!(PluginScope::default(), PluginScope::All);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Around".parse::<PluginType>().unwrap(), PluginType::Around);
        assert_eq!("WebApi".parse::<PluginScope>().unwrap(), PluginScope::WebApi);
        assert_eq!("GRAPHQL".parse::<PluginScope>().unwrap(), PluginScope::GraphQl);
        assert!("sideways".parse::<PluginType>().is_err());
    }

    #[test]
    fn test_scope_values_cover_every_variant() {
        let values: Vec<&str> = PluginScope::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(values, PluginScope::VALUES);
    }
}
