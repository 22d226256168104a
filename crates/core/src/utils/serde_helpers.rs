//! Case-insensitive parsing helpers for the small closed enums used in requests

/// Implements case-insensitive `FromStr` and `Deserialize` for a fieldless enum,
/// plus an `as_str` accessor returning the canonical lowercase value.
///
/// Usage:
/// ```ignore
/// impl_case_insensitive_enum!(
///     PluginType,
///     Before => "before",
///     After => "after"
/// );
/// ```
#[macro_export]
macro_rules! impl_case_insensitive_enum {
    ($enum_type:ty, $($variant:ident => $str_val:expr),+ $(,)?) => {
        impl $enum_type {
            /// Every accepted value, in declaration order
            pub const VALUES: &'static [&'static str] = &[$($str_val),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str_val,)+
                }
            }
        }

        impl std::str::FromStr for $enum_type {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $(
                        $str_val => Ok(Self::$variant),
                    )+
                    _ => Err(format!(
                        "unknown variant '{}', expected one of: {}",
                        s,
                        Self::VALUES.join(", ")
                    )),
                }
            }
        }

        impl std::fmt::Display for $enum_type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $enum_type {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}
