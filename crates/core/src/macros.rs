/// Define a closed set of string-valued states stored as TEXT columns.
///
/// Generates the enum (serialized with the same string as the database
/// value), a `VALID_*` list, `as_str`, `from_str_value` and `Display`.
macro_rules! define_str_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal, $valid:ident) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $val)] $variant ),+
        }

        /// All valid database string values, in declaration order.
        pub const $valid: &[&str] = &[$($val),+];

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Convert to the database string value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $val ),+
                }
            }

            /// Convert from a database string value.
            pub fn from_str_value(s: &str) -> Result<Self, $crate::error::CoreError> {
                match s {
                    $( $val => Ok(Self::$variant), )+
                    _ => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} '{s}'. Must be one of: {}",
                        $label,
                        $valid.join(", ")
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use define_str_enum;
