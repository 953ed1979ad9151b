/// Defines a closed enumeration of wire codes and generates:
/// - derives (Debug, Copy, Clone, PartialEq, Eq, Hash)
/// - [`CodeEnum`](crate::models::CodeEnum) (ordered `ALL`, `code`, `from_code`)
/// - an inherent `as_str` returning the code
/// - `Display`, `FromStr` and `TryFrom<&str>` by exact code
/// - serde `Serialize`/`Deserialize` by code
///
/// Usage:
///   define_code_enum!(Existence { Present => "PRESENT", Deleted => "DELETED" });
#[macro_export]
macro_rules! define_code_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// The wire code.
            pub fn as_str(&self) -> &'static str {
                $crate::models::CodeEnum::code(self)
            }
        }

        impl $crate::models::CodeEnum for $name {
            const NAME: &'static str = stringify!($name);
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::models::CodeEnum::code(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::models::UnknownEnumValue;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <$name as $crate::models::CodeEnum>::from_code(s).ok_or_else(|| {
                    $crate::models::UnknownEnumValue {
                        enum_name: stringify!($name),
                        value: s.to_string(),
                    }
                })
            }
        }

        impl ::std::convert::TryFrom<&str> for $name {
            type Error = $crate::models::UnknownEnumValue;

            fn try_from(s: &str) -> ::std::result::Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::models::CodeEnum::code(self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let code = <::std::string::String as serde::Deserialize>::deserialize(deserializer)?;
                code.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}
