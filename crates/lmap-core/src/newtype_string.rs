//! Macro for non-empty string newtypes used as table identities.

/// Define a strongly-typed, non-empty string newtype.
///
/// Generates the struct (ordered, hashable, serialized as a plain string), a
/// `Deserialize` that rejects empty strings, `try_new`/`as_str`/`into_inner`,
/// and the `Display`, `Deref<Target=str>`, `Borrow<str>`, `TryFrom` and
/// `PartialEq<str>` impls needed to use it as a map key.
macro_rules! define_newtype_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $Name::try_new(s).ok_or_else(|| {
                    serde::de::Error::custom(concat!(stringify!($Name), " must not be empty"))
                })
            }
        }

        impl $Name {
            /// Wrap a string, returning `None` if it is empty.
            pub fn try_new(value: impl Into<String>) -> Option<Self> {
                let s = value.into();
                if s.is_empty() { None } else { Some(Self(s)) }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str { &self.0 }
        }

        impl std::borrow::Borrow<str> for $Name {
            fn borrow(&self) -> &str { &self.0 }
        }

        impl TryFrom<&str> for $Name {
            type Error = crate::error::CoreError;
            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::try_new(s).ok_or_else(|| crate::error::CoreError::EmptyName {
                    context: stringify!($Name).to_string(),
                })
            }
        }

        impl TryFrom<String> for $Name {
            type Error = crate::error::CoreError;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::try_new(s).ok_or_else(|| crate::error::CoreError::EmptyName {
                    context: stringify!($Name).to_string(),
                })
            }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool { self.0 == other }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool { self.0 == *other }
        }
    };
}

pub(crate) use define_newtype_string;
