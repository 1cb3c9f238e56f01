//! Macro for implementing token conversions on field enums
//!
//! Persisted configuration stores enum variants as plain string tokens. This
//! macro generates the `Display`/`FromStr` pair together with an `as_str`
//! accessor and an `ALL` table so the token list is declared exactly once.
//!
//! # Example
//!
//! ```rust
//! use namecast_domain::impl_token_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Email,
//!     Sms,
//! }
//!
//! impl_token_conversions!(Channel {
//!     Email => "email",
//!     Sms => "sms",
//! });
//!
//! assert_eq!("sms".parse::<Channel>(), Ok(Channel::Sms));
//! assert_eq!(Channel::ALL.len(), 2);
//! ```

/// Implements `as_str`, `ALL`, `Display` and `FromStr` for token enums.
///
/// Parsing is exact: tokens are stored verbatim, so `"Email"` is not the same
/// token as `"email"`.
#[macro_export]
macro_rules! impl_token_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$enum_name] = &[$(Self::$variant,)+];

            /// The persisted token for this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
