/// Statically shaped value returned when a facade call fails.
///
/// Implementations fill every field with its placeholder and set `error` to
/// `message`. Each result type has exactly one implementation, so every
/// failure path of every method returning that type looks the same.
pub trait Fallback: Sized {
    fn fallback(message: &str) -> Self;

    /// Field names to look for when the remote answer has to be salvaged
    /// from plain text.
    fn salvage_fields() -> &'static [&'static str] {
        &[]
    }

    /// The `error` field of a value of this type
    fn error(&self) -> Option<&str>;
}

/// Shorthand for result types whose placeholder is `Default` plus `error`.
macro_rules! default_fallback {
    ($ty:ty) => {
        impl $crate::fallback::Fallback for $ty {
            fn fallback(message: &str) -> Self {
                Self {
                    error: Some(message.to_string()),
                    ..Default::default()
                }
            }

            fn error(&self) -> Option<&str> {
                self.error.as_deref()
            }
        }
    };
}

pub(crate) use default_fallback;
