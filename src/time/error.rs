/// Caller errors rejected by [`TimeResource`](super::TimeResource).
///
/// Running short of time is not an error: `try_spend` reports it as
/// `Ok(false)`.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TimeError {
    #[error("invalid argument `{name}`: {value} ({requirement})")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },
}

impl TimeError {
    pub(crate) fn non_negative(name: &'static str, value: f64) -> Self {
        Self::InvalidArgument {
            name,
            value,
            requirement: "must be finite and not negative",
        }
    }

    pub(crate) fn positive(name: &'static str, value: f64) -> Self {
        Self::InvalidArgument {
            name,
            value,
            requirement: "must be finite and greater than zero",
        }
    }
}
