use thiserror::Error;

/// Why a panel refused or abandoned an action.
///
/// Backend failures never show up here: panels turn them into fallback
/// turns or the error banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("Input must not be empty")]
    EmptyInput,

    #[error("A request is already in progress")]
    Busy,

    /// The panel was left while its call was in flight.
    #[error("Request cancelled")]
    Cancelled,
}
