use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn allocation_failed(type_name: &'static str, count: usize, size: usize) -> Error {
        Error(
            ErrorKind::AllocationFailed {
                type_name,
                count,
                size,
            }
            .into(),
        )
    }

    pub fn null_release_function(type_name: &'static str) -> Error {
        Error(ErrorKind::NullReleaseFunction { type_name }.into())
    }

    /// Returns `true` if this error reports that the allocator returned null.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self.kind(), ErrorKind::AllocationFailed { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("failed to allocate {count} x {size} bytes for '{type_name}'")]
    AllocationFailed {
        type_name: &'static str,
        count: usize,
        size: usize,
    },

    #[error("null release function supplied for '{type_name}'")]
    NullReleaseFunction { type_name: &'static str },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
