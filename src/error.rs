use thiserror::Error;

use crate::DefinitionError;
use crate::parse::ParseError;

/// Unified error type covering parsing, definition checks, and I/O.
///
/// Returned by convenience constructors like
/// [`Converter::from_dsl()`](crate::Converter::from_dsl) and
/// [`Converter::from_file()`](crate::Converter::from_file).
#[derive(Debug, Error)]
pub enum UniconvError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "binary-cache")]
    #[error(transparent)]
    Serialize(#[from] crate::serial::SerializeError),

    #[cfg(feature = "binary-cache")]
    #[error(transparent)]
    Deserialize(#[from] crate::serial::DeserializeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_transparently() {
        let err = UniconvError::from(DefinitionError::UnknownType {
            name: "Shape".into(),
        });
        assert_eq!(err.to_string(), "unknown type 'Shape'");
        assert!(matches!(err, UniconvError::Definition(_)));
    }
}
