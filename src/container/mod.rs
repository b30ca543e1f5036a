use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

mod error;

pub use error::{Error, Result};

/// The maximum allowed length for a [`ContainerID`].
const CONTAINER_ID_MAX_LEN: usize = 255;

/// A validated container identifier.
///
/// Identifiers are opaque and only valid at query time; a restarted container may
/// come back under a different one.
///
/// # Examples
///
/// ```
/// # use epa_reporter::container::ContainerID;
/// let raw_id = "4b1d0e5e2f8c7a9b3c6d1e0f2a4b6c8d0e1f3a5b7c9d1e3f5a7b9c1d3e5f7a9b";
/// let container_id = ContainerID::new(raw_id).unwrap();
/// assert_eq!(container_id.as_ref(), raw_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerID(Arc<str>);

impl ContainerID {
    /// Creates a new `ContainerID` from the given raw id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContainerID`] if the input is empty or its length exceeds
    /// [`CONTAINER_ID_MAX_LEN`].
    pub fn new(src: impl AsRef<str>) -> Result<Self> {
        let src = src.as_ref();
        if src.is_empty() || src.len() > CONTAINER_ID_MAX_LEN {
            return Err(Error::InvalidContainerID(src.to_owned()));
        }

        Ok(Self(src.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContainerID {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl AsRef<str> for ContainerID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContainerID {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_id_valid() {
        let id = ContainerID::new("c1").unwrap();
        assert_eq!(id.as_str(), "c1");
        assert_eq!(id.to_string(), "c1");
    }

    #[test]
    fn test_container_id_empty() {
        let err = ContainerID::new("").unwrap_err();
        assert!(matches!(err, Error::InvalidContainerID(ref raw) if raw.is_empty()));
    }

    #[test]
    fn test_container_id_too_long() {
        let raw = "a".repeat(CONTAINER_ID_MAX_LEN + 1);
        assert!(ContainerID::new(&raw).is_err());
        assert!(ContainerID::new(&raw[..CONTAINER_ID_MAX_LEN]).is_ok());
    }

    #[test]
    fn test_container_id_try_from_string() {
        let id = ContainerID::try_from("abc123".to_owned()).unwrap();
        assert_eq!(id.as_ref(), "abc123");

        let err = ContainerID::try_from(String::new()).unwrap_err();
        assert!(err.to_string().contains("invalid container id"));
    }
}
