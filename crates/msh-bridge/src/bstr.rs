//! UTF-16 string marshalling at the interface boundary

use std::fmt;

use crate::{BridgeError, BridgeResult};

/// Owned UTF-16 string as handed across the external interface
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bstr(Vec<u16>);

impl Bstr {
    /// Encode `s`, failing with `OutOfMemory` if the buffer cannot be allocated
    pub fn try_from_str(s: &str) -> BridgeResult<Self> {
        let units = s.encode_utf16().count();
        let mut buf = Vec::new();
        buf.try_reserve_exact(units).map_err(|_| BridgeError::OutOfMemory)?;
        buf.extend(s.encode_utf16());
        Ok(Self(buf))
    }

    /// Wrap UTF-16 code units received from a caller
    pub fn from_wide(units: &[u16]) -> Self {
        Self(units.to_vec())
    }

    /// Encode `s`, with an empty string as `None`
    pub fn try_nullable(s: &str) -> BridgeResult<Option<Self>> {
        if s.is_empty() {
            return Ok(None);
        }
        Self::try_from_str(s).map(Some)
    }

    /// Length in UTF-16 code units
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode, replacing unpaired surrogates
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }
}

impl fmt::Display for Bstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for Bstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{:?}", self.to_string_lossy())
    }
}

impl PartialEq<str> for Bstr {
    fn eq(&self, other: &str) -> bool {
        self.0.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for Bstr {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

/// Case-insensitive comparison by Unicode lowercase mapping
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
