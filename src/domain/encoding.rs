use std::{fmt, str::FromStr};

/// The text encoding used to decode an asset's bytes.
///
/// Only the encodings that show up in packaging assets are supported. Names
/// are matched case-insensitively, ignoring `-` and `_`, so `utf8`, `UTF-8`
/// and `utf_8` all select [`Encoding::Utf8`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Strict UTF-8.
    #[default]
    Utf8,
    /// 7-bit ASCII. Any byte with the high bit set is rejected.
    Ascii,
    /// ISO-8859-1. Every byte maps to the code point of the same value.
    Latin1,
}

impl Encoding {
    /// The canonical name of the encoding.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
        }
    }

    /// Decodes `bytes` into a string.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] carrying the offset of the first byte that is
    /// not valid under this encoding. Latin-1 never fails.
    pub fn decode(self, bytes: Vec<u8>) -> Result<String, DecodeError> {
        match self {
            Self::Utf8 => String::from_utf8(bytes).map_err(|e| DecodeError {
                encoding: self,
                offset: e.utf8_error().valid_up_to(),
            }),
            Self::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(DecodeError {
                    encoding: self,
                    offset,
                }),
                // ASCII is a subset of UTF-8
                None => String::from_utf8(bytes).map_err(|e| DecodeError {
                    encoding: self,
                    offset: e.utf8_error().valid_up_to(),
                }),
            },
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = UnknownEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalised.as_str() {
            "utf8" => Ok(Self::Utf8),
            "ascii" | "usascii" => Ok(Self::Ascii),
            "latin1" | "iso88591" => Ok(Self::Latin1),
            _ => Err(UnknownEncodingError(s.to_string())),
        }
    }
}

/// Error returned when bytes are not valid under the declared encoding.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid {encoding} data at byte {offset}")]
pub struct DecodeError {
    /// The encoding the bytes were decoded with.
    pub encoding: Encoding,
    /// Offset of the first invalid byte.
    pub offset: usize,
}

/// Error returned for an encoding name that isn't supported.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown encoding: '{0}'")]
pub struct UnknownEncodingError(String);

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("utf8", Encoding::Utf8; "bare utf8")]
    #[test_case("UTF-8", Encoding::Utf8; "uppercase with dash")]
    #[test_case("utf_8", Encoding::Utf8; "underscore")]
    #[test_case("ascii", Encoding::Ascii; "ascii")]
    #[test_case("US-ASCII", Encoding::Ascii; "us ascii")]
    #[test_case("latin-1", Encoding::Latin1; "latin dash")]
    #[test_case("ISO-8859-1", Encoding::Latin1; "iso name")]
    fn parses_encoding_names(name: &str, expected: Encoding) {
        assert_eq!(name.parse::<Encoding>().unwrap(), expected);
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let error = "ebcdic".parse::<Encoding>().unwrap_err();
        assert_eq!(error.to_string(), "unknown encoding: 'ebcdic'");
    }

    #[test]
    fn default_is_utf8() {
        assert_eq!(Encoding::default(), Encoding::Utf8);
        assert_eq!(Encoding::default().to_string(), "utf8");
    }

    #[test]
    fn utf8_rejects_invalid_bytes() {
        let error = Encoding::Utf8.decode(b"ok\xff\xfe".to_vec()).unwrap_err();
        assert_eq!(
            error,
            DecodeError {
                encoding: Encoding::Utf8,
                offset: 2
            }
        );
    }

    #[test]
    fn ascii_rejects_high_bytes() {
        let error = Encoding::Ascii.decode("caf\u{e9}".as_bytes().to_vec()).unwrap_err();
        assert_eq!(error.offset, 3);
    }

    #[test]
    fn latin1_maps_every_byte() {
        let decoded = Encoding::Latin1.decode(b"caf\xe9".to_vec()).unwrap();
        assert_eq!(decoded, "caf\u{e9}");
    }
}
