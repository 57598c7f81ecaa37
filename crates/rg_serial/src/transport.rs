use alloc::borrow::Cow;
use alloc::string::String;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::DecodeError;

/// The outer encoding wrapped around the text form.
///
/// # Examples
///
/// ```
/// use rg_serial::Transport;
///
/// let wrapped = Transport::Base64.encode("~n".to_owned());
/// assert_eq!(wrapped, "fm4=");
/// assert_eq!(Transport::Base64.decode(&wrapped).unwrap(), "~n");
///
/// assert_eq!(Transport::Raw.encode("~n".to_owned()), "~n");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    /// Standard alphabet Base64 with padding over the UTF-8 bytes.
    #[default]
    Base64,
    /// The text form as is.
    Raw,
}

impl Transport {
    /// Wraps the text form.
    pub fn encode(self, text: String) -> String {
        match self {
            Self::Base64 => STANDARD.encode(text.as_bytes()),
            Self::Raw => text,
        }
    }

    /// Unwraps data produced by [`encode`](Self::encode).
    ///
    /// Fails with [`DecodeError::Transport`] when the data is not Base64 and
    /// [`DecodeError::InvalidUtf8`] when the payload is not text.
    pub fn decode(self, data: &str) -> Result<Cow<'_, str>, DecodeError> {
        match self {
            Self::Base64 => {
                let bytes = STANDARD.decode(data)?;
                String::from_utf8(bytes)
                    .map(Cow::Owned)
                    .map_err(|_| DecodeError::InvalidUtf8)
            }
            Self::Raw => Ok(Cow::Borrowed(data)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Transport;
    use crate::DecodeError;
    use alloc::string::ToString;

    #[test]
    fn base64_rejects_garbage() {
        let err = Transport::Base64.decode("not base64!!").unwrap_err();
        assert!(matches!(err, DecodeError::Transport(_)));
    }

    #[test]
    fn transport_error_keeps_its_source() {
        use core::error::Error;

        let err = Transport::Base64.decode("fm4").unwrap_err();
        let source = err.source().expect("base64 error as source");
        assert!(source.downcast_ref::<base64::DecodeError>().is_some());
        assert!(err.to_string().starts_with("invalid transport encoding: "));
    }

    #[test]
    fn base64_rejects_non_utf8_payload() {
        // 0xFF 0xFE
        let err = Transport::Base64.decode("//4=").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidUtf8));
    }

    #[test]
    fn raw_borrows_input() {
        let text = "~l0;".to_string();
        let decoded = Transport::Raw.decode(&text).unwrap();
        assert!(matches!(decoded, alloc::borrow::Cow::Borrowed(_)));
    }
}
