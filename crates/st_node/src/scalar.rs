use core::fmt;
use core::str::FromStr;
use std::borrow::Cow;
use std::sync::Arc;

use crate::NodeError;
use crate::text::quote;

/// Texts accepted as `true` by [`ScalarNode::to_bool`], compared case-insensitively.
pub const TRUE_WORDS: &[&str] = &["true", "yes", "1", "t", "y"];

// -----------------------------------------------------------------------------
// ScalarNode

/// A leaf node holding the textual form of a value, or null.
///
/// The text is immutable and shared: cloning a scalar never copies it. The
/// comment list stays mutable.
///
/// ```
/// use st_node::ScalarNode;
///
/// let port = ScalarNode::new("8080");
/// assert_eq!(port.parse::<u16>().unwrap(), 8080);
///
/// let flag = ScalarNode::new("Yes");
/// assert!(flag.to_bool());
///
/// assert!(ScalarNode::null().is_null());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ScalarNode {
    value: Option<Arc<str>>,
    comments: Vec<String>,
}

impl ScalarNode {
    /// Creates a scalar holding `text`.
    #[inline]
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self {
            value: Some(text.into()),
            comments: Vec::new(),
        }
    }

    /// Creates a null scalar.
    #[inline]
    pub const fn null() -> Self {
        Self {
            value: None,
            comments: Vec::new(),
        }
    }

    /// Creates a scalar from the [`Display`](fmt::Display) form of `value`.
    pub fn from_display(value: impl fmt::Display) -> Self {
        Self::new(value.to_string())
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// The text, or `None` for a null scalar.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The text, or [`NodeError::NullValue`] for a null scalar.
    pub fn require(&self) -> Result<&str, NodeError> {
        self.as_str().ok_or(NodeError::NullValue)
    }

    /// The text as it is written in a document: quoted if needed, bare `null`
    /// for null.
    pub fn quoted(&self) -> Cow<'_, str> {
        match self.as_str() {
            Some(text) => quote(text),
            None => Cow::Borrowed("null"),
        }
    }

    /// Parses the text with [`FromStr`]; numbers use Rust's locale-independent
    /// grammar. The text is parsed as stored, so surrounding whitespace is an
    /// error.
    pub fn parse<T>(&self) -> Result<T, NodeError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let text = self.require()?;
        text.parse::<T>().map_err(|e| NodeError::Convert {
            text: text.to_owned(),
            target: core::any::type_name::<T>(),
            reason: e.to_string(),
        })
    }

    #[inline]
    pub fn to_i32(&self) -> Result<i32, NodeError> {
        self.parse()
    }

    #[inline]
    pub fn to_i64(&self) -> Result<i64, NodeError> {
        self.parse()
    }

    #[inline]
    pub fn to_f32(&self) -> Result<f32, NodeError> {
        self.parse()
    }

    #[inline]
    pub fn to_f64(&self) -> Result<f64, NodeError> {
        self.parse()
    }

    /// Lenient boolean conversion.
    ///
    /// Returns `true` when the text matches one of [`TRUE_WORDS`] ignoring case,
    /// and `false` for anything else, including null and unrecognized text.
    /// This never fails.
    pub fn to_bool(&self) -> bool {
        self.as_str().is_some_and(|text| {
            let text = text.trim();
            TRUE_WORDS.iter().any(|word| word.eq_ignore_ascii_case(text))
        })
    }

    #[inline]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    #[inline]
    pub fn comments_mut(&mut self) -> &mut Vec<String> {
        &mut self.comments
    }

    /// Shares the text of `self` with another scalar.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for ScalarNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(text) => write!(f, "Scalar({text:?})"),
            None => f.write_str("Scalar(null)"),
        }
    }
}

impl fmt::Display for ScalarNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.quoted())
    }
}

impl From<&str> for ScalarNode {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ScalarNode {
    #[inline]
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T: Into<ScalarNode>> From<Option<T>> for ScalarNode {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Into::into)
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ScalarNode {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::from_display(value)
                }
            }
        )*
    };
}

impl_from_display!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ScalarNode;
    use crate::NodeError;

    #[test]
    fn numbers_parse_locale_independent() {
        assert_eq!(ScalarNode::new("42").to_i32().unwrap(), 42);
        assert_eq!(ScalarNode::new("-9000000000").to_i64().unwrap(), -9_000_000_000);
        assert_eq!(ScalarNode::new("1.5").to_f64().unwrap(), 1.5);
        assert_eq!(ScalarNode::new("2.25").to_f32().unwrap(), 2.25);
        assert!(matches!(
            ScalarNode::new("1,5").to_f64(),
            Err(NodeError::Convert { .. })
        ));
        assert!(matches!(
            ScalarNode::null().to_i32(),
            Err(NodeError::NullValue)
        ));
    }

    #[test]
    fn padded_numbers_are_rejected() {
        for text in [" 1", "1 ", "\t2"] {
            let err = ScalarNode::new(text).to_i32().unwrap_err();
            assert!(matches!(err, NodeError::Convert { text: ref t, .. } if t == text));
        }
        assert!(ScalarNode::new(" 1.5").to_f64().is_err());
    }

    #[test]
    fn boolean_is_lenient() {
        for text in ["true", "TRUE", "yes", "Y", "t", "1"] {
            assert!(ScalarNode::new(text).to_bool(), "{text}");
        }
        // Unrecognized text is `false`, never an error.
        for text in ["false", "no", "0", "on", "enabled", "", "garbage"] {
            assert!(!ScalarNode::new(text).to_bool(), "{text}");
        }
        assert!(!ScalarNode::null().to_bool());
    }

    #[test]
    fn clone_shares_text() {
        let mut a = ScalarNode::new("shared");
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        a.comments_mut().push("only on a".into());
        assert!(b.comments().is_empty());
    }

    #[test]
    fn null_is_written_bare() {
        assert_eq!(ScalarNode::null().quoted(), "null");
        assert_eq!(ScalarNode::new("null").quoted(), "\"null\"");
        assert_eq!(ScalarNode::from(Some(3)).as_str(), Some("3"));
        assert!(ScalarNode::from(None::<i32>).is_null());
    }
}
