//! Text concatenation reducer.

use std::borrow::Cow;
use std::fmt::{Display, Write};

use super::Reducer;

/// Concatenates the `Display` form of each element in pull order,
/// separated by `separator` and wrapped in `prefix` / `suffix`.
///
/// An empty sequence yields `prefix + suffix`.
#[derive(Clone, Debug, Default)]
pub struct Joining {
    separator: Cow<'static, str>,
    prefix: Cow<'static, str>,
    suffix: Cow<'static, str>,
}

impl<T: Display> Reducer<T> for Joining {
    /// `None` until the first element arrives.
    type Acc = Option<String>;
    type Output = String;

    fn create(&self) -> Option<String> {
        None
    }

    fn add_input(&self, acc: &mut Option<String>, v: T) {
        // Writing into a String cannot fail.
        match acc {
            Some(buf) => {
                buf.push_str(&self.separator);
                let _ = write!(buf, "{v}");
            }
            None => {
                let mut buf = self.prefix.to_string();
                let _ = write!(buf, "{v}");
                *acc = Some(buf);
            }
        }
    }

    fn finish(&self, acc: Option<String>) -> String {
        let mut out = acc.unwrap_or_else(|| self.prefix.to_string());
        out.push_str(&self.suffix);
        out
    }
}

/// Plain concatenation.
#[must_use]
pub const fn joining() -> Joining {
    joining_wrapped("", "", "")
}

/// Concatenation with a separator.
#[must_use]
pub fn joining_with(separator: impl Into<Cow<'static, str>>) -> Joining {
    Joining { separator: separator.into(), ..joining() }
}

/// Concatenation with separator, prefix and suffix.
///
/// ```
/// use seqflow::*;
/// use seqflow::collectors::joining_wrapped;
///
/// let s = of(["A", "B"]).collect(joining_wrapped(", ", "[", "]"))?;
/// assert_eq!(s, "[A, B]");
/// let e = empty::<&str>().collect(joining_wrapped(", ", "[", "]"))?;
/// assert_eq!(e, "[]");
/// # anyhow::Result::<()>::Ok(())
/// ```
#[must_use]
pub const fn joining_wrapped(
    separator: &'static str,
    prefix: &'static str,
    suffix: &'static str,
) -> Joining {
    Joining {
        separator: Cow::Borrowed(separator),
        prefix: Cow::Borrowed(prefix),
        suffix: Cow::Borrowed(suffix),
    }
}
