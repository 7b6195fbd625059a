//! Shared plumbing for per-operation option structs.

use crate::client::request::FilePart;
use crate::{Error, Result};
use std::collections::HashMap;

/// Implemented by every `*Options` struct.
pub trait RequestOptions: Sized {
    fn headers(&self) -> &HashMap<String, String>;

    fn headers_mut(&mut self) -> &mut HashMap<String, String>;

    /// Check required fields before anything is sent.
    fn validate(&self) -> Result<()>;

    fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers_mut().insert(name.into(), value.into());
        self
    }

    fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers_mut().extend(headers);
        self
    }
}

/// Presence check for a required option field.
pub trait Required {
    fn is_present(&self) -> bool;
}

impl Required for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl<T> Required for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Required for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl Required for FilePart {
    fn is_present(&self) -> bool {
        true
    }
}

pub fn require<T: Required>(field: &str, value: &T) -> Result<()> {
    if value.is_present() {
        Ok(())
    } else {
        Err(Error::missing_parameter(field))
    }
}

/// Implement [`RequestOptions`] for an options struct with a `headers` field,
/// listing the fields that must be present.
macro_rules! request_options {
    ($ty:ty) => {
        request_options!($ty;);
    };
    ($ty:ty; $($field:ident),*) => {
        impl $crate::client::options::RequestOptions for $ty {
            fn headers(&self) -> &::std::collections::HashMap<String, String> {
                &self.headers
            }

            fn headers_mut(&mut self) -> &mut ::std::collections::HashMap<String, String> {
                &mut self.headers
            }

            fn validate(&self) -> $crate::Result<()> {
                $( $crate::client::options::require(stringify!($field), &self.$field)?; )*
                Ok(())
            }
        }
    };
}

pub(crate) use request_options;

/// Generate `with_*` setters for optional (`Option<T>`) fields.
macro_rules! option_setters {
    ($ty:ty { $($setter:ident => $field:ident: $inner:ty),* $(,)? }) => {
        impl $ty {
            $(
                pub fn $setter(mut self, value: impl Into<$inner>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }
    };
}

pub(crate) use option_setters;
