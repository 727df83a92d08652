//! Chutney is a JSON library built around a six-variant value model, a
//! recursive descent parser, and a structural pretty-printer.
//!
//! Values are assembled programmatically through the builder operations on
//! [`Array`] and [`Object`], parsed from text with [`parse`], and rendered
//! back to indented text through [`Display`](std::fmt::Display). Typed
//! extraction is checked: asking a value for the wrong variant returns a
//! [`TypeMismatch`] instead of misbehaving.
//!
//! # Examples
//!
//! ```
//! use chutney::{parse, Object, Value};
//!
//! let mut user = Object::new();
//! user.set("name", "Ada");
//! user.set("age", 36);
//!
//! let text = Value::from(user).to_string();
//! let reparsed = parse(&text).unwrap();
//! let object = reparsed.get_object().unwrap();
//! assert_eq!(object.get("name").unwrap().get_str(), Ok("Ada"));
//! assert_eq!(object.get("age").unwrap().get_f64(), Ok(36.0));
//! ```

mod cursor;
mod error;
mod format;
mod parse;
mod value;

pub use crate::error::{ParseError, ParseErrorKind, ParseResult, TypeMismatch};
pub use crate::parse::parse;
pub use crate::value::{Array, Object, Value};
