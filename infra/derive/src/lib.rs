#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros for the archive workspace.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! lmarc-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a context-aware error type.
///
/// # Injected items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * A companion `<Name>Ext` trait adding `.context(...)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant that wraps a source error.
/// * `From<Source>` for every variant with a `source` field (or a field marked
///   `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * A private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Variants must use named fields. Tuple and unit variants are rejected.
/// 3. A variant wrapping a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use lmarc_derive::lmarc_error;
/// use std::borrow::Cow;
///
/// #[lmarc_error]
/// pub enum ArchiveError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal archive error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(path: &std::path::Path) -> Result<String, ArchiveError> {
///     std::fs::read_to_string(path).context("Reading snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn lmarc_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
