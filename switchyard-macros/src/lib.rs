//! Procedural macros for Switchyard.
//!
//! Use these through the `switchyard` crate (feature `macros`); the generated
//! code refers to `::switchyard` paths.

use proc_macro::TokenStream;

mod table;

/// Derive `Table` for a unit-only enum.
///
/// Each variant resolves to `"{module}/{route}"`. The module comes from the
/// optional `#[table(module = "...")]` attribute; the route defaults to the
/// snake_case variant name and can be overridden with `#[route("...")]`.
/// Also generates an associated `URLS` constant listing every key.
#[proc_macro_derive(Table, attributes(table, route))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    table::derive_table_impl(input)
}
