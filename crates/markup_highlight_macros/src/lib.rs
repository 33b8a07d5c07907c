mod ascii_table;

use crate::ascii_table::generate_byte_lookup_table_impl;
use proc_macro::TokenStream;

/// Generate a 256-entry byte classification table along with an enum of the
/// named categories and `is_*` predicate functions for each of them. Bytes
/// not named by any category are `PLAIN`; bytes above 127 are `UNICODE`.
///
/// ```ignore
/// generate_byte_lookup_table!(
///     STRUCTURAL_BYTES, ByteType,
///     SPACE => b"\t\n\r ",
///     COMMA => b",",
/// );
/// ```
#[proc_macro]
pub fn generate_byte_lookup_table(input: TokenStream) -> TokenStream {
    generate_byte_lookup_table_impl(input)
}
