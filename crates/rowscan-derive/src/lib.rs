use proc_macro::TokenStream;

mod record;
mod util;

/// Derive `Record`, `RecordFields` and `ScanElement` (for `T` and `Box<T>`).
///
/// Field attributes, all under `#[scan(...)]`:
/// - `rename = "col"`: match this column name instead of the normalized field name
/// - `skip`: never scanned; keeps its `Default` value
/// - `embed`: nested record addressed as `field.child`
/// - `flatten`: nested record whose children answer to their own names
#[proc_macro_derive(Record, attributes(scan))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input.into()).into()
}
