//! CSV readers for ledger inputs and the settlement writer.

pub mod expense_reader;
pub mod participant_reader;
pub mod rate_reader;
pub mod settlement_writer;

use std::io::Read;

/// Whitespace is trimmed and short records are tolerated in every input file.
pub(crate) fn reader_from<R: Read>(source: R) -> ::csv::Reader<R> {
    ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .flexible(true)
        .from_reader(source)
}
