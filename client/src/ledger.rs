use {
  crate::reader::{ContractReader, ReadError},
  futures::{stream, Stream},
  monfund_primitives::{Contribution, ProgramId},
};

/// Upper bound on indexed ledger reads per program scan.
///
/// The contract does not expose ledger lengths, so a scan walks records
/// one read at a time until it hits the sentinel. The cap bounds the
/// worst-case number of reads for a single program. Known limitation:
/// records at indexes >= the cap are invisible to a scan, so heavily
/// funded programs undercount contributors whose records sit past it.
pub const MAX_LEDGER_SCAN: u64 = 100;

/// Why a ledger scan stopped producing records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEnd {
  /// The sentinel record was read: the true end of the ledger.
  Sentinel,

  /// The read cap was reached before the sentinel.
  Truncated,

  /// An indexed read failed. The ledger may well hold further records;
  /// a failure at index N is indistinguishable from the ledger ending
  /// at N as far as the scan is concerned, but the cause is preserved
  /// here for callers that want to tell the two apart.
  Failed(ReadError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEntry {
  Record(Contribution),
  End(ScanEnd),
}

enum Cursor {
  Read(u64),
  Done,
}

/// Walks a program's contribution ledger one indexed read at a time.
///
/// Yields every real record in insertion order, then exactly one
/// [`LedgerEntry::End`] describing why the walk stopped, then the stream
/// is exhausted. Reads are strictly sequential: index N+1 is requested
/// only after the read at index N resolved. The stream is lazy and
/// issues no read until polled.
pub fn scan_ledger<R: ContractReader>(
  reader: &R,
  program: ProgramId,
  cap: u64,
) -> impl Stream<Item = LedgerEntry> + '_ {
  stream::unfold(Cursor::Read(0), move |cursor| async move {
    let index = match cursor {
      Cursor::Read(index) => index,
      Cursor::Done => return None,
    };

    if index >= cap {
      return Some((LedgerEntry::End(ScanEnd::Truncated), Cursor::Done));
    }

    match reader.contribution_at(program, index).await {
      Ok(record) if record.is_sentinel() => {
        Some((LedgerEntry::End(ScanEnd::Sentinel), Cursor::Done))
      }
      Ok(record) => {
        Some((LedgerEntry::Record(record), Cursor::Read(index + 1)))
      }
      Err(e) => Some((LedgerEntry::End(ScanEnd::Failed(e)), Cursor::Done)),
    }
  })
}
