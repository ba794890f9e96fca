use {
  crate::{Address, Amount, ProgramId},
  serde::{Deserialize, Serialize},
};

/// One entry of a program's contribution ledger.
///
/// The ledger is append-only and owned by the contract; entries are read
/// back one at a time by `(program id, index)`. An entry whose
/// contributor is the zero address marks the position one past the last
/// real record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
  pub contributor: Address,
  pub amount: Amount,
}

impl Contribution {
  /// The record returned by the ledger for the index just past its last
  /// real entry.
  pub const SENTINEL: Contribution = Contribution {
    contributor: Address::ZERO,
    amount: 0,
  };

  pub fn is_sentinel(&self) -> bool {
    self.contributor.is_zero()
  }
}

/// A withdrawal made by a program's responsible party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
  pub program_id: ProgramId,
  pub amount: Amount,
  pub desc: String,

  /// Unix seconds at which the withdrawal happened.
  pub time: u64,
}
