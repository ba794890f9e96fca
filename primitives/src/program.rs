use {
  crate::Address,
  serde::{Deserialize, Serialize},
  std::fmt::Display,
  thiserror::Error,
};

/// Token amount in wei.
pub type Amount = u128;

/// Identifier of a funding program.
///
/// The contract assigns ids sequentially starting at 1 and never reuses
/// them, including for canceled programs.
#[repr(transparent)]
#[derive(
  Debug,
  Copy,
  Clone,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
pub struct ProgramId(pub u64);

impl Display for ProgramId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<u64> for ProgramId {
  fn from(id: u64) -> Self {
    Self(id)
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid program status discriminant: {0}")]
pub struct InvalidStatus(pub u8);

/// Lifecycle state of a funding program. Discriminants match the
/// on-chain enum encoding.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramStatus {
  Active = 0,
  Completed = 1,
  Canceled = 2,
}

impl TryFrom<u8> for ProgramStatus {
  type Error = InvalidStatus;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(ProgramStatus::Active),
      1 => Ok(ProgramStatus::Completed),
      2 => Ok(ProgramStatus::Canceled),
      other => Err(InvalidStatus(other)),
    }
  }
}

/// A single crowdfunding program as stored by the contract.
///
/// Everything except `total_amount`, `withdraw_amount` and `status` is
/// immutable after creation; those three fields are mutated only by the
/// contract itself in response to contribute, withdraw and
/// cancel-and-refund calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
  pub id: ProgramId,
  pub title: String,
  pub image: String,
  pub desc: String,

  /// Responsible party. The only account allowed to withdraw collected
  /// funds or cancel the program.
  pub pic: Address,

  pub target_fund: Amount,

  /// Funding window, unix seconds.
  pub start_date: u64,
  pub end_date: u64,

  /// Sum of all ledger records for this program.
  pub total_amount: Amount,
  pub withdraw_amount: Amount,
  pub status: ProgramStatus,
}

impl Program {
  /// Whether `addr` is this program's responsible party.
  pub fn is_responsible(&self, addr: &Address) -> bool {
    self.pic == *addr
  }

  /// True while the program can still receive contributions.
  pub fn accepts_contributions(&self, now: u64) -> bool {
    self.status == ProgramStatus::Active && now <= self.end_date
  }

  /// Raised over target, as a fraction. Can exceed 1.0 when a program
  /// is overfunded.
  pub fn funding_ratio(&self) -> f64 {
    match self.target_fund {
      0 => 0.0,
      target => self.total_amount as f64 / target as f64,
    }
  }

  /// Amount still missing to reach the target.
  pub fn remaining(&self) -> Amount {
    self.target_fund.saturating_sub(self.total_amount)
  }

  /// Collected funds that have not been withdrawn by the PIC yet.
  pub fn available(&self) -> Amount {
    self.total_amount.saturating_sub(self.withdraw_amount)
  }
}
