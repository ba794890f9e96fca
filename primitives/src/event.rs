use {
  crate::{Address, Amount, ProgramId},
  serde::{Deserialize, Serialize},
};

/// Events emitted by the crowdfunding contract, in the order they are
/// defined by its ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
  ProgramCreated {
    id: ProgramId,
    title: String,
    pic: Address,
    target_fund: Amount,
    start_date: u64,
    end_date: u64,
  },
  ContributionReceived {
    program_id: ProgramId,
    contributor: Address,
    amount: Amount,

    /// Program total after this contribution was recorded.
    total_collected: Amount,
  },
  FundsWithdrawn {
    program_id: ProgramId,
    recipient: Address,
    amount: Amount,
    desc: String,
    timestamp: u64,
  },
  ProgramCanceled {
    program_id: ProgramId,
    canceller: Address,
  },
  RefundIssued {
    program_id: ProgramId,
    contributor: Address,
    amount: Amount,
  },
  OwnershipTransferred {
    previous_owner: Address,
    new_owner: Address,
  },
}
