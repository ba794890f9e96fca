use {
  crate::reader::{ContractReader, ReadError},
  monfund_primitives::{
    Address,
    Amount,
    Contribution,
    Event,
    Program,
    ProgramId,
    ProgramStatus,
    Withdrawal,
  },
  std::{cmp::Ordering, collections::HashMap},
  thiserror::Error,
  tokio::sync::RwLock,
};

/// Rejected contract write. Variants mirror the custom errors of the
/// on-chain contract ABI.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractError {
  #[error("caller is not the program's responsible party")]
  CallerNotPic,

  #[error("program {0} does not exist")]
  UnknownProgram(ProgramId),

  #[error("program no longer accepts contributions")]
  ProgramEnd,

  #[error("contribution amount must be positive")]
  ZeroContribution,

  #[error("the fundraise is not closed")]
  FundraiseIsNotClosed,

  #[error("withdraw amount out of range")]
  WithdrawAmount,

  #[error("only active programs can be canceled")]
  CancelFailed,

  #[error("account {0} is not the contract owner")]
  NotOwner(Address),

  #[error("invalid new owner {0}")]
  InvalidOwner(Address),

  #[error("invalid program: {0}")]
  InvalidProgram(&'static str),
}

struct ProgramEntry {
  program: Program,
  ledger: Vec<Contribution>,
  withdrawals: Vec<Withdrawal>,

  /// When set, every ledger read at >= this index fails. Fault
  /// injection hook for exercising the scan failure path.
  poisoned_from: Option<u64>,
}

struct Inner {
  owner: Address,
  next_id: u64,
  order: Vec<ProgramId>,
  programs: HashMap<ProgramId, ProgramEntry>,
  events: Vec<Event>,
  now: u64,
}

/// In-process model of the MonFund crowdfunding contract.
///
/// Implements the complete read and write surface of the contract with
/// the same revert rules, so it can stand in for the chain in tests and
/// local dev scenarios. Time is modeled as an explicit clock set through
/// [`InMemoryContract::set_now`] instead of wall time, which keeps
/// date-window behavior deterministic.
pub struct InMemoryContract {
  inner: RwLock<Inner>,
}

impl InMemoryContract {
  pub fn new(owner: Address) -> Self {
    Self {
      inner: RwLock::new(Inner {
        owner,
        next_id: 1,
        order: vec![],
        programs: HashMap::new(),
        events: vec![],
        now: 0,
      }),
    }
  }

  /// Moves the contract clock, unix seconds. Never moves backwards.
  pub async fn set_now(&self, now: u64) {
    let mut inner = self.inner.write().await;
    inner.now = inner.now.max(now);
  }

  pub async fn now(&self) -> u64 {
    self.inner.read().await.now
  }

  /// Every event emitted so far, in emission order.
  pub async fn events(&self) -> Vec<Event> {
    self.inner.read().await.events.clone()
  }

  /// Makes every ledger read of `id` at index >= `from_index` fail with
  /// a transport error, simulating an RPC boundary that degrades
  /// mid-scan.
  pub async fn poison_ledger(&self, id: ProgramId, from_index: u64) {
    let mut inner = self.inner.write().await;
    if let Some(entry) = inner.programs.get_mut(&id) {
      entry.poisoned_from = Some(from_index);
    }
  }

  #[allow(clippy::too_many_arguments)]
  pub async fn create_program(
    &self,
    title: impl Into<String>,
    desc: impl Into<String>,
    image: impl Into<String>,
    pic: Address,
    target_fund: Amount,
    start_date: u64,
    end_date: u64,
  ) -> Result<ProgramId, ContractError> {
    if target_fund == 0 {
      return Err(ContractError::InvalidProgram("zero funding target"));
    }
    if end_date <= start_date {
      return Err(ContractError::InvalidProgram("end date before start date"));
    }

    let mut inner = self.inner.write().await;
    let id = ProgramId(inner.next_id);
    inner.next_id += 1;

    let program = Program {
      id,
      title: title.into(),
      image: image.into(),
      desc: desc.into(),
      pic,
      target_fund,
      start_date,
      end_date,
      total_amount: 0,
      withdraw_amount: 0,
      status: ProgramStatus::Active,
    };

    inner.events.push(Event::ProgramCreated {
      id,
      title: program.title.clone(),
      pic,
      target_fund,
      start_date,
      end_date,
    });
    inner.order.push(id);
    inner.programs.insert(id, ProgramEntry {
      program,
      ledger: vec![],
      withdrawals: vec![],
      poisoned_from: None,
    });

    Ok(id)
  }

  pub async fn contribute(
    &self,
    sender: Address,
    id: ProgramId,
    amount: Amount,
  ) -> Result<(), ContractError> {
    if amount == 0 {
      return Err(ContractError::ZeroContribution);
    }

    let mut inner = self.inner.write().await;
    let now = inner.now;
    let entry = inner
      .programs
      .get_mut(&id)
      .ok_or(ContractError::UnknownProgram(id))?;

    if !entry.program.accepts_contributions(now) {
      return Err(ContractError::ProgramEnd);
    }

    entry.ledger.push(Contribution {
      contributor: sender,
      amount,
    });
    entry.program.total_amount += amount;
    if entry.program.total_amount >= entry.program.target_fund {
      entry.program.status = ProgramStatus::Completed;
    }

    let total_collected = entry.program.total_amount;
    inner.events.push(Event::ContributionReceived {
      program_id: id,
      contributor: sender,
      amount,
      total_collected,
    });

    Ok(())
  }

  pub async fn withdraw(
    &self,
    sender: Address,
    id: ProgramId,
    amount: Amount,
    desc: impl Into<String>,
  ) -> Result<(), ContractError> {
    let mut inner = self.inner.write().await;
    let now = inner.now;
    let entry = inner
      .programs
      .get_mut(&id)
      .ok_or(ContractError::UnknownProgram(id))?;

    if !entry.program.is_responsible(&sender) {
      return Err(ContractError::CallerNotPic);
    }

    let closed = match entry.program.status {
      ProgramStatus::Completed => true,
      ProgramStatus::Active => now > entry.program.end_date,
      ProgramStatus::Canceled => false,
    };
    if !closed {
      return Err(ContractError::FundraiseIsNotClosed);
    }

    if amount == 0 || amount > entry.program.available() {
      return Err(ContractError::WithdrawAmount);
    }

    let desc = desc.into();
    entry.program.withdraw_amount += amount;
    entry.withdrawals.push(Withdrawal {
      program_id: id,
      amount,
      desc: desc.clone(),
      time: now,
    });
    inner.events.push(Event::FundsWithdrawn {
      program_id: id,
      recipient: sender,
      amount,
      desc,
      timestamp: now,
    });

    Ok(())
  }

  pub async fn cancel_and_refund(
    &self,
    sender: Address,
    id: ProgramId,
  ) -> Result<(), ContractError> {
    let mut inner = self.inner.write().await;
    let owner = inner.owner;
    let entry = inner
      .programs
      .get_mut(&id)
      .ok_or(ContractError::UnknownProgram(id))?;

    if !entry.program.is_responsible(&sender) && sender != owner {
      return Err(ContractError::CallerNotPic);
    }
    if entry.program.status != ProgramStatus::Active {
      return Err(ContractError::CancelFailed);
    }

    entry.program.status = ProgramStatus::Canceled;

    // net refund per contributor, in first-contribution order
    let mut refunds: Vec<(Address, Amount)> = vec![];
    for record in &entry.ledger {
      match refunds.iter_mut().find(|(a, _)| *a == record.contributor) {
        Some((_, amount)) => *amount += record.amount,
        None => refunds.push((record.contributor, record.amount)),
      }
    }

    for (contributor, amount) in refunds {
      inner.events.push(Event::RefundIssued {
        program_id: id,
        contributor,
        amount,
      });
    }
    inner.events.push(Event::ProgramCanceled {
      program_id: id,
      canceller: sender,
    });

    Ok(())
  }

  pub async fn transfer_ownership(
    &self,
    sender: Address,
    new_owner: Address,
  ) -> Result<(), ContractError> {
    let mut inner = self.inner.write().await;
    if sender != inner.owner {
      return Err(ContractError::NotOwner(sender));
    }
    if new_owner.is_zero() {
      return Err(ContractError::InvalidOwner(new_owner));
    }

    let previous_owner = inner.owner;
    inner.owner = new_owner;
    inner.events.push(Event::OwnershipTransferred {
      previous_owner,
      new_owner,
    });

    Ok(())
  }
}

impl ContractReader for InMemoryContract {
  async fn program_ids(&self) -> Result<Vec<ProgramId>, ReadError> {
    Ok(self.inner.read().await.order.clone())
  }

  async fn program_by_id(
    &self,
    id: ProgramId,
  ) -> Result<Option<Program>, ReadError> {
    let inner = self.inner.read().await;
    Ok(inner.programs.get(&id).map(|entry| entry.program.clone()))
  }

  async fn contribution_at(
    &self,
    id: ProgramId,
    index: u64,
  ) -> Result<Contribution, ReadError> {
    let inner = self.inner.read().await;
    let entry = inner
      .programs
      .get(&id)
      .ok_or_else(|| ReadError::Reverted(format!("unknown program {id}")))?;

    if let Some(from) = entry.poisoned_from {
      if index >= from {
        return Err(ReadError::Transport("injected read failure".into()));
      }
    }

    // one sentinel slot past the last record, reverts beyond it
    match index.cmp(&(entry.ledger.len() as u64)) {
      Ordering::Less => Ok(entry.ledger[index as usize]),
      Ordering::Equal => Ok(Contribution::SENTINEL),
      Ordering::Greater => Err(ReadError::Reverted(format!(
        "contribution index {index} out of range for program {id}"
      ))),
    }
  }

  async fn withdrawals_by_program(
    &self,
    id: ProgramId,
  ) -> Result<Vec<Withdrawal>, ReadError> {
    let inner = self.inner.read().await;
    Ok(
      inner
        .programs
        .get(&id)
        .map(|entry| entry.withdrawals.clone())
        .unwrap_or_default(),
    )
  }

  async fn owner(&self) -> Result<Address, ReadError> {
    Ok(self.inner.read().await.owner)
  }
}
