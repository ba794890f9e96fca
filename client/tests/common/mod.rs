#![allow(dead_code)]

use {
  monfund_client_sdk::{ContractReader, InMemoryContract, ReadError},
  monfund_primitives::{
    Address,
    Amount,
    Contribution,
    Program,
    ProgramId,
    Withdrawal,
  },
  std::sync::atomic::{AtomicUsize, Ordering},
};

pub fn wallet(seed: u8) -> Address {
  let mut bytes = [0u8; 20];
  bytes[19] = seed;
  Address::new(bytes)
}

/// An active contract with one program per `pics` entry, window
/// [1_000, 2_000], clock at 1_000 and a target high enough that seeded
/// contributions never complete a program.
pub async fn active_contract(pics: &[Address]) -> InMemoryContract {
  let contract = InMemoryContract::new(wallet(0xff));
  contract.set_now(1_000).await;
  for (i, &pic) in pics.iter().enumerate() {
    contract
      .create_program(
        format!("Program #{}", i + 1),
        format!("Scenario program #{}", i + 1),
        format!("program-{}.webp", i + 1),
        pic,
        Amount::MAX / 2,
        1_000,
        2_000,
      )
      .await
      .expect("seeding a scenario program");
  }
  contract
}

/// Counts every read issued through it.
pub struct CountingReader<R> {
  inner: R,
  reads: AtomicUsize,
  ledger_reads: AtomicUsize,
}

impl<R> CountingReader<R> {
  pub fn new(inner: R) -> Self {
    Self {
      inner,
      reads: AtomicUsize::new(0),
      ledger_reads: AtomicUsize::new(0),
    }
  }

  /// Total reads of any kind.
  pub fn reads(&self) -> usize {
    self.reads.load(Ordering::SeqCst)
  }

  /// Indexed ledger reads only.
  pub fn ledger_reads(&self) -> usize {
    self.ledger_reads.load(Ordering::SeqCst)
  }
}

impl<R: ContractReader> ContractReader for CountingReader<R> {
  async fn program_ids(&self) -> Result<Vec<ProgramId>, ReadError> {
    self.reads.fetch_add(1, Ordering::SeqCst);
    self.inner.program_ids().await
  }

  async fn program_by_id(
    &self,
    id: ProgramId,
  ) -> Result<Option<Program>, ReadError> {
    self.reads.fetch_add(1, Ordering::SeqCst);
    self.inner.program_by_id(id).await
  }

  async fn contribution_at(
    &self,
    id: ProgramId,
    index: u64,
  ) -> Result<Contribution, ReadError> {
    self.reads.fetch_add(1, Ordering::SeqCst);
    self.ledger_reads.fetch_add(1, Ordering::SeqCst);
    self.inner.contribution_at(id, index).await
  }

  async fn withdrawals_by_program(
    &self,
    id: ProgramId,
  ) -> Result<Vec<Withdrawal>, ReadError> {
    self.reads.fetch_add(1, Ordering::SeqCst);
    self.inner.withdrawals_by_program(id).await
  }

  async fn owner(&self) -> Result<Address, ReadError> {
    self.reads.fetch_add(1, Ordering::SeqCst);
    self.inner.owner().await
  }
}

/// Yields to the scheduler before every read, so overlapping aggregation
/// runs driven from a single task interleave deterministically instead
/// of the first one completing in a single poll.
pub struct YieldingReader<R> {
  inner: R,
}

impl<R> YieldingReader<R> {
  pub fn new(inner: R) -> Self {
    Self { inner }
  }
}

impl<R: ContractReader> ContractReader for YieldingReader<R> {
  async fn program_ids(&self) -> Result<Vec<ProgramId>, ReadError> {
    tokio::task::yield_now().await;
    self.inner.program_ids().await
  }

  async fn program_by_id(
    &self,
    id: ProgramId,
  ) -> Result<Option<Program>, ReadError> {
    tokio::task::yield_now().await;
    self.inner.program_by_id(id).await
  }

  async fn contribution_at(
    &self,
    id: ProgramId,
    index: u64,
  ) -> Result<Contribution, ReadError> {
    tokio::task::yield_now().await;
    self.inner.contribution_at(id, index).await
  }

  async fn withdrawals_by_program(
    &self,
    id: ProgramId,
  ) -> Result<Vec<Withdrawal>, ReadError> {
    tokio::task::yield_now().await;
    self.inner.withdrawals_by_program(id).await
  }

  async fn owner(&self) -> Result<Address, ReadError> {
    tokio::task::yield_now().await;
    self.inner.owner().await
  }
}
