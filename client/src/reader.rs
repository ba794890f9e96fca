use {
  monfund_primitives::{Address, Contribution, Program, ProgramId, Withdrawal},
  std::sync::Arc,
  thiserror::Error,
};

/// A failed read against the contract boundary.
///
/// The boundary is opaque: a revert and a transport failure are reported
/// as-is with whatever message the underlying client produced, and no
/// retry happens at this layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
  #[error("contract call reverted: {0}")]
  Reverted(String),

  #[error("transport failure: {0}")]
  Transport(String),
}

/// Read-only view of the crowdfunding contract.
///
/// Every method maps to one view call of the contract ABI and suspends
/// until the underlying read resolves. Implementations are expected to
/// issue exactly one call per method invocation; callers own all
/// sequencing, caps and failure policy.
#[allow(async_fn_in_trait)]
pub trait ContractReader {
  /// Ids of all programs ever created, in creation order.
  async fn program_ids(&self) -> Result<Vec<ProgramId>, ReadError>;

  /// Full program record, or `None` if no program exists under `id`.
  async fn program_by_id(
    &self,
    id: ProgramId,
  ) -> Result<Option<Program>, ReadError>;

  /// Indexed read of a program's contribution ledger.
  ///
  /// Returns the sentinel record ([`Contribution::SENTINEL`]) for the
  /// index one past the last real entry and fails for indexes beyond
  /// that, mirroring the contract's storage layout.
  async fn contribution_at(
    &self,
    id: ProgramId,
    index: u64,
  ) -> Result<Contribution, ReadError>;

  /// All withdrawals made from a program so far.
  async fn withdrawals_by_program(
    &self,
    id: ProgramId,
  ) -> Result<Vec<Withdrawal>, ReadError>;

  /// The contract owner account.
  async fn owner(&self) -> Result<Address, ReadError>;
}

impl<R: ContractReader> ContractReader for &R {
  async fn program_ids(&self) -> Result<Vec<ProgramId>, ReadError> {
    (**self).program_ids().await
  }

  async fn program_by_id(
    &self,
    id: ProgramId,
  ) -> Result<Option<Program>, ReadError> {
    (**self).program_by_id(id).await
  }

  async fn contribution_at(
    &self,
    id: ProgramId,
    index: u64,
  ) -> Result<Contribution, ReadError> {
    (**self).contribution_at(id, index).await
  }

  async fn withdrawals_by_program(
    &self,
    id: ProgramId,
  ) -> Result<Vec<Withdrawal>, ReadError> {
    (**self).withdrawals_by_program(id).await
  }

  async fn owner(&self) -> Result<Address, ReadError> {
    (**self).owner().await
  }
}

impl<R: ContractReader> ContractReader for Arc<R> {
  async fn program_ids(&self) -> Result<Vec<ProgramId>, ReadError> {
    (**self).program_ids().await
  }

  async fn program_by_id(
    &self,
    id: ProgramId,
  ) -> Result<Option<Program>, ReadError> {
    (**self).program_by_id(id).await
  }

  async fn contribution_at(
    &self,
    id: ProgramId,
    index: u64,
  ) -> Result<Contribution, ReadError> {
    (**self).contribution_at(id, index).await
  }

  async fn withdrawals_by_program(
    &self,
    id: ProgramId,
  ) -> Result<Vec<Withdrawal>, ReadError> {
    (**self).withdrawals_by_program(id).await
  }

  async fn owner(&self) -> Result<Address, ReadError> {
    (**self).owner().await
  }
}
