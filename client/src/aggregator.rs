use {
  crate::{
    ledger::{scan_ledger, LedgerEntry, ScanEnd, MAX_LEDGER_SCAN},
    reader::ContractReader,
  },
  futures::{pin_mut, StreamExt},
  monfund_primitives::{Address, Amount, Program, ProgramId},
  std::sync::atomic::{AtomicU64, Ordering},
  tracing::{debug, warn},
};

/// Tunables for contribution aggregation.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
  /// Per-program cap on indexed ledger reads. See [`MAX_LEDGER_SCAN`]
  /// for the truncation this implies.
  pub max_ledger_scan: u64,
}

impl Default for AggregatorConfig {
  fn default() -> Self {
    Self {
      max_ledger_scan: MAX_LEDGER_SCAN,
    }
  }
}

/// A program the contributor has funded, with their summed amount across
/// all of their ledger records in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContribution {
  pub program: Program,
  pub amount: Amount,
}

/// Result of one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionSummary {
  /// Funded programs, in the order their ids were scanned. Programs the
  /// contributor never funded (or whose ledgers could not be read) are
  /// absent rather than listed with a zero amount.
  pub contributions: Vec<UserContribution>,

  /// Always equals the sum of all per-program amounts above.
  pub total: Amount,
}

impl ContributionSummary {
  pub fn is_empty(&self) -> bool {
    self.contributions.is_empty()
  }
}

/// Computes which programs a contributor has funded and by how much by
/// scanning each program's contribution ledger through a
/// [`ContractReader`].
///
/// An aggregation run is a stateless batch computation: it starts from
/// scratch every time, walks programs strictly in the order given and
/// ledger records strictly by ascending index, one suspending read at a
/// time. No failure aborts a run. A program that cannot be fetched is
/// skipped, and a failed ledger read ends that program's scan as if the
/// ledger had ended there, so the caller always gets a (possibly
/// partial, possibly empty) summary and never an error.
///
/// Reads are not snapshotted at a single block: a contribution landing
/// mid-run may or may not be reflected, depending on whether its
/// program was already scanned.
pub struct ContributionAggregator<R> {
  reader: R,
  config: AggregatorConfig,
  generation: AtomicU64,
}

impl<R: ContractReader> ContributionAggregator<R> {
  pub fn new(reader: R) -> Self {
    Self::with_config(reader, AggregatorConfig::default())
  }

  pub fn with_config(reader: R, config: AggregatorConfig) -> Self {
    Self {
      reader,
      config,
      generation: AtomicU64::new(0),
    }
  }

  pub fn reader(&self) -> &R {
    &self.reader
  }

  /// Runs one aggregation for `contributor` over `program_ids`.
  ///
  /// With no contributor there is nothing to scan and the empty summary
  /// is returned without a single read being issued; likewise for an
  /// empty id list.
  pub async fn aggregate(
    &self,
    contributor: Option<Address>,
    program_ids: &[ProgramId],
  ) -> ContributionSummary {
    let Some(contributor) = contributor else {
      return ContributionSummary::default();
    };

    let mut summary = ContributionSummary::default();
    for &id in program_ids {
      let program = match self.reader.program_by_id(id).await {
        Ok(Some(program)) => program,
        Ok(None) => {
          warn!("program {id} not found, skipping");
          continue;
        }
        Err(e) => {
          warn!("failed fetching program {id}, skipping: {e}");
          continue;
        }
      };

      let amount = self.scan_contributions(id, contributor).await;
      if amount > 0 {
        summary.total += amount;
        summary.contributions.push(UserContribution { program, amount });
      }
    }

    summary
  }

  /// Like [`ContributionAggregator::aggregate`], but returns `None`
  /// when a newer run started after this one began.
  ///
  /// Callers that recompute on every identity or program-list change
  /// can overlap runs; whichever run started last wins and earlier runs
  /// report `None` so their results are dropped instead of racing over
  /// a shared slot. A superseded run is not cancelled mid-flight: it
  /// finishes its reads and is discarded at the end.
  pub async fn aggregate_latest(
    &self,
    contributor: Option<Address>,
    program_ids: &[ProgramId],
  ) -> Option<ContributionSummary> {
    let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
    let summary = self.aggregate(contributor, program_ids).await;
    match self.generation.load(Ordering::SeqCst) == generation {
      true => Some(summary),
      false => {
        debug!("aggregation run {generation} superseded, discarding result");
        None
      }
    }
  }

  /// Sums the contributor's records in one program's ledger.
  async fn scan_contributions(
    &self,
    id: ProgramId,
    contributor: Address,
  ) -> Amount {
    let mut total = 0;
    let scan = scan_ledger(&self.reader, id, self.config.max_ledger_scan);
    pin_mut!(scan);

    while let Some(entry) = scan.next().await {
      match entry {
        LedgerEntry::Record(record) => {
          if record.contributor == contributor {
            total += record.amount;
          }
        }
        LedgerEntry::End(ScanEnd::Sentinel) => {}
        LedgerEntry::End(ScanEnd::Truncated) => {
          warn!(
            "ledger scan of program {id} stopped at the {} read cap, \
             records past it are not counted",
            self.config.max_ledger_scan
          );
        }
        LedgerEntry::End(ScanEnd::Failed(e)) => {
          debug!("ledger read failed for program {id}, treating as end: {e}");
        }
      }
    }

    total
  }
}
