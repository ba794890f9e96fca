mod aggregator;
mod ledger;
mod memory;
mod reader;

pub use {
  aggregator::{
    AggregatorConfig,
    ContributionAggregator,
    ContributionSummary,
    UserContribution,
  },
  ledger::{scan_ledger, LedgerEntry, ScanEnd, MAX_LEDGER_SCAN},
  memory::{ContractError, InMemoryContract},
  reader::{ContractReader, ReadError},
};
