use {clap::Parser, monfund_primitives::Address};

/// MonFund Local Devnode
///
/// Seeds an in-memory instance of the crowdfunding contract with a
/// randomized funding scenario, then aggregates and prints the chosen
/// contributor's contribution history. For dev and CI smoke use; nothing
/// here talks to a real chain.
#[derive(Debug, Parser)]
pub struct SystemSettings {
  /// Contributor whose history is aggregated
  #[clap(short, long,
    value_name = "ADDRESS",
    default_value = "0x00000000000000000000000000000000000000c1")]
  contributor: Address,

  /// Number of programs to seed
  #[clap(short, long, default_value = "4", value_name = "COUNT")]
  programs: u8,

  /// Contributions recorded per program
  #[clap(short = 'n', long, default_value = "12", value_name = "COUNT")]
  contributions: u32,

  /// RNG seed for the generated scenario
  #[clap(short, long, default_value = "42", value_name = "SEED")]
  seed: u64,
}

impl SystemSettings {
  pub fn contributor(&self) -> Address {
    self.contributor
  }

  pub fn programs(&self) -> u8 {
    self.programs
  }

  pub fn contributions(&self) -> u32 {
    self.contributions
  }

  pub fn seed(&self) -> u64 {
    self.seed
  }
}
