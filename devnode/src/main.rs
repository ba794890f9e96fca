use {
  crate::settings::SystemSettings,
  clap::Parser,
  monfund_client_sdk::{ContractReader, ContributionAggregator, InMemoryContract},
  monfund_primitives::{Address, Amount},
  rand::{rngs::StdRng, Rng, SeedableRng},
  tracing::{info, subscriber::set_global_default},
  tracing_subscriber::FmtSubscriber,
};

mod settings;

/// Scenario epoch, unix seconds.
const GENESIS: u64 = 1_700_000_000;

const DAY: u64 = 86_400;

/// Contribution sizes, wei. Half an ETH up to five ETH.
const MIN_CONTRIBUTION: Amount = 500_000_000_000_000_000;
const MAX_CONTRIBUTION: Amount = 5_000_000_000_000_000_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  set_global_default(FmtSubscriber::new())?;

  let settings = SystemSettings::parse();
  info!("devnode settings: {settings:#?}");

  let contract = InMemoryContract::new(wallet(0x01));
  seed_scenario(&contract, &settings).await?;

  let ids = contract.program_ids().await?;
  info!("seeded {} programs", ids.len());

  let aggregator = ContributionAggregator::new(&contract);
  let summary = aggregator
    .aggregate(Some(settings.contributor()), &ids)
    .await;

  for contribution in &summary.contributions {
    info!(
      "program {} \"{}\": contributed {:.4} ETH of {:.4} ETH raised",
      contribution.program.id,
      contribution.program.title,
      eth(contribution.amount),
      eth(contribution.program.total_amount),
    );
  }
  info!(
    "{} funded {} of {} programs, {:.4} ETH total",
    settings.contributor(),
    summary.contributions.len(),
    ids.len(),
    eth(summary.total),
  );

  Ok(())
}

/// Creates the scenario programs and fills their ledgers. The target
/// contributor lands in every other program, mixed in with randomized
/// wallets, so the aggregation has both hits and misses to chew on.
async fn seed_scenario(
  contract: &InMemoryContract,
  settings: &SystemSettings,
) -> anyhow::Result<()> {
  contract.set_now(GENESIS).await;
  let mut rng = StdRng::seed_from_u64(settings.seed());

  for p in 0..settings.programs() {
    // targets are set high enough that seeding never completes a
    // program mid-scenario
    let target =
      MAX_CONTRIBUTION * (settings.contributions() as Amount + 1) * 2;
    let id = contract
      .create_program(
        format!("Program #{}", p + 1),
        format!("Scenario program #{}", p + 1),
        format!("program-{}.webp", p + 1),
        wallet(0x10 + p),
        target,
        GENESIS,
        GENESIS + 30 * DAY,
      )
      .await?;

    for n in 0..settings.contributions() {
      let contributor = match p % 2 == 0 && n % 3 == 0 {
        true => settings.contributor(),
        false => wallet(0x40 + rng.gen_range(0..32)),
      };
      let amount = rng.gen_range(MIN_CONTRIBUTION..=MAX_CONTRIBUTION);
      contract.contribute(contributor, id, amount).await?;
    }
  }

  Ok(())
}

fn wallet(seed: u8) -> Address {
  let mut bytes = [0u8; 20];
  bytes[18] = 0x01;
  bytes[19] = seed;
  Address::new(bytes)
}

fn eth(amount: Amount) -> f64 {
  amount as f64 / 1e18
}
