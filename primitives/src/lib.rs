mod address;
mod contribution;
mod event;
mod program;

pub use {
  address::{Address, Error as AddressError},
  contribution::{Contribution, Withdrawal},
  event::Event,
  program::{Amount, InvalidStatus, Program, ProgramId, ProgramStatus},
};
