use {
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
  },
  thiserror::Error,
};

#[derive(Debug, Error, PartialEq)]
pub enum Error {
  #[error("expected 20 address bytes, got {0}")]
  InvalidLength(usize),

  #[error(transparent)]
  InvalidHex(#[from] hex::FromHexError),
}

/// Represents an address of an account on the chain hosting the
/// crowdfunding contract.
///
/// The same address could either identify a contributor wallet or the
/// responsible party (PIC) of a funding program. Addresses are stored as
/// their raw 20 bytes, so two addresses that differ only in the letter
/// case of their hex rendering compare equal once parsed.
///
/// The all-zero address never identifies a real account. The contract
/// uses it as a sentinel in its contribution ledger, where reading one
/// past the last record yields a record attributed to [`Address::ZERO`].
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Address([u8; 20]);

impl Address {
  /// The all-zero sentinel address.
  pub const ZERO: Address = Address([0u8; 20]);

  pub const fn new(bytes: [u8; 20]) -> Self {
    Self(bytes)
  }

  /// True for the sentinel address that the contract's ledger API uses
  /// to signal "no entry at this index".
  pub fn is_zero(&self) -> bool {
    self.0 == [0u8; 20]
  }
}

impl AsRef<[u8]> for Address {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Deref for Address {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "0x{}", hex::encode(self.0))
  }
}

impl Debug for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "address(0x{})", hex::encode(self.0))
  }
}

impl From<[u8; 20]> for Address {
  fn from(bytes: [u8; 20]) -> Self {
    Self(bytes)
  }
}

impl From<Address> for String {
  fn from(addr: Address) -> Self {
    addr.to_string()
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let digits = s
      .strip_prefix("0x")
      .or_else(|| s.strip_prefix("0X"))
      .unwrap_or(s);
    let bytes = hex::decode(digits)?;
    let bytes: [u8; 20] = bytes
      .try_into()
      .map_err(|rest: Vec<u8>| Error::InvalidLength(rest.len()))?;
    Ok(Self(bytes))
  }
}

impl TryFrom<&str> for Address {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

#[cfg(test)]
mod tests {
  use {super::Error, crate::Address};

  #[test]
  fn parse_and_display_roundtrip() -> anyhow::Result<()> {
    let text = "0xe1da8919f262ee86f9be05059c9280142cf23f48";
    let addr: Address = text.parse()?;
    assert_eq!(addr.to_string(), text);
    Ok(())
  }

  #[test]
  fn parsing_is_case_insensitive() -> anyhow::Result<()> {
    let lower: Address = "0xe1da8919f262ee86f9be05059c9280142cf23f48".parse()?;
    let mixed: Address = "0xE1DA8919f262Ee86f9BE05059C9280142CF23f48".parse()?;
    let unprefixed: Address =
      "E1DA8919F262EE86F9BE05059C9280142CF23F48".parse()?;
    assert_eq!(lower, mixed);
    assert_eq!(lower, unprefixed);
    Ok(())
  }

  #[test]
  fn zero_is_the_sentinel() -> anyhow::Result<()> {
    assert!(Address::ZERO.is_zero());
    let parsed: Address =
      "0x0000000000000000000000000000000000000000".parse()?;
    assert!(parsed.is_zero());
    assert_eq!(parsed, Address::ZERO);

    let real: Address = "0xe1da8919f262ee86f9be05059c9280142cf23f48".parse()?;
    assert!(!real.is_zero());
    Ok(())
  }

  #[test]
  fn rejects_malformed_strings() {
    assert_eq!(
      "0xe1da8919".parse::<Address>(),
      Err(Error::InvalidLength(4))
    );
    assert!("0xzzda8919f262ee86f9be05059c9280142cf23f48"
      .parse::<Address>()
      .is_err());
  }

  #[test]
  fn serde_roundtrip() -> anyhow::Result<()> {
    let addr: Address = "0xe1da8919f262ee86f9be05059c9280142cf23f48".parse()?;
    let bytes = rmp_serde::to_vec(&addr)?;
    assert_eq!(rmp_serde::from_slice::<Address>(&bytes)?, addr);
    Ok(())
  }
}
