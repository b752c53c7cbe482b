//! Network profiles and protocol constants.

use hex_literal::hex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Network profile: Mainnet or Testnet.
///
/// Selects which compiled-in checkpoint table applies. Fixed for the
/// lifetime of the process.
///
/// # Examples
///
/// ```
/// use keel_core::constants::NetworkType;
/// let net = NetworkType::default();
/// assert_eq!(net, NetworkType::Mainnet);
/// assert!(!net.is_testnet());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Production network. Carries the hard-coded checkpoint table.
    #[default]
    #[serde(alias = "main")]
    Mainnet,
    /// Public test network. Carries no checkpoints.
    #[serde(alias = "test")]
    Testnet,
}

impl NetworkType {
    /// Whether this is the test network.
    pub fn is_testnet(&self) -> bool {
        matches!(self, Self::Testnet)
    }

    /// Lowercase name used in config files and logs.
    ///
    /// # Examples
    ///
    /// ```
    /// use keel_core::constants::NetworkType;
    /// assert_eq!(NetworkType::Testnet.name(), "testnet");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// Subdirectory name appended to the base data directory path.
    pub fn data_dir_suffix(&self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

/// Default log filter when neither config nor `RUST_LOG` supplies one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Prefix for environment variable overrides (`KEEL_NETWORK`, `KEEL_LOG_LEVEL`, ...).
pub const ENV_PREFIX: &str = "KEEL";

/// Hard-coded mainnet checkpoints: (height, block_hash) pairs, ascending by height.
///
/// Blocks at these heights must carry exactly these hashes. Height 0 is the
/// genesis block. Extended once per release; never changed at runtime.
///
/// A good checkpoint block is surrounded by blocks with reasonable
/// timestamps and contains no strange transactions.
pub const MAINNET_CHECKPOINTS: &[(u64, [u8; 32])] = &[
    (0, hex!("c6f87e3d194e61bd61bb13d2d50ff712eb3ce180467b50806b10989fac4ed561")),
    (100, hex!("57960bc8ab65dc552fd1dd0b3cf771041155b35c8ceeb087b764730eea6040ff")),
    (500, hex!("f271b8a943dffab218f73bddd281ebce03e9b7cfc1688b39659b4a7b2490b8aa")),
    (1000, hex!("52ff7b14be280b1a4cc5c12d0c0a18bd95ed5964d015c11b373401ccf6b1e953")),
    (2000, hex!("9d06c49cde83f002131c8212a05debd8f03b0d4b80d77ea59c311ceea75308c8")),
    (7820, hex!("0d1e1affe64282be180e98f444ffeecf064b862a89389f334105786c837d6640")),
    (11730, hex!("41d87c5d1591365f54eabd66736a46687394f05d767d8bccd25dc94b9b733467")),
    (15640, hex!("51346cf7dc6d5b41cb3d29e42fc5e57f0805c2ac71ca48a13c81099fa7bd3217")),
    (20000, hex!("556053e5a1ac10ce5a576b2a52f6f1241db9aa2abdc2d1c9bfb00fb0d7f996fb")),
    (26300, hex!("4595a7399cf56e8a29694a39eafa13305ded51649bb109ae013acf02149293de")),
];

/// Testnet carries no checkpoints.
pub const TESTNET_CHECKPOINTS: &[(u64, [u8; 32])] = &[];
