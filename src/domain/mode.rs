//! Service variants and the per-variant policies they select.
//!
//! The two variants intentionally diverge: public links are deduplicated by
//! URL and never counted, while account-owned links are always minted fresh
//! and count every redirect.

use std::fmt;
use std::str::FromStr;

/// Whether re-shortening a known URL returns the existing link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Return the existing public link for an identical URL.
    ByOriginalUrl,
    /// Always create a new link.
    Never,
}

/// Whether a successful redirect increments the link's click counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTracking {
    Enabled,
    Disabled,
}

/// Deployment variant of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceMode {
    /// Anonymous shortening, URL deduplication, no click counting.
    #[default]
    Public,
    /// Registered users own their links; clicks are counted.
    Accounts,
}

impl ServiceMode {
    pub fn dedup_policy(self) -> DedupPolicy {
        match self {
            Self::Public => DedupPolicy::ByOriginalUrl,
            Self::Accounts => DedupPolicy::Never,
        }
    }

    pub fn click_tracking(self) -> ClickTracking {
        match self {
            Self::Public => ClickTracking::Disabled,
            Self::Accounts => ClickTracking::Enabled,
        }
    }

    pub fn requires_accounts(self) -> bool {
        self == Self::Accounts
    }
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Accounts => f.write_str("accounts"),
        }
    }
}

impl FromStr for ServiceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "accounts" => Ok(Self::Accounts),
            other => Err(format!(
                "unknown service mode '{}', expected 'public' or 'accounts'",
                other
            )),
        }
    }
}
