//! External capabilities
//!
//! Some rules delegate their verdict entirely to a collaborator: phone
//! numbering plans, disposable e-mail providers, DNS. The engine holds them
//! as trait objects and treats them as black boxes. A capability fault is
//! never propagated; the calling rule converts it into an ordinary failure.
//!
//! Network-backed capabilities ([`HostResolver`]) may block and are only
//! consulted by checks the caller opts into. The engine imposes no timeout.

use std::fmt;

/// Fault raised by an external capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CapabilityError {
    /// The input cannot be interpreted by the capability at all.
    #[error("input not understood: {0}")]
    Unparsable(String),

    /// The capability does not know the requested region.
    #[error("unsupported region `{0}`")]
    UnsupportedRegion(String),

    /// The capability itself failed (I/O, resolver, remote service).
    #[error("capability unavailable: {0}")]
    Unavailable(String),
}

impl CapabilityError {
    /// Machine-readable error code, stored as the `reason` of the failure
    /// the fault is converted into.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unparsable(_) => "unparsable",
            Self::UnsupportedRegion(_) => "unsupported_region",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

/// Region-aware phone number validity.
pub trait PhoneNumberCapability: Send + Sync {
    /// Whether `number` is a valid number, in `region` when given.
    ///
    /// `region` is a lowercased two-letter code; `None` means the number must
    /// carry its own country calling code.
    fn is_valid(&self, number: &str, region: Option<&str>) -> Result<bool, CapabilityError>;
}

/// Membership in a list of disposable e-mail providers.
pub trait BurnerDomains: Send + Sync {
    /// Whether `domain` (lowercased) belongs to a disposable provider.
    fn is_burner(&self, domain: &str) -> bool;
}

/// Host existence check.
pub trait HostResolver: Send + Sync {
    /// Whether `host` resolves to at least one address.
    fn resolves(&self, host: &str) -> Result<bool, CapabilityError>;
}

// ============================================================================
// BUILT-IN BURNER LIST
// ============================================================================

/// A fixed list of well-known disposable providers.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticBurnerList {
    domains: Vec<String>,
}

const KNOWN_BURNERS: &[&str] = &[
    "10minutemail.com",
    "discard.email",
    "dispostable.com",
    "emailondeck.com",
    "fakeinbox.com",
    "getnada.com",
    "guerrillamail.com",
    "guerrillamail.net",
    "maildrop.cc",
    "mailinator.com",
    "mailnesia.com",
    "mintemail.com",
    "mohmal.com",
    "sharklasers.com",
    "spamgourmet.com",
    "temp-mail.org",
    "tempmail.com",
    "throwawaymail.com",
    "trashmail.com",
    "yopmail.com",
];

impl StaticBurnerList {
    /// The built-in provider list.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(KNOWN_BURNERS.iter().copied())
    }

    /// A list made of `domains`.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut domains: Vec<String> = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_ascii_lowercase())
            .collect();
        domains.sort_unstable();
        domains.dedup();
        Self { domains }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl BurnerDomains for StaticBurnerList {
    fn is_burner(&self, domain: &str) -> bool {
        let domain = domain.trim_end_matches('.');
        // Subdomains of a provider count as the provider.
        self.domains.binary_search_by(|d| d.as_str().cmp(domain)).is_ok()
            || domain.match_indices('.').any(|(i, _)| {
                self.domains
                    .binary_search_by(|d| d.as_str().cmp(&domain[i + 1..]))
                    .is_ok()
            })
    }
}

impl fmt::Debug for StaticBurnerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticBurnerList")
            .field("domains", &self.domains.len())
            .finish()
    }
}

// ============================================================================
// STD RESOLVER
// ============================================================================

/// Resolves hosts through the operating system resolver.
///
/// Blocking; the caller is responsible for any timeout.
#[cfg(feature = "network")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdResolver;

#[cfg(feature = "network")]
impl HostResolver for StdResolver {
    fn resolves(&self, host: &str) -> Result<bool, CapabilityError> {
        use std::net::ToSocketAddrs;

        match (host, 0u16).to_socket_addrs() {
            Ok(mut addrs) => Ok(addrs.next().is_some()),
            // NXDOMAIN and friends surface as I/O errors.
            Err(err) => {
                tracing::debug!(host, error = %err, "host lookup failed");
                Ok(false)
            }
        }
    }
}
