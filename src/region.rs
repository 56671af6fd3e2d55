//! Region resolution shared by profile generation and shell output.

use std::fmt;

use log::{info, warn};

use crate::error::Error;
use crate::invoker::{AwsCli, Invoker};

/// Reads the region stored for a profile.
pub trait RegionLookup {
    /// `None` means the ambient default profile.
    fn stored_region(&self, profile: Option<&str>) -> Result<String, Error>;
}

impl<T: RegionLookup + ?Sized> RegionLookup for &T {
    fn stored_region(&self, profile: Option<&str>) -> Result<String, Error> {
        (**self).stored_region(profile)
    }
}

impl<I: Invoker> RegionLookup for AwsCli<I> {
    fn stored_region(&self, profile: Option<&str>) -> Result<String, Error> {
        let mut args = vec!["configure".to_string(), "get".to_string(), "region".to_string()];
        if let Some(profile) = profile {
            args.extend(["--profile".to_string(), profile.to_string()]);
        }
        Ok(self.run("get region", &args)?.trim().to_string())
    }
}

/// Outcome of region resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// Given on the command line.
    Explicit(String),
    /// Copied from the source profile.
    Inherited(String),
    /// Nothing could be resolved; the credentials carry no region.
    Unset,
}

impl Region {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Explicit(r) | Self::Inherited(r) => Some(r),
            Self::Unset => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(r) => write!(f, "{r}"),
            Self::Inherited(r) => write!(f, "{r} (from source profile)"),
            Self::Unset => write!(f, "<unset>"),
        }
    }
}

/// Picks the region: explicit value, else the source profile's stored region, else none.
///
/// A failed or empty lookup only warns.
pub fn resolve(
    explicit: Option<&str>,
    source_profile: Option<&str>,
    lookup: &impl RegionLookup,
) -> Region {
    if let Some(region) = explicit {
        return Region::Explicit(region.to_string());
    }

    match lookup.stored_region(source_profile) {
        Ok(region) if !region.is_empty() => {
            info!("Using region {region} from source profile");
            Region::Inherited(region)
        }
        Ok(_) => {
            warn!("No region specified and source profile has no region set");
            Region::Unset
        }
        Err(e) => {
            warn!("Error getting region from source profile: {e}");
            Region::Unset
        }
    }
}
