//! Best-effort region resolution.

use tracing::warn;

use crate::parts::TagParts;

/// External capability that knows which region a language tag belongs to.
pub trait RegionLookup {
    /// Returns the region code for `tag`, or a description of why it could not.
    fn region_for(&self, tag: &str) -> Result<String, String>;
}

impl<F> RegionLookup for F
where
    F: Fn(&str) -> Result<String, String>,
{
    fn region_for(&self, tag: &str) -> Result<String, String> {
        self(tag)
    }
}

/// Returns the region of `tag`: its own region subtag when it has one, else
/// whatever `lookup` answers. Lookup failures are logged and yield an empty
/// string.
#[must_use]
pub fn region_or_empty(lookup: &dyn RegionLookup, tag: &str) -> String {
    if let Some(region) = TagParts::parse(tag).and_then(|p| p.region) {
        return region;
    }
    match lookup.region_for(tag) {
        Ok(region) => region,
        Err(e) => {
            warn!(tag = %tag, error = %e, "Region lookup failed, using empty region");
            String::new()
        }
    }
}
