//! Language tag utilities for writing system setup.
//!
//! Everything that reasons about the text of a BCP-47 style tag lives here:
//! - [`TagParts`]: strict parsing and canonical composition
//! - [`clean_tag`]: turns arbitrary user input into a valid tag without
//!   dropping information (invalid pieces move to private use)
//! - [`to_unique_tag`]: appends a `duplN` private-use marker until a tag is
//!   absent from a set of existing tags
//! - [`insert_or_replace_private_use_token`]: records an unlisted language's
//!   name as a private-use token
//! - [`region_or_empty`]: best-effort region resolution through a
//!   [`RegionLookup`] capability

mod clean;
mod error;
mod parts;
mod private_use;
mod region;
pub mod registry;
mod unique;

pub use clean::{clean_tag, clean_tag_parts, clean_tag_string};
pub use error::{TagError, TagResult};
pub use parts::TagParts;
pub use private_use::{
    UNLISTED_LANGUAGE_NAME_SENTINEL, concatenate_variant_and_private_use,
    insert_or_replace_private_use_token, split_variant_and_private_use, to_valid_variant_string,
};
pub use region::{RegionLookup, region_or_empty};
pub use unique::{is_duplicate_marker, to_unique_tag};

/// Language subtag reserved for languages that are not in the directory.
pub const UNLISTED_LANGUAGE: &str = "qaa";

/// Private-use script placeholder used when a script token had to be moved aside.
pub const PRIVATE_USE_SCRIPT: &str = "Qaaa";

/// Private-use region placeholder used when a region token had to be moved aside.
pub const PRIVATE_USE_REGION: &str = "QM";
