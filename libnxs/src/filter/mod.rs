//! Tag filtering.
//!
//! Reduces the records of a search to a short tag list per image: the two
//! highest version tags, preceded by `latest` when the floating tag points at
//! the same content as the highest numeric version.

use crate::search::SearchRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;


/// Name of the floating tag.
pub const LATEST_TAG: &str = "latest";

/// Maximum number of version tags reported per image.
pub const MAX_VERSION_TAGS: usize = 2;

/// Filtered tags keyed by image name.
///
/// The order of tags within an image is significant; the order of images is not.
pub type FilteredResult = BTreeMap<String, Vec<String>>;

/// What to do with an image whose filtered tag list is empty.
///
/// This happens when an image only has a `latest` tag that cannot be
/// matched against any numeric version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyGroups {
    /// Report the image with an empty tag list
    #[default]
    Keep,
    /// Leave the image out of the result
    Omit,
}

impl std::str::FromStr for EmptyGroups {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "omit" => Ok(Self::Omit),
            other => Err(format!(
                "Invalid empty-groups value '{}': must be keep or omit",
                other
            )),
        }
    }
}

impl std::fmt::Display for EmptyGroups {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Omit => write!(f, "omit"),
        }
    }
}

/// Filters records into the per-image tag lists, keeping images whose
/// list ends up empty.
///
/// # Examples
///
/// ```
/// use libnxs::SearchRecord;
/// use libnxs::filter::filter;
///
/// let records = vec![
///     SearchRecord::new("img", "latest", "d2"),
///     SearchRecord::new("img", "1", "d1"),
///     SearchRecord::new("img", "2", "d2"),
/// ];
/// let result = filter(&records);
/// assert_eq!(result["img"], vec!["latest", "2", "1"]);
/// ```
pub fn filter(records: &[SearchRecord]) -> FilteredResult {
    filter_with(records, EmptyGroups::Keep)
}

/// Filters records into the per-image tag lists with an explicit policy for
/// images that end up without tags.
pub fn filter_with(records: &[SearchRecord], empty_groups: EmptyGroups) -> FilteredResult {
    let mut result = FilteredResult::new();

    for (name, group) in group_by_name(records) {
        let tags = select_tags(&group);
        tracing::debug!(image = name, ?tags, "Filtered tags");

        if tags.is_empty() && empty_groups == EmptyGroups::Omit {
            continue;
        }
        result.insert(name.to_string(), tags);
    }

    result
}

/// Groups records by image name, preserving input order within each group.
pub fn group_by_name(records: &[SearchRecord]) -> BTreeMap<&str, Vec<&SearchRecord>> {
    let mut groups: BTreeMap<&str, Vec<&SearchRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.name.as_str()).or_default().push(record);
    }
    groups
}

/// Selects and orders the tags to report for one image.
///
/// Version tags are sorted with [`version_order`] and cut down to
/// [`MAX_VERSION_TAGS`]. `latest` is prepended only when its digest is
/// non-empty and equal to the digest of the highest numeric version; among
/// equal numeric versions the first one in `group` provides that digest.
/// If several `latest` records are present the last one wins.
pub fn select_tags(group: &[&SearchRecord]) -> Vec<String> {
    let mut has_latest = false;
    let mut latest_digest = "";
    let mut highest: Option<u64> = None;
    let mut version_digest = "";
    let mut version_tags: Vec<&str> = Vec::with_capacity(group.len());

    for record in group {
        if record.version == LATEST_TAG {
            has_latest = true;
            latest_digest = &record.digest;
            continue;
        }

        if let Some(number) = parse_version(&record.version)
            && highest.is_none_or(|h| number > h)
        {
            highest = Some(number);
            version_digest = &record.digest;
        }
        version_tags.push(&record.version);
    }

    version_tags.sort_by(|a, b| version_order(a, b));
    version_tags.truncate(MAX_VERSION_TAGS);

    let include_latest = has_latest
        && !latest_digest.is_empty()
        && !version_digest.is_empty()
        && latest_digest == version_digest;

    let mut tags = Vec::with_capacity(version_tags.len() + 1);
    if include_latest {
        tags.push(LATEST_TAG.to_string());
    }
    tags.extend(version_tags.into_iter().map(str::to_string));
    tags
}

/// Parses a version tag as a non-negative integer.
///
/// Only plain ASCII digit strings that fit in a `u64` qualify; signs,
/// whitespace and dotted versions do not.
///
/// # Examples
///
/// ```
/// use libnxs::filter::parse_version;
///
/// assert_eq!(parse_version("42"), Some(42));
/// assert_eq!(parse_version("007"), Some(7));
/// assert_eq!(parse_version("+1"), None);
/// assert_eq!(parse_version("1.2"), None);
/// ```
pub fn parse_version(tag: &str) -> Option<u64> {
    if tag.is_empty() || !tag.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tag.parse().ok()
}

/// Sort order for version tags, highest first.
///
/// Numeric tags sort before non-numeric ones and compare by value, with
/// equal values (`"01"` and `"1"`) falling back to byte-wise comparison.
/// Non-numeric tags compare byte-wise. Every comparison is descending, and
/// the result is a total order.
pub fn version_order(a: &str, b: &str) -> Ordering {
    match (parse_version(a), parse_version(b)) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| b.cmp(a)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    }
}
