//! ID range parsing and catalog slicing.
//!
//! Users name files by ID, either one (`03802`) or an inclusive range
//! (`03802-03807`). Leading zeros may be omitted; results are padded to the
//! width used by the catalog.

use ccnews_core::{FileDescriptor, RangeSelection};
use thiserror::Error;

const SEPARATORS: [char; 3] = ['-', '\u{2013}', '\u{2014}'];

/// Why an ID request was rejected. Every variant is recoverable by asking
/// again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("empty input")]
    Empty,

    #[error("too many separators")]
    TooManySeparators,

    #[error("range must have a start id")]
    MissingStart,

    #[error("ids must be numeric")]
    NonNumeric,

    #[error("start id must be <= end id")]
    StartAfterEnd,

    #[error("ids out of available range: {min}-{max}")]
    OutOfBounds { min: String, max: String },

    #[error("id {id} not found in available files")]
    UnknownId { id: String },

    #[error("no ids available")]
    NoAvailableIds,
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn pad(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}

/// Validate `raw` against the known catalog IDs.
///
/// Pure and re-entrant; the width is derived from `available_ids` on every
/// call.
pub fn parse_id_range<'a, I>(raw: &str, available_ids: I) -> Result<RangeSelection, RangeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RangeError::Empty);
    }

    let parts: Vec<&str> = raw.split(SEPARATORS).map(str::trim).collect();
    let (start, end) = match parts.as_slice() {
        [single] => (*single, *single),
        [start, end] => {
            if start.is_empty() {
                return Err(RangeError::MissingStart);
            }
            // "03802-" means the single ID
            (*start, if end.is_empty() { *start } else { *end })
        }
        _ => return Err(RangeError::TooManySeparators),
    };

    if !is_numeric(start) || !is_numeric(end) {
        return Err(RangeError::NonNumeric);
    }

    let (mut width, mut bounds) = (0usize, None::<(u64, u64)>);
    for id in available_ids {
        let Ok(value) = id.parse::<u64>() else {
            continue;
        };
        width = width.max(id.len());
        bounds = Some(bounds.map_or((value, value), |(lo, hi)| (lo.min(value), hi.max(value))));
    }
    let (min, max) = bounds.ok_or(RangeError::NoAvailableIds)?;

    let out_of_bounds = || RangeError::OutOfBounds {
        min: pad(min, width),
        max: pad(max, width),
    };
    // Digit strings too long for u64 are necessarily above any catalog ID
    let start_n: u64 = start.parse().map_err(|_| out_of_bounds())?;
    let end_n: u64 = end.parse().map_err(|_| out_of_bounds())?;

    if start_n > end_n {
        return Err(RangeError::StartAfterEnd);
    }
    if !(min..=max).contains(&start_n) || !(min..=max).contains(&end_n) {
        return Err(out_of_bounds());
    }

    Ok(RangeSelection {
        start: pad(start_n, width),
        end: pad(end_n, width),
    })
}

/// Slice `files` between the selection's boundary IDs, inclusive.
///
/// Boundaries are located by position in catalog order and swapped if the
/// end comes first, so the result is always contiguous.
pub fn select_files<'a>(
    files: &'a [FileDescriptor],
    selection: &RangeSelection,
) -> Result<&'a [FileDescriptor], RangeError> {
    let position = |id: &str| {
        files
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| RangeError::UnknownId { id: id.to_string() })
    };

    let mut first = position(&selection.start)?;
    let mut last = position(&selection.end)?;
    if first > last {
        std::mem::swap(&mut first, &mut last);
    }
    Ok(&files[first..=last])
}
