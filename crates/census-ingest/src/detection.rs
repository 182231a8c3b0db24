//! ZIP column detection from header names.
//!
//! Customer exports name their postal code column in many ways ("Zip",
//! "Billing Zip", "Shipping Postal Code", ...). Detection is a ranked
//! matcher over a fixed candidate list, evaluated in two passes:
//!
//! 1. **Exact**: the trimmed, lowercased header equals a candidate. Matches
//!    rank by candidate priority, then by column order.
//! 2. **Contains**: the lowercased header contains a candidate. The first
//!    header in column order wins, candidates scanned in priority order.
//!
//! Any exact match beats every contains match.

use std::fmt;

/// Known ZIP-like header names, highest priority first.
pub const ZIP_HEADER_CANDIDATES: &[&str] = &[
    "zip",
    "zipcode",
    "zip code",
    "zip_code",
    "postal",
    "postal code",
    "postal_code",
    "postcode",
    "post_code",
    "billing zip",
    "billing_zip",
    "billing postal",
    "billing_postal_code",
    "shipping zip",
    "shipping_zip",
    "shipping postal",
    "shipping_postal_code",
];

/// How a header matched a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchKind {
    Exact,
    Contains,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Contains => "contains",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The detected ZIP column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipColumn {
    /// Column index in the input table.
    pub index: usize,
    /// Header exactly as it appears in the input.
    pub name: String,
    /// Candidate that matched.
    pub candidate: &'static str,
    pub kind: MatchKind,
}

/// Ordering of matches within a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ranking {
    /// Candidate priority first, then column order.
    CandidateFirst,
    /// Column order first, then candidate priority.
    ColumnFirst,
}

struct DetectionPass {
    kind: MatchKind,
    ranking: Ranking,
    matches: fn(&str, &str) -> bool,
}

fn equals_candidate(header: &str, candidate: &str) -> bool {
    header == candidate
}

fn contains_candidate(header: &str, candidate: &str) -> bool {
    header.contains(candidate)
}

// Exact matches rank by candidate priority, so ["Billing Zip", "zip code"]
// picks "zip code" even though "Billing Zip" comes first. A plain
// column-order scan would pick "Billing Zip". Confirm this ranking with the
// people who maintain the customer exports before changing it.
const DETECTION_PASSES: [DetectionPass; 2] = [
    DetectionPass {
        kind: MatchKind::Exact,
        ranking: Ranking::CandidateFirst,
        matches: equals_candidate,
    },
    DetectionPass {
        kind: MatchKind::Contains,
        ranking: Ranking::ColumnFirst,
        matches: contains_candidate,
    },
];

fn comparable(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Finds the ZIP column among `headers`, or `None` if no header qualifies.
pub fn detect_zip_column<S: AsRef<str>>(headers: &[S]) -> Option<ZipColumn> {
    let normalized: Vec<String> = headers.iter().map(|h| comparable(h.as_ref())).collect();

    for pass in &DETECTION_PASSES {
        let mut best: Option<(usize, usize)> = None;
        for (column, header) in normalized.iter().enumerate() {
            let Some(rank) = ZIP_HEADER_CANDIDATES
                .iter()
                .position(|candidate| (pass.matches)(header, candidate))
            else {
                continue;
            };
            let key = match pass.ranking {
                Ranking::CandidateFirst => (rank, column),
                Ranking::ColumnFirst => (column, rank),
            };
            if best.is_none_or(|current| key < current) {
                best = Some(key);
            }
        }

        if let Some(key) = best {
            let (rank, index) = match pass.ranking {
                Ranking::CandidateFirst => key,
                Ranking::ColumnFirst => (key.1, key.0),
            };
            let found = ZipColumn {
                index,
                name: headers[index].as_ref().to_string(),
                candidate: ZIP_HEADER_CANDIDATES[rank],
                kind: pass.kind,
            };
            tracing::debug!(
                column = %found.name,
                index = found.index,
                candidate = found.candidate,
                kind = %found.kind,
                "detected zip column"
            );
            return Some(found);
        }
    }

    tracing::debug!(columns = headers.len(), "no zip column detected");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_case_and_whitespace() {
        let found = detect_zip_column(&["customer_id", "  ZIP  ", "email"]).unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.name, "  ZIP  ");
        assert_eq!(found.kind, MatchKind::Exact);
        assert_eq!(found.candidate, "zip");
    }

    #[test]
    fn test_exact_pass_beats_earlier_contains_match() {
        let found = detect_zip_column(&["Customer Zip Region", "Postal Code"]).unwrap();
        assert_eq!(found.name, "Postal Code");
        assert_eq!(found.kind, MatchKind::Exact);
    }

    #[test]
    fn test_exact_pass_ranks_candidates() {
        let found = detect_zip_column(&["Billing Zip", "zip code"]).unwrap();
        assert_eq!(found.name, "zip code");
        assert_eq!(found.kind, MatchKind::Exact);
    }

    #[test]
    fn test_exact_pass_ties_break_on_column_order() {
        let found = detect_zip_column(&["Zip", "zip"]).unwrap();
        assert_eq!(found.index, 0);
    }

    #[test]
    fn test_contains_pass_first_column_wins() {
        let found = detect_zip_column(&["email", "Ship-To Postal", "Customer ZIP5"]).unwrap();
        assert_eq!(found.name, "Ship-To Postal");
        assert_eq!(found.kind, MatchKind::Contains);
        assert_eq!(found.candidate, "postal");
    }

    #[test]
    fn test_contains_pass_candidate_priority_within_header() {
        let found = detect_zip_column(&["Primary Postal Zip Field"]).unwrap();
        assert_eq!(found.candidate, "zip");
    }

    #[test]
    fn test_not_found() {
        assert!(detect_zip_column(&["customer_id", "email", "city"]).is_none());
        assert!(detect_zip_column::<&str>(&[]).is_none());
    }
}
