//! Version arbitration: one version per `(group, artifact)`.
//!
//! The comparison is a heuristic, not semver precedence. Versions are split
//! on `.`; the one with more segments wins outright, otherwise segments are
//! compared as integers left to right. A segment that is not an integer
//! ends the comparison in favour of whichever version was seen first.
//! Pre-release and build suffixes take no special part; `1.0-rc.1` is just
//! the segments `1`, `0-rc` and `1`.

use std::collections::{HashMap, HashSet};

use jargo_core::artifact::Artifact;

use crate::conflict::{ConflictReport, VersionConflict};

/// Outcome of comparing the current winner against a later version.
#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    Same,
    KeepCurrent(String),
    TakeChallenger(String),
}

fn compare(current: &str, challenger: &str) -> Verdict {
    if current == challenger {
        return Verdict::Same;
    }
    let ours: Vec<&str> = current.split('.').collect();
    let theirs: Vec<&str> = challenger.split('.').collect();

    if ours.len() != theirs.len() {
        let reason = format!(
            "more version segments ({} vs {})",
            ours.len().max(theirs.len()),
            ours.len().min(theirs.len())
        );
        return if theirs.len() > ours.len() {
            Verdict::TakeChallenger(reason)
        } else {
            Verdict::KeepCurrent(reason)
        };
    }

    for (a, b) in ours.iter().zip(&theirs) {
        let (Ok(x), Ok(y)) = (a.parse::<u64>(), b.parse::<u64>()) else {
            return Verdict::KeepCurrent(format!(
                "first encountered, `{a}` vs `{b}` is not numeric"
            ));
        };
        if x != y {
            let reason = format!("higher version segment ({} vs {})", x.max(y), x.min(y));
            return if y > x {
                Verdict::TakeChallenger(reason)
            } else {
                Verdict::KeepCurrent(reason)
            };
        }
    }
    Verdict::KeepCurrent("equal precedence, first encountered".to_string())
}

/// Reduce a dependencies-first ordering to one entry per identity.
///
/// Order is preserved. Each identity is represented by the first
/// occurrence of its winning version; every other version is reported as a
/// conflict.
///
/// The winner stays where it first occurred, so an artifact that depended on
/// a losing version may come before the winner in the result. Callers that
/// need the winner ahead of every dependent must reorder themselves.
pub fn arbitrate(ordering: &[Artifact]) -> (Vec<Artifact>, ConflictReport) {
    let mut winners: HashMap<(&str, &str), &str> = HashMap::new();
    let mut losers: Vec<((&str, &str), &str, String)> = Vec::new();

    for artifact in ordering {
        let identity = artifact.identity();
        let Some(&current) = winners.get(&identity) else {
            winners.insert(identity, artifact.version());
            continue;
        };
        match compare(current, artifact.version()) {
            Verdict::Same => {}
            Verdict::KeepCurrent(reason) => {
                tracing::debug!("{}: keeping {current} over {} ({reason})", artifact.key(), artifact.version());
                losers.push((identity, artifact.version(), reason));
            }
            Verdict::TakeChallenger(reason) => {
                tracing::debug!("{}: {} replaces {current} ({reason})", artifact.key(), artifact.version());
                losers.push((identity, current, reason));
                winners.insert(identity, artifact.version());
            }
        }
    }

    let mut emitted = HashSet::new();
    let kept: Vec<Artifact> = ordering
        .iter()
        .filter(|a| {
            winners.get(&a.identity()) == Some(&a.version()) && emitted.insert(a.identity())
        })
        .cloned()
        .collect();

    let mut report = ConflictReport::new();
    let mut reported = HashSet::new();
    for (identity, dropped, reason) in losers {
        let winner = winners[&identity];
        if dropped == winner || !reported.insert((identity, dropped)) {
            continue;
        }
        report.add(VersionConflict {
            group: identity.0.to_string(),
            artifact: identity.1.to_string(),
            dropped: dropped.to_string(),
            kept: winner.to_string(),
            reason,
        });
    }

    (kept, report)
}
