//! Snapshot diffing
//!
//! [`diff`] is the decision-making half of a sync. It never touches the
//! filesystem: given two snapshots and their roots it yields the actions that
//! make the destination hold exactly the source's content, under the source's
//! filenames.

use std::collections::{HashMap, HashSet};
use std::iter;
use std::path::Path;

use dirsync_fs::Snapshot;

use crate::Action;

/// Compute the actions that bring `dest` in line with `source`.
///
/// Actions come in three groups, always in this order:
///
/// 1. `Move` for every source entry the destination holds under another
///    name. A move runs before any move that targets its origin, so chained
///    renames never clobber each other.
/// 2. `Copy` for every source entry whose digest is absent from the
///    destination.
/// 3. `Delete` for every destination digest absent from the source.
///
/// Moves precede copies because a copy may land on a name that a move still
/// reads from. A destination-only file whose name is about to be overwritten
/// gets no `Delete`, since removing that path afterwards would destroy the
/// new content.
///
/// Nothing is computed until the first call to `next`. The move group is
/// planned as a whole at that point; copies and deletes are yielded one at a
/// time.
pub fn diff<'a>(
    source: &'a Snapshot,
    dest: &'a Snapshot,
    source_root: &'a Path,
    dest_root: &'a Path,
) -> impl Iterator<Item = Action> + 'a {
    let moves = iter::once(()).flat_map(move |()| plan_moves(source, dest, dest_root));

    let copies = source
        .iter()
        .filter(move |(digest, _)| !dest.contains(digest))
        .map(move |(_, filename)| {
            Action::copy(source_root.join(filename), dest_root.join(filename))
        });

    let deletions = iter::once(()).flat_map(move |()| {
        let overwritten: HashSet<&str> = source.iter().map(|(_, filename)| filename).collect();
        dest.iter()
            .filter(move |(digest, filename)| {
                !source.contains(digest) && !overwritten.contains(filename)
            })
            .map(move |(_, filename)| Action::delete(dest_root.join(filename)))
    });

    moves.chain(copies).chain(deletions)
}

/// Order renames so each one runs after the rename that vacates its target.
///
/// Renames form simple chains and cycles over filenames. A chain is emitted
/// from its free end. A cycle is opened by parking its first origin under an
/// unused name and finished by moving the parked file into place.
fn plan_moves(source: &Snapshot, dest: &Snapshot, dest_root: &Path) -> Vec<Action> {
    let renames: Vec<(&str, &str)> = source
        .iter()
        .filter_map(|(digest, filename)| match dest.get(digest) {
            Some(existing) if existing != filename => Some((existing, filename)),
            _ => None,
        })
        .collect();
    let by_origin: HashMap<&str, usize> = renames
        .iter()
        .enumerate()
        .map(|(index, (from, _))| (*from, index))
        .collect();

    let mut taken: HashSet<String> = source
        .iter()
        .chain(dest.iter())
        .map(|(_, filename)| filename.to_owned())
        .collect();
    let mut planned = vec![false; renames.len()];
    let mut actions = Vec::with_capacity(renames.len());

    for start in 0..renames.len() {
        if planned[start] {
            continue;
        }
        planned[start] = true;

        // Follow renames whose origin is the previous rename's target
        let mut chain = vec![start];
        let mut cycle = false;
        let mut current = start;
        while let Some(&next) = by_origin.get(renames[current].1) {
            if next == start {
                cycle = true;
                break;
            }
            if planned[next] {
                break;
            }
            planned[next] = true;
            chain.push(next);
            current = next;
        }

        if !cycle {
            actions.extend(chain.iter().rev().map(|&index| {
                let (from, to) = renames[index];
                Action::moved(dest_root.join(from), dest_root.join(to))
            }));
            continue;
        }

        let (first_from, first_to) = renames[start];
        let parked = parking_name(first_from, &mut taken);
        tracing::debug!(origin = %first_from, parked = %parked, "breaking rename cycle");
        actions.push(Action::moved(dest_root.join(first_from), dest_root.join(&parked)));
        actions.extend(chain[1..].iter().rev().map(|&index| {
            let (from, to) = renames[index];
            Action::moved(dest_root.join(from), dest_root.join(to))
        }));
        actions.push(Action::moved(dest_root.join(&parked), dest_root.join(first_to)));
    }

    actions
}

/// A hidden filename next to `origin` that no snapshot entry uses.
fn parking_name(origin: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = format!(".{origin}.dirsync-swap");
    let mut attempt = 1;
    while taken.contains(&candidate) {
        attempt += 1;
        candidate = format!(".{origin}.dirsync-swap{attempt}");
    }
    taken.insert(candidate.clone());
    candidate
}
