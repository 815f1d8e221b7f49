//! Path-group linker
//!
//! Enemy, item and checkpoint paths are stored as two sections: a flat point
//! list and a list of groups, each covering a contiguous range of points and
//! linking to up to six predecessor and six successor groups. The tabular form
//! has one row per point, and only the first point of a group carries the
//! group's id and links.
//!
//! [`expand`] turns points + groups into rows, validating that the group
//! ranges partition the points. [`flatten`] does the reverse: every row with
//! group data starts a new group that runs until the next such row.

use crate::cursor::narrow;
use crate::error::{KmpError, Result};
use crate::section::{MAX_GROUP_LINKS, NO_LINK, PathGroup, SectionTag};
use std::ops::Range;
use tracing::warn;

/// Group data carried by the first row of each group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupLinks {
    /// Group index
    pub id: u8,
    /// Predecessor group indices, [`NO_LINK`] when unused
    pub previous: [u8; MAX_GROUP_LINKS],
    /// Successor group indices, [`NO_LINK`] when unused
    pub next: [u8; MAX_GROUP_LINKS],
    /// Dispatch bytes (enemy paths only)
    pub dispatch: [u8; 2],
}

impl GroupLinks {
    /// Group with no links
    #[must_use]
    pub const fn unlinked(id: u8) -> Self {
        Self {
            id,
            previous: [NO_LINK; MAX_GROUP_LINKS],
            next: [NO_LINK; MAX_GROUP_LINKS],
            dispatch: [0; 2],
        }
    }
}

/// One path point with the group data of the group it starts, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathRow<P> {
    /// The point record
    pub point: P,
    /// Present on the first point of each group
    pub group: Option<GroupLinks>,
}

impl<P> PathRow<P> {
    /// Row that continues the current group
    pub const fn member(point: P) -> Self {
        Self { point, group: None }
    }

    /// Row that starts a new group
    pub const fn start(point: P, group: GroupLinks) -> Self {
        Self {
            point,
            group: Some(group),
        }
    }
}

/// Split `rows` into maximal runs, each beginning at a row where `is_start`
/// holds
///
/// Returns `None` if the first row does not start a run.
pub fn split_runs<T>(rows: &[T], is_start: impl Fn(&T) -> bool) -> Option<Vec<Range<usize>>> {
    let mut runs: Vec<Range<usize>> = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        if is_start(row) {
            if let Some(last) = runs.last_mut() {
                last.end = index;
            }
            runs.push(index..rows.len());
        } else if runs.is_empty() {
            return None;
        }
    }
    Some(runs)
}

/// Attach group data to the first point of each group
///
/// `section` is the group section tag used in errors. Groups must cover
/// `[0, points.len())` in order with no gaps, overlaps or empty ranges.
pub fn expand<P: Copy>(
    section: SectionTag,
    points: &[P],
    groups: &[PathGroup],
) -> Result<Vec<PathRow<P>>> {
    let mut rows: Vec<PathRow<P>> = points.iter().copied().map(PathRow::member).collect();

    let mut expected = 0;
    for (index, group) in groups.iter().enumerate() {
        let start = usize::from(group.start);
        let end = group.end();
        if start != expected || group.length == 0 || end > points.len() {
            return Err(KmpError::InvalidGroupRange {
                section,
                group: index,
                start,
                end,
                points: points.len(),
            });
        }

        rows[start].group = Some(GroupLinks {
            id: narrow(index, section.as_str(), index, "group id")?,
            previous: group.previous,
            next: group.next,
            dispatch: group.dispatch,
        });
        expected = end;
    }

    if expected != points.len() {
        return Err(KmpError::InvalidGroupRange {
            section,
            group: groups.len(),
            start: expected,
            end: points.len(),
            points: points.len(),
        });
    }

    Ok(rows)
}

/// Re-split rows into point and group records
///
/// `section` is the group section tag used in errors. Fails with
/// [`KmpError::MissingRequiredGroup`] when there are points but the first row
/// carries no group data.
pub fn flatten<P: Copy>(
    section: SectionTag,
    rows: &[PathRow<P>],
) -> Result<(Vec<P>, Vec<PathGroup>)> {
    let runs = split_runs(rows, |row| row.group.is_some())
        .ok_or(KmpError::MissingRequiredGroup { section, row: 0 })?;

    let mut groups = Vec::with_capacity(runs.len());
    for (index, run) in runs.into_iter().enumerate() {
        let Some(links) = rows[run.start].group else {
            return Err(KmpError::MissingRequiredGroup {
                section,
                row: run.start,
            });
        };
        if usize::from(links.id) != index {
            warn!(
                %section,
                row = run.start,
                id = links.id,
                position = index,
                "group id does not match its position; using the position"
            );
        }

        groups.push(PathGroup {
            start: narrow(run.start, section.as_str(), run.start, "group start")?,
            length: narrow(run.len(), section.as_str(), run.start, "group length")?,
            previous: links.previous,
            next: links.next,
            dispatch: links.dispatch,
        });
    }

    let points = rows.iter().map(|row| row.point).collect();
    Ok((points, groups))
}

/// Checkpoint link bytes for one point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointLinks {
    /// Previous checkpoint in the same group, or [`NO_LINK`]
    pub previous: u8,
    /// Next checkpoint in the same group, or [`NO_LINK`]
    pub next: u8,
}

/// Forward scan that assigns checkpoint link bytes from group boundaries
///
/// A point's successor is only known once the following point has been seen,
/// so each point is held as pending until the scan advances past it.
#[derive(Debug, Default)]
pub struct CheckpointLinks {
    pending: Option<Pending>,
    links: Vec<PointLinks>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    index: usize,
    previous: u8,
}

impl CheckpointLinks {
    /// Start an empty scan
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next point; `starts_group` marks the first point of a group
    ///
    /// A group of one point links to nothing on either side.
    pub fn advance(&mut self, starts_group: bool) -> Result<()> {
        let index = self.links.len() + usize::from(self.pending.is_some());

        if let Some(pending) = self.pending.take() {
            let next = if starts_group {
                NO_LINK
            } else {
                link_byte(index, pending.index)?
            };
            self.links.push(PointLinks {
                previous: pending.previous,
                next,
            });
        }

        let previous = if starts_group || index == 0 {
            NO_LINK
        } else {
            link_byte(index - 1, index)?
        };
        self.pending = Some(Pending { index, previous });
        Ok(())
    }

    /// Flush the last point and return one entry per point fed
    #[must_use]
    pub fn finish(mut self) -> Vec<PointLinks> {
        if let Some(pending) = self.pending.take() {
            self.links.push(PointLinks {
                previous: pending.previous,
                next: NO_LINK,
            });
        }
        self.links
    }

    /// Run a whole scan over group-start flags
    pub fn compute(starts: impl IntoIterator<Item = bool>) -> Result<Vec<PointLinks>> {
        let mut scan = Self::new();
        for starts_group in starts {
            scan.advance(starts_group)?;
        }
        Ok(scan.finish())
    }
}

fn link_byte(target: usize, row: usize) -> Result<u8> {
    let byte: u8 = narrow(target, SectionTag::Ckpt.as_str(), row, "checkpoint link")?;
    if byte == NO_LINK {
        return Err(KmpError::ValueOutOfRange {
            section: SectionTag::Ckpt.to_string(),
            row,
            field: "checkpoint link".to_string(),
            value: target.to_string(),
        });
    }
    Ok(byte)
}
