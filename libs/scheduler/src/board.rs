//! The schedule board state machine.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use shipdeck_id::PackageId;

use crate::error::ScheduleError;
use crate::notice::Notice;
use crate::package::{Package, ScheduledPackage, WeekNumber};

/// Maximum number of packages a single week can hold.
pub const WEEK_CAPACITY: usize = 7;

/// Where a drag gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Back into the pool, at this position.
    Pool { index: usize },
    /// Onto a calendar week.
    Week(WeekNumber),
}

/// A completed drag gesture, as reported by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub package_id: PackageId,
    /// Position of the package in the pool when the drag started.
    pub source_index: usize,
    /// `None` when the drag was released outside any drop zone.
    pub destination: Option<Destination>,
}

/// What a drag gesture did to the board.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Pool order changed; nothing else did.
    Reordered,
    /// The package left the pool for a week and became the selection.
    Scheduled(ScheduledPackage),
    /// The destination week was full. A notice was posted; the board is
    /// otherwise unchanged.
    Rejected { error: ScheduleError, notice: Notice },
    /// No destination, or the package was not in the pool. No-op.
    Cancelled,
}

/// The drag-and-drop package scheduler.
///
/// Holds the unscheduled pool, the week assignments, the set of display
/// numbers in use, the current selection, and at most one transient notice.
///
/// Invariants upheld by every operation:
/// - a package is in the pool or scheduled to exactly one week, never both
/// - `used_numbers` is exactly the numbers of all live packages
/// - the pool is ordered by display number except across explicit reorders
/// - no week ever holds more than [`WEEK_CAPACITY`] packages
#[derive(Debug, Clone, Default)]
pub struct ScheduleBoard {
    pool: Vec<Package>,
    scheduled: Vec<ScheduledPackage>,
    used_numbers: BTreeSet<u32>,
    selected: Option<PackageId>,
    notice: Option<Notice>,
    notice_seq: u64,
}

impl ScheduleBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A board pre-seeded with `count` packages, numbered from 1.
    pub fn seeded(count: usize) -> Self {
        let mut board = Self::new();
        for _ in 0..count {
            board.create_package();
        }
        board
    }

    /// The unscheduled pool, in display order.
    pub fn pool(&self) -> &[Package] {
        &self.pool
    }

    /// All scheduled packages, in scheduling order.
    pub fn scheduled(&self) -> &[ScheduledPackage] {
        &self.scheduled
    }

    /// Packages assigned to `week`.
    pub fn week(&self, week: WeekNumber) -> impl Iterator<Item = &ScheduledPackage> {
        self.scheduled.iter().filter(move |p| p.week == week)
    }

    pub fn week_occupancy(&self, week: WeekNumber) -> usize {
        self.week(week).count()
    }

    /// The scheduled package whose detail panel is open, if any.
    pub fn selected(&self) -> Option<&ScheduledPackage> {
        let id = self.selected?;
        self.scheduled.iter().find(|p| p.id == id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Creates a package with the smallest display number not in use and
    /// places it in the pool, keeping the pool ordered by number.
    pub fn create_package(&mut self) -> Package {
        let number = self.next_free_number();
        let package = Package::new(number);
        self.used_numbers.insert(number);
        self.pool.push(package);
        self.sort_pool();
        package
    }

    /// Removes a package from the pool and frees its number.
    ///
    /// Returns false (and changes nothing) when the id is not in the pool.
    pub fn remove_from_pool(&mut self, id: PackageId) -> bool {
        let Some(pos) = self.pool.iter().position(|p| p.id == id) else {
            return false;
        };
        let package = self.pool.remove(pos);
        // A stray week entry with the same id must not outlive the package.
        self.scheduled.retain(|p| p.id != id);
        self.used_numbers.remove(&package.number);
        if self.selected == Some(id) {
            self.selected = None;
        }
        true
    }

    /// Moves a scheduled package back into the pool, keeping its identity
    /// and number. Returns false when the id is not scheduled anywhere.
    pub fn remove_from_week(&mut self, id: PackageId) -> bool {
        let Some(pos) = self.scheduled.iter().position(|p| p.id == id) else {
            return false;
        };
        let package = self.scheduled.remove(pos);
        self.pool.push(package.unschedule());
        self.sort_pool();
        if self.selected == Some(id) {
            self.selected = None;
        }
        true
    }

    /// Applies a completed drag gesture.
    ///
    /// Only pool packages are draggable. A missing destination or an unknown
    /// package id leaves the board untouched.
    pub fn apply_drag(&mut self, drag: DragEnd, now: DateTime<Utc>) -> DragOutcome {
        let Some(destination) = drag.destination else {
            return DragOutcome::Cancelled;
        };
        if !self.pool.iter().any(|p| p.id == drag.package_id) {
            return DragOutcome::Cancelled;
        }

        match destination {
            Destination::Pool { index } => self.reorder_pool(drag.source_index, index),
            Destination::Week(week) => self.schedule(drag.package_id, week, now),
        }
    }

    /// Dismisses the current notice if `seq` still matches it. A stale seq
    /// (from a timer that raced with a newer notice) is a no-op.
    pub fn dismiss_notice(&mut self, seq: u64) -> bool {
        match &self.notice {
            Some(n) if n.seq == seq => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    /// Auto-dismiss pass: clears the notice once its TTL has elapsed.
    pub fn expire_notice(&mut self, now: DateTime<Utc>) -> bool {
        match &self.notice {
            Some(n) if n.is_expired(now) => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    /// Closes the detail panel.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn next_free_number(&self) -> u32 {
        let mut n = 1;
        while self.used_numbers.contains(&n) {
            n += 1;
        }
        n
    }

    fn sort_pool(&mut self) {
        self.pool.sort_by_key(|p| p.number);
    }

    fn reorder_pool(&mut self, from: usize, to: usize) -> DragOutcome {
        if from >= self.pool.len() {
            return DragOutcome::Cancelled;
        }
        let package = self.pool.remove(from);
        let to = to.min(self.pool.len());
        self.pool.insert(to, package);
        DragOutcome::Reordered
    }

    fn schedule(&mut self, id: PackageId, week: WeekNumber, now: DateTime<Utc>) -> DragOutcome {
        if self.week_occupancy(week) >= WEEK_CAPACITY {
            let error = ScheduleError::WeekFull {
                week,
                capacity: WEEK_CAPACITY,
            };
            let notice = self.post_notice(error.to_string(), now);
            self.selected = None;
            return DragOutcome::Rejected { error, notice };
        }

        // Presence was checked in apply_drag.
        let Some(pos) = self.pool.iter().position(|p| p.id == id) else {
            return DragOutcome::Cancelled;
        };
        let scheduled = self.pool.remove(pos).schedule_into(week);
        self.scheduled.push(scheduled);
        self.selected = Some(id);
        self.notice = None;
        DragOutcome::Scheduled(scheduled)
    }

    fn post_notice(&mut self, message: String, now: DateTime<Utc>) -> Notice {
        self.notice_seq += 1;
        let notice = Notice {
            seq: self.notice_seq,
            message,
            posted_at: now,
        };
        self.notice = Some(notice.clone());
        notice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn drag_to_week(board: &mut ScheduleBoard, id: PackageId, week: WeekNumber) -> DragOutcome {
        let source_index = board
            .pool()
            .iter()
            .position(|p| p.id == id)
            .unwrap_or_default();
        board.apply_drag(
            DragEnd {
                package_id: id,
                source_index,
                destination: Some(Destination::Week(week)),
            },
            now(),
        )
    }

    fn pool_numbers(board: &ScheduleBoard) -> Vec<u32> {
        board.pool().iter().map(|p| p.number).collect()
    }

    #[test]
    fn test_create_assigns_smallest_free_number() {
        let mut board = ScheduleBoard::new();
        assert_eq!(board.create_package().number, 1);
        assert_eq!(board.create_package().number, 2);
        assert_eq!(board.create_package().number, 3);
    }

    #[test]
    fn test_deleted_number_is_reused_first() {
        let mut board = ScheduleBoard::new();
        board.create_package();
        let p2 = board.create_package();
        board.create_package();

        assert!(board.remove_from_pool(p2.id));
        assert_eq!(board.create_package().number, 2);
        assert_eq!(pool_numbers(&board), vec![1, 2, 3]);
    }

    #[test]
    fn test_scheduled_package_keeps_its_number_reserved() {
        let mut board = ScheduleBoard::new();
        let p1 = board.create_package();
        drag_to_week(&mut board, p1.id, 10);

        // Number 1 is on the calendar, so the pool gets 2.
        assert_eq!(board.create_package().number, 2);
    }

    #[test]
    fn test_remove_from_pool_unknown_id_is_noop() {
        let mut board = ScheduleBoard::seeded(2);
        assert!(!board.remove_from_pool(PackageId::new()));
        assert_eq!(board.pool().len(), 2);
    }

    #[test]
    fn test_remove_from_pool_ignores_scheduled_package() {
        let mut board = ScheduleBoard::new();
        let p1 = board.create_package();
        drag_to_week(&mut board, p1.id, 10);

        assert!(!board.remove_from_pool(p1.id));
        assert_eq!(board.week_occupancy(10), 1);
    }

    #[test]
    fn test_unschedule_returns_package_to_sorted_pool() {
        let mut board = ScheduleBoard::seeded(3);
        let p2 = board.pool()[1];
        drag_to_week(&mut board, p2.id, 12);
        assert_eq!(pool_numbers(&board), vec![1, 3]);

        assert!(board.remove_from_week(p2.id));
        assert_eq!(pool_numbers(&board), vec![1, 2, 3]);
        let back = board.pool()[1];
        assert_eq!(back.id, p2.id);
        assert_eq!(back.number, 2);
    }

    #[test]
    fn test_unschedule_clears_selection() {
        let mut board = ScheduleBoard::seeded(1);
        let p1 = board.pool()[0];
        drag_to_week(&mut board, p1.id, 12);
        assert_eq!(board.selected().map(|p| p.id), Some(p1.id));

        board.remove_from_week(p1.id);
        assert!(board.selected().is_none());
    }

    #[test]
    fn test_reorder_moves_package_within_pool() {
        let mut board = ScheduleBoard::seeded(3);
        let first = board.pool()[0];
        let outcome = board.apply_drag(
            DragEnd {
                package_id: first.id,
                source_index: 0,
                destination: Some(Destination::Pool { index: 2 }),
            },
            now(),
        );

        assert_eq!(outcome, DragOutcome::Reordered);
        assert_eq!(pool_numbers(&board), vec![2, 3, 1]);
    }

    #[test]
    fn test_reorder_clamps_out_of_range_index() {
        let mut board = ScheduleBoard::seeded(2);
        let first = board.pool()[0];
        let outcome = board.apply_drag(
            DragEnd {
                package_id: first.id,
                source_index: 0,
                destination: Some(Destination::Pool { index: 99 }),
            },
            now(),
        );

        assert_eq!(outcome, DragOutcome::Reordered);
        assert_eq!(pool_numbers(&board), vec![2, 1]);
    }

    #[test]
    fn test_drag_without_destination_is_cancelled() {
        let mut board = ScheduleBoard::seeded(1);
        let p1 = board.pool()[0];
        let outcome = board.apply_drag(
            DragEnd {
                package_id: p1.id,
                source_index: 0,
                destination: None,
            },
            now(),
        );

        assert_eq!(outcome, DragOutcome::Cancelled);
        assert_eq!(board.pool().len(), 1);
    }

    #[test]
    fn test_drag_of_unknown_package_is_cancelled() {
        let mut board = ScheduleBoard::seeded(1);
        let outcome = board.apply_drag(
            DragEnd {
                package_id: PackageId::new(),
                source_index: 0,
                destination: Some(Destination::Week(10)),
            },
            now(),
        );

        assert_eq!(outcome, DragOutcome::Cancelled);
    }

    #[test]
    fn test_scheduling_selects_the_package() {
        let mut board = ScheduleBoard::seeded(1);
        let p1 = board.pool()[0];
        let outcome = drag_to_week(&mut board, p1.id, 15);

        match outcome {
            DragOutcome::Scheduled(s) => {
                assert_eq!(s.id, p1.id);
                assert_eq!(s.week, 15);
            }
            other => panic!("expected Scheduled, got {other:?}"),
        }
        assert_eq!(board.selected().map(|p| p.id), Some(p1.id));
        assert!(board.pool().is_empty());
    }

    #[test]
    fn test_eighth_package_is_rejected_with_notice() {
        let mut board = ScheduleBoard::seeded(8);
        for i in 0..7 {
            let id = board.pool()[0].id;
            let outcome = drag_to_week(&mut board, id, 10);
            assert!(
                matches!(outcome, DragOutcome::Scheduled(_)),
                "package {i} should fit"
            );
        }
        assert_eq!(board.week_occupancy(10), WEEK_CAPACITY);

        let last = board.pool()[0];
        let outcome = drag_to_week(&mut board, last.id, 10);
        match outcome {
            DragOutcome::Rejected { error, notice } => {
                assert_eq!(
                    error,
                    ScheduleError::WeekFull {
                        week: 10,
                        capacity: WEEK_CAPACITY
                    }
                );
                assert_eq!(notice.message, "Cannot add more than 7 packages to Week 10");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }

        // The package stays in the pool; the week is untouched.
        assert_eq!(board.pool()[0].id, last.id);
        assert_eq!(board.week_occupancy(10), WEEK_CAPACITY);
        assert!(board.notice().is_some());
        assert!(board.selected().is_none());
    }

    #[test]
    fn test_full_week_does_not_block_other_weeks() {
        let mut board = ScheduleBoard::seeded(8);
        for _ in 0..7 {
            let id = board.pool()[0].id;
            drag_to_week(&mut board, id, 10);
        }

        let last = board.pool()[0];
        assert!(matches!(
            drag_to_week(&mut board, last.id, 11),
            DragOutcome::Scheduled(_)
        ));
        assert_eq!(board.week_occupancy(11), 1);
    }

    #[test]
    fn test_successful_schedule_clears_pending_notice() {
        let mut board = ScheduleBoard::seeded(9);
        for _ in 0..7 {
            let id = board.pool()[0].id;
            drag_to_week(&mut board, id, 10);
        }
        let id = board.pool()[0].id;
        drag_to_week(&mut board, id, 10);
        assert!(board.notice().is_some());

        drag_to_week(&mut board, id, 11);
        assert!(board.notice().is_none());
    }

    #[test]
    fn test_dismiss_with_stale_seq_is_noop() {
        let mut board = ScheduleBoard::seeded(9);
        for _ in 0..7 {
            let id = board.pool()[0].id;
            drag_to_week(&mut board, id, 10);
        }

        let id = board.pool()[0].id;
        let DragOutcome::Rejected { notice: first, .. } = drag_to_week(&mut board, id, 10) else {
            panic!("expected rejection");
        };
        let DragOutcome::Rejected { notice: second, .. } = drag_to_week(&mut board, id, 10) else {
            panic!("expected rejection");
        };
        assert_ne!(first.seq, second.seq);

        // The first notice's timer fires late; the second notice survives.
        assert!(!board.dismiss_notice(first.seq));
        assert_eq!(board.notice().map(|n| n.seq), Some(second.seq));

        assert!(board.dismiss_notice(second.seq));
        assert!(board.notice().is_none());
    }

    #[test]
    fn test_expire_notice_honors_ttl() {
        let mut board = ScheduleBoard::seeded(8);
        let posted = now();
        for _ in 0..7 {
            let id = board.pool()[0].id;
            drag_to_week(&mut board, id, 10);
        }
        let id = board.pool()[0].id;
        board.apply_drag(
            DragEnd {
                package_id: id,
                source_index: 0,
                destination: Some(Destination::Week(10)),
            },
            posted,
        );

        assert!(!board.expire_notice(posted + TimeDelta::seconds(2)));
        assert!(board.notice().is_some());
        assert!(board.expire_notice(posted + TimeDelta::seconds(3)));
        assert!(board.notice().is_none());
    }

    // Random operation sequences never break the board's invariants.
    proptest! {
        #[test]
        fn prop_board_invariants_hold(ops in proptest::collection::vec(any::<(u8, u8, u8)>(), 0..64)) {
            let mut board = ScheduleBoard::new();
            let t = now();

            for (kind, a, b) in ops {
                match kind % 5 {
                    0 => {
                        board.create_package();
                    }
                    1 => {
                        if let Some(p) = board.pool().get(a as usize % board.pool().len().max(1)).copied() {
                            board.remove_from_pool(p.id);
                        }
                    }
                    2 => {
                        if let Some(p) = board.scheduled().get(a as usize % board.scheduled().len().max(1)).copied() {
                            board.remove_from_week(p.id);
                        }
                    }
                    3 => {
                        if let Some(p) = board.pool().get(a as usize % board.pool().len().max(1)).copied() {
                            let source_index = board.pool().iter().position(|q| q.id == p.id).unwrap();
                            board.apply_drag(
                                DragEnd {
                                    package_id: p.id,
                                    source_index,
                                    destination: Some(Destination::Week(10 + (b as u32 % 3))),
                                },
                                t,
                            );
                        }
                    }
                    _ => {
                        if let Some(p) = board.pool().get(a as usize % board.pool().len().max(1)).copied() {
                            let source_index = board.pool().iter().position(|q| q.id == p.id).unwrap();
                            board.apply_drag(
                                DragEnd {
                                    package_id: p.id,
                                    source_index,
                                    destination: Some(Destination::Pool { index: b as usize }),
                                },
                                t,
                            );
                        }
                    }
                }

                // Pool and calendar are disjoint and cover every used number.
                let mut numbers = BTreeSet::new();
                for p in board.pool() {
                    prop_assert!(numbers.insert(p.number));
                }
                for p in board.scheduled() {
                    prop_assert!(numbers.insert(p.number));
                }
                prop_assert_eq!(&numbers, &board.used_numbers);

                for week in [10u32, 11, 12] {
                    prop_assert!(board.week_occupancy(week) <= WEEK_CAPACITY);
                }
            }
        }
    }
}
