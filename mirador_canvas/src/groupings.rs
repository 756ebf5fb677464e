// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partitioning of canvases into display groups.

use alloc::vec::Vec;
use core::cell::OnceCell;
use core::mem;

use smallvec::{SmallVec, smallvec};

use crate::model::Canvas;
use crate::modes::ViewType;

/// An ordered run of canvases shown together.
///
/// Groups hold one canvas, two in book mode, or every canvas in scroll mode.
pub type CanvasGroup<'a> = SmallVec<[&'a Canvas; 2]>;

/// Canvas groups derived from an ordered canvas list and a [`ViewType`].
///
/// The partition is computed on first use and cached for the lifetime of the
/// value; build a new `CanvasGroupings` when either input changes.
///
/// Invariants of the partition:
/// - Every canvas appears in exactly one group.
/// - Groups, and canvases within a group, keep the input order.
/// - In book mode, a canvas carrying a pagination hint is alone in its group
///   unless it is the first canvas.
#[derive(Debug)]
pub struct CanvasGroupings<'a> {
    canvases: &'a [Canvas],
    view_type: ViewType,
    partition: OnceCell<Partition<'a>>,
}

#[derive(Debug)]
struct Partition<'a> {
    groups: Vec<CanvasGroup<'a>>,
    /// Group index for every canvas index.
    canvas_to_group: Vec<usize>,
}

impl<'a> CanvasGroupings<'a> {
    /// Creates groupings over `canvases` for `view_type`.
    #[must_use]
    pub fn new(canvases: &'a [Canvas], view_type: ViewType) -> Self {
        Self {
            canvases,
            view_type,
            partition: OnceCell::new(),
        }
    }

    /// The canvases being grouped.
    #[must_use]
    pub fn canvases(&self) -> &'a [Canvas] {
        self.canvases
    }

    /// The view type driving the partition.
    #[must_use]
    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    /// All groups, in order.
    #[must_use]
    pub fn groupings(&self) -> &[CanvasGroup<'a>] {
        &self.partition().groups
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groupings().len()
    }

    /// Returns `true` when there are no groups (no canvases).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groupings().is_empty()
    }

    /// Iterates over the groups in order.
    pub fn iter(&self) -> impl Iterator<Item = &CanvasGroup<'a>> + '_ {
        self.groupings().iter()
    }

    /// Resolves a requested position to the group to display.
    ///
    /// - Scroll: always the single group.
    /// - Book: `index` is a canvas index; its enclosing pair is returned.
    /// - Otherwise: the group at `index`.
    ///
    /// An out-of-range index yields `None` ("no such page").
    #[must_use]
    pub fn get_canvases(&self, index: usize) -> Option<&CanvasGroup<'a>> {
        let partition = self.partition();
        match self.view_type {
            ViewType::Scroll => partition.groups.first(),
            ViewType::Book => partition
                .canvas_to_group
                .get(index)
                .and_then(|&group| partition.groups.get(group)),
            ViewType::Single | ViewType::Gallery => partition.groups.get(index),
        }
    }

    /// Index of the group that contains the canvas at `canvas_index`.
    #[must_use]
    pub fn group_index_of(&self, canvas_index: usize) -> Option<usize> {
        self.partition().canvas_to_group.get(canvas_index).copied()
    }

    /// Group containing the canvas identified by `canvas_id`.
    #[must_use]
    pub fn group_for_canvas_id(&self, canvas_id: &str) -> Option<&CanvasGroup<'a>> {
        let canvas_index = self.position_of(canvas_id)?;
        let group = self.group_index_of(canvas_index)?;
        self.groupings().get(group)
    }

    /// Identifiers of the canvases shown together with `canvas_id`.
    ///
    /// Empty when the canvas is unknown.
    #[must_use]
    pub fn visible_canvas_ids(&self, canvas_id: &str) -> Vec<&'a str> {
        self.group_for_canvas_id(canvas_id)
            .map(|group| group.iter().map(|canvas| canvas.id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Group following the one that contains `canvas_index`.
    #[must_use]
    pub fn next_group(&self, canvas_index: usize) -> Option<&CanvasGroup<'a>> {
        let group = self.group_index_of(canvas_index)?;
        self.groupings().get(group + 1)
    }

    /// Group preceding the one that contains `canvas_index`.
    #[must_use]
    pub fn previous_group(&self, canvas_index: usize) -> Option<&CanvasGroup<'a>> {
        let group = self.group_index_of(canvas_index)?;
        self.groupings().get(group.checked_sub(1)?)
    }

    fn position_of(&self, canvas_id: &str) -> Option<usize> {
        self.canvases.iter().position(|canvas| canvas.id == canvas_id)
    }

    fn partition(&self) -> &Partition<'a> {
        self.partition
            .get_or_init(|| partition(self.canvases, self.view_type))
    }
}

fn partition(canvases: &[Canvas], view_type: ViewType) -> Partition<'_> {
    match view_type {
        ViewType::Book => book_partition(canvases),
        ViewType::Scroll if canvases.is_empty() => Partition {
            groups: Vec::new(),
            canvas_to_group: Vec::new(),
        },
        ViewType::Scroll => Partition {
            groups: alloc::vec![canvases.iter().collect()],
            canvas_to_group: alloc::vec![0; canvases.len()],
        },
        ViewType::Single | ViewType::Gallery => Partition {
            groups: canvases.iter().map(|canvas| smallvec![canvas]).collect(),
            canvas_to_group: (0..canvases.len()).collect(),
        },
    }
}

fn book_partition(canvases: &[Canvas]) -> Partition<'_> {
    let mut groups: Vec<CanvasGroup<'_>> = Vec::with_capacity(canvases.len().div_ceil(2));
    let mut canvas_to_group = Vec::with_capacity(canvases.len());
    let mut current: CanvasGroup<'_> = SmallVec::new();

    for (index, canvas) in canvases.iter().enumerate() {
        if index > 0 && canvas.hint.is_some() {
            if !current.is_empty() {
                groups.push(mem::take(&mut current));
            }
            canvas_to_group.push(groups.len());
            groups.push(smallvec![canvas]);
            continue;
        }

        canvas_to_group.push(groups.len());
        current.push(canvas);
        if current.len() == 2 {
            groups.push(mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }

    Partition {
        groups,
        canvas_to_group,
    }
}
