//! Cell layout and snap offsets.
//!
//! Everything here is a pure function of the current layout inputs. The
//! carousel recomputes the whole [`Geometry`] whenever the viewport width or
//! the slide count changes and never patches it in place.

use smallvec::SmallVec;

/// Fit tests tolerate sub-pixel error from fit-mode division.
const FIT_EPSILON: f32 = 0.01;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and absolute left offset of one slide.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellGeometry {
    pub width: f32,
    pub offset: f32,
}

pub type SnapOffsets = SmallVec<[f32; 16]>;

/// Inputs of [`compute_geometry`], already resolved from the configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometryParams {
    pub cell_count: usize,
    pub cell_width: f32,
    pub margin: f32,
    pub margin_first: f32,
    pub margin_last: f32,
    pub viewport_width: f32,
    /// Fit mode when non-zero: this many cells exactly fill the viewport.
    pub cells_to_show: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub cells: Vec<CellGeometry>,
    pub slides_in_view: usize,
    pub snap_offsets: SnapOffsets,
    pub viewport_width: f32,
    /// Edge margins actually applied (fit mode zeroes them).
    pub margin_first: f32,
    pub margin_last: f32,
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Index of the last snap, `None` when navigation is disabled.
    pub fn last_index(&self) -> Option<usize> {
        self.snap_offsets.len().checked_sub(1)
    }

    pub fn snap(&self, index: usize) -> Option<f32> {
        self.snap_offsets.get(index).copied()
    }

    /// First and last snap, the bounds past which dragging is damped.
    pub fn bounds(&self) -> (f32, f32) {
        match (self.snap_offsets.first(), self.snap_offsets.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (0.0, 0.0),
        }
    }

    /// Right edge of the last cell plus the trailing margin.
    pub fn content_width(&self) -> f32 {
        self.cells
            .last()
            .map(|c| c.offset + c.width + self.margin_last)
            .unwrap_or(0.0)
    }

    /// Translation at which the content end meets the viewport's right edge.
    pub fn max_translate(&self) -> f32 {
        self.content_width() - self.viewport_width
    }

    /// Index of the snap closest to `translate`; ties go to the lower index.
    pub fn nearest_index(&self, translate: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, snap) in self.snap_offsets.iter().enumerate() {
            let d = (snap - translate).abs();
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Resolved width of every cell, honouring fit mode.
pub fn cell_width(p: &GeometryParams) -> f32 {
    if p.cells_to_show > 0 {
        let n = p.cells_to_show as f32;
        ((p.viewport_width - (n - 1.0) * p.margin) / n).max(0.0)
    } else {
        p.cell_width.max(0.0)
    }
}

pub fn compute_geometry(p: &GeometryParams) -> Geometry {
    let (margin_first, margin_last) = if p.cells_to_show > 0 {
        (0.0, 0.0)
    } else {
        (p.margin_first, p.margin_last)
    };
    let width = cell_width(p);

    let mut cells = Vec::with_capacity(p.cell_count);
    let mut offset = margin_first;
    for i in 0..p.cell_count {
        if i > 0 {
            offset += width + p.margin;
        }
        cells.push(CellGeometry { width, offset });
    }

    let mut geometry = Geometry {
        cells,
        slides_in_view: 0,
        snap_offsets: SnapOffsets::new(),
        viewport_width: p.viewport_width,
        margin_first,
        margin_last,
    };
    if geometry.is_empty() {
        return geometry;
    }

    geometry.slides_in_view = slides_in_view(&geometry);
    geometry.snap_offsets = snap_offsets(&geometry);
    geometry
}

/// Trailing cells that fit fully once the content is scrolled to its end.
fn slides_in_view(g: &Geometry) -> usize {
    let end = g.content_width();
    let mut count = 0;
    for cell in g.cells.iter().rev() {
        if end - cell.offset > g.viewport_width + FIT_EPSILON {
            break;
        }
        count += 1;
    }
    count
}

fn snap_offsets(g: &Geometry) -> SnapOffsets {
    let n = g.cells.len();
    let last_start = n.saturating_sub(g.slides_in_view.max(1));
    let end = g.max_translate();

    let mut snaps = SnapOffsets::new();
    snaps.push(g.cells[0].offset - g.margin_first);
    for (i, cell) in g.cells.iter().enumerate().skip(1) {
        let raw = cell.offset - g.margin_first;
        if i >= last_start || raw >= end {
            // The window starting here reaches the content end.
            if snaps.last().is_some_and(|&prev| end > prev) {
                snaps.push(end);
            }
            break;
        }
        snaps.push(raw);
    }
    snaps
}
