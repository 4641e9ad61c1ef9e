use std::rc::Rc;

use marquee_core::{ListPosition, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Sizing and scrolling behavior of one section.
#[derive(Clone, Debug)]
pub struct SectionLayout {
    pub axis: Axis,
    /// Main-axis extent of one item: row height for vertical sections, item
    /// width for horizontal strips. Paged sections span the viewport width.
    pub item_extent: f32,
    /// Strip height for horizontal sections; unused for vertical ones.
    pub cross_extent: f32,
    pub spacing: f32,
    pub paging: bool,
    pub header_extent: Option<f32>,
    pub footer_extent: Option<f32>,
}

impl SectionLayout {
    pub fn rows(height: f32) -> Self {
        Self {
            axis: Axis::Vertical,
            item_extent: height,
            cross_extent: 0.0,
            spacing: 0.0,
            paging: false,
            header_extent: None,
            footer_extent: None,
        }
    }

    /// Full-width pages snapped one at a time, the hero-carousel shape.
    pub fn paged_full_bleed(height: f32) -> Self {
        Self {
            axis: Axis::Horizontal,
            item_extent: 0.0,
            cross_extent: height,
            spacing: 0.0,
            paging: true,
            header_extent: None,
            footer_extent: None,
        }
    }

    pub fn horizontal_strip(item_width: f32, height: f32) -> Self {
        Self {
            axis: Axis::Horizontal,
            item_extent: item_width,
            cross_extent: height,
            spacing: 0.0,
            paging: false,
            header_extent: None,
            footer_extent: None,
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_header(mut self, extent: f32) -> Self {
        self.header_extent = Some(extent);
        self
    }

    pub fn with_footer(mut self, extent: f32) -> Self {
        self.footer_extent = Some(extent);
        self
    }

    fn resolved_item_extent(&self, viewport: Size) -> f32 {
        if self.paging {
            viewport.width
        } else {
            self.item_extent
        }
    }

    fn body_height(&self, count: usize) -> f32 {
        match self.axis {
            Axis::Vertical => {
                if count == 0 {
                    0.0
                } else {
                    count as f32 * self.item_extent + (count - 1) as f32 * self.spacing
                }
            }
            Axis::Horizontal => self.cross_extent,
        }
    }

    fn height(&self, count: usize) -> f32 {
        self.header_extent.unwrap_or(0.0) + self.body_height(count) + self.footer_extent.unwrap_or(0.0)
    }
}

/// Per-section-varying layout: sections stack vertically, each laid out by
/// its own `SectionLayout`.
#[derive(Clone)]
pub struct ListLayout {
    resolve: Rc<dyn Fn(usize) -> SectionLayout>,
}

impl ListLayout {
    pub fn uniform(section: SectionLayout) -> Self {
        Self {
            resolve: Rc::new(move |_| section.clone()),
        }
    }

    pub fn per_section(resolve: impl Fn(usize) -> SectionLayout + 'static) -> Self {
        Self {
            resolve: Rc::new(resolve),
        }
    }

    pub fn section(&self, index: usize) -> SectionLayout {
        (self.resolve)(index)
    }

    pub fn section_origin(&self, counts: &[usize], section: usize) -> f32 {
        counts[..section]
            .iter()
            .enumerate()
            .map(|(i, &n)| self.section(i).height(n))
            .sum()
    }

    pub fn content_height(&self, counts: &[usize]) -> f32 {
        counts
            .iter()
            .enumerate()
            .map(|(i, &n)| self.section(i).height(n))
            .sum()
    }

    /// Content-space frame of one row.
    pub fn item_frame(&self, counts: &[usize], viewport: Size, pos: ListPosition) -> Rect {
        let section = self.section(pos.section);
        let top = self.section_origin(counts, pos.section) + section.header_extent.unwrap_or(0.0);
        match section.axis {
            Axis::Vertical => Rect {
                x: 0.0,
                y: top + pos.row as f32 * (section.item_extent + section.spacing),
                w: viewport.width,
                h: section.item_extent,
            },
            Axis::Horizontal => {
                let w = section.resolved_item_extent(viewport);
                Rect {
                    x: pos.row as f32 * (w + section.spacing),
                    y: top,
                    w,
                    h: section.cross_extent,
                }
            }
        }
    }

    pub fn header_frame(&self, counts: &[usize], viewport: Size, section: usize) -> Option<Rect> {
        let layout = self.section(section);
        let extent = layout.header_extent?;
        Some(Rect {
            x: 0.0,
            y: self.section_origin(counts, section),
            w: viewport.width,
            h: extent,
        })
    }

    pub fn footer_frame(&self, counts: &[usize], viewport: Size, section: usize) -> Option<Rect> {
        let layout = self.section(section);
        let extent = layout.footer_extent?;
        let top = self.section_origin(counts, section)
            + layout.header_extent.unwrap_or(0.0)
            + layout.body_height(counts[section]);
        Some(Rect {
            x: 0.0,
            y: top,
            w: viewport.width,
            h: extent,
        })
    }

    /// Sections whose vertical band intersects the viewport at `offset`.
    pub fn visible_sections(&self, counts: &[usize], viewport: Size, offset: f32) -> Vec<usize> {
        let window = Rect {
            x: 0.0,
            y: offset,
            w: viewport.width,
            h: viewport.height,
        };
        let mut out = Vec::new();
        let mut y = 0.0;
        for (section, &count) in counts.iter().enumerate() {
            let height = self.section(section).height(count);
            let band = Rect {
                x: 0.0,
                y,
                w: viewport.width,
                h: height,
            };
            if band.intersects(&window) {
                out.push(section);
            }
            y += height;
        }
        out
    }

    /// Rows to keep bound for the given scroll offset: everything in the
    /// viewport plus `buffer` rows on each side, ascending.
    pub fn visible_rows(
        &self,
        counts: &[usize],
        viewport: Size,
        offset: f32,
        buffer: usize,
    ) -> Vec<ListPosition> {
        let top = offset;
        let bottom = offset + viewport.height;
        let mut out = Vec::new();
        let mut y = 0.0;
        for (section, &count) in counts.iter().enumerate() {
            let layout = self.section(section);
            let height = layout.height(count);
            let visible = y < bottom && top < y + height;
            if visible {
                match layout.axis {
                    Axis::Vertical => {
                        let body_top = y + layout.header_extent.unwrap_or(0.0);
                        let pitch = layout.item_extent + layout.spacing;
                        let (first, last) = if pitch > 0.0 {
                            let first = (((top - body_top) / pitch).floor().max(0.0)) as usize;
                            let last = (((bottom - body_top) / pitch).ceil().max(0.0)) as usize;
                            (first, last)
                        } else {
                            (0, count)
                        };
                        let first = first.saturating_sub(buffer).min(count);
                        let last = last.saturating_add(buffer).min(count);
                        for row in first..last {
                            out.push(ListPosition::new(section, row));
                        }
                    }
                    Axis::Horizontal => {
                        // Strip scrolling is orthogonal to the outer axis;
                        // bind what fits the viewport width from the strip's
                        // origin, plus buffer.
                        let pitch = layout.resolved_item_extent(viewport) + layout.spacing;
                        let fit = if pitch > 0.0 {
                            (viewport.width / pitch).ceil() as usize + 1
                        } else {
                            count
                        };
                        let last = fit.saturating_add(buffer).min(count);
                        for row in 0..last {
                            out.push(ListPosition::new(section, row));
                        }
                    }
                }
            }
            y += height;
        }
        out
    }
}

impl std::fmt::Debug for ListLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListLayout").finish_non_exhaustive()
    }
}
