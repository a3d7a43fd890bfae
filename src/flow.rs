//! Vertical text flow across fixed-size pages.
//!
//! [`PageFlowController`] owns the cursor for a single render: the page currently being filled
//! and the baseline of the next line.  Lines are placed top to bottom at the left margin; when a
//! line would cross the bottom margin the page is finished, handed to a [`PageSink`] and a fresh
//! page is started.

use log::debug;

use crate::config::LayoutConfig;
use crate::model::{Page, Placement};
use crate::richtext::Line;

/// Receives pages once nothing more will be placed on them.
pub trait PageSink {
    fn accept(&mut self, page: Page);
}

impl PageSink for Vec<Page> {
    fn accept(&mut self, page: Page) {
        self.push(page);
    }
}

/// Where a line ended up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedLine {
    /// 1-based page number.
    pub page: usize,
    pub x: f32,
    /// Baseline, measured upward from the bottom page edge.
    pub y: f32,
}

/// Size and margins of the pages a controller produces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub top_margin: f32,
}

impl PageGeometry {
    /// Baseline of the first line on a fresh page.
    pub fn top(&self) -> f32 {
        self.height - self.top_margin
    }
}

impl From<&LayoutConfig> for PageGeometry {
    fn from(layout: &LayoutConfig) -> Self {
        Self {
            width: layout.page_width,
            height: layout.page_height,
            margin: layout.margin,
            top_margin: layout.margin,
        }
    }
}

#[derive(Debug)]
struct Cursor {
    page: Page,
    y: f32,
}

/// Places lines on pages and starts new pages when vertical space runs out.
#[derive(Debug)]
pub struct PageFlowController<S: PageSink> {
    geometry: PageGeometry,
    cursor: Cursor,
    sink: S,
}

impl<S: PageSink> PageFlowController<S> {
    /// Creates a controller positioned at the top of page 1.
    pub fn new(geometry: PageGeometry, sink: S) -> Self {
        Self {
            cursor: Cursor {
                page: Page::new(1, geometry.width, geometry.height),
                y: geometry.top(),
            },
            geometry,
            sink,
        }
    }

    /// 1-based number of the page currently being filled.
    pub fn current_page(&self) -> usize {
        self.cursor.page.number()
    }

    /// Baseline at which the next line would be placed.
    pub fn vertical_position(&self) -> f32 {
        self.cursor.y
    }

    /// Places `line` at the cursor, breaking the page first if it does not fit above the margin.
    pub fn place(&mut self, line: &Line, line_height: f32) -> PlacedLine {
        if !self.has_room_for(line_height) {
            self.new_page();
        }

        let placed = PlacedLine {
            page: self.cursor.page.number(),
            x: self.geometry.margin,
            y: self.cursor.y,
        };
        self.cursor
            .page
            .push(Placement::from_line(line, placed.x, placed.y));
        self.cursor.y -= line_height;
        placed
    }

    /// Consumes `amount` of vertical space.
    ///
    /// A gap that does not fit pins the cursor to the bottom margin, so the next placed line
    /// starts a new page.  Gaps never open a page of their own.
    pub fn consume(&mut self, amount: f32) {
        if self.has_room_for(amount) {
            self.cursor.y -= amount;
        } else {
            self.cursor.y = self.cursor.y.min(self.geometry.margin);
        }
    }

    /// Finishes the current page and continues at the top of a new one.
    pub fn new_page(&mut self) -> &Page {
        let number = self.cursor.page.number() + 1;
        let next = Page::new(number, self.geometry.width, self.geometry.height);
        let finished = std::mem::replace(&mut self.cursor.page, next);
        debug!(
            "page {} finished with {} placements",
            finished.number(),
            finished.placements().len()
        );
        self.sink.accept(finished);
        self.cursor.y = self.geometry.top();
        &self.cursor.page
    }

    /// Hands the last page to the sink and returns the sink.
    pub fn finish(mut self) -> S {
        self.sink.accept(self.cursor.page);
        self.sink
    }

    fn has_room_for(&self, height: f32) -> bool {
        self.cursor.y >= self.geometry.margin + height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::TextRun;

    fn geometry() -> PageGeometry {
        PageGeometry {
            width: 200.0,
            height: 100.0,
            margin: 10.0,
            top_margin: 10.0,
        }
    }

    fn line(text: &str) -> Line {
        TextRun::new(text, 8.0).line(text)
    }

    #[test]
    fn starts_at_top_margin() {
        let mut flow = PageFlowController::new(geometry(), Vec::new());
        let placed = flow.place(&line("first"), 10.0);
        assert_eq!(
            placed,
            PlacedLine {
                page: 1,
                x: 10.0,
                y: 90.0
            }
        );
        assert_eq!(flow.vertical_position(), 80.0);
    }

    #[test]
    fn breaks_page_when_line_would_cross_margin() {
        let mut flow = PageFlowController::new(geometry(), Vec::new());
        // Baselines 90, 80, ..., 20 fit; the ninth line would end below the margin.
        let placed: Vec<PlacedLine> = (0..9).map(|_| flow.place(&line("x"), 10.0)).collect();
        assert!(placed[..8].iter().all(|p| p.page == 1));
        assert_eq!(placed[7].y, 20.0);
        assert_eq!(placed[8].page, 2);
        assert_eq!(placed[8].y, 90.0);

        let pages = flow.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].placements().len(), 8);
        assert_eq!(pages[1].placements().len(), 1);
    }

    #[test]
    fn never_drops_below_margin_after_placement() {
        let mut flow = PageFlowController::new(geometry(), Vec::new());
        for height in [7.0, 13.0, 11.0, 19.0, 5.0, 23.0, 17.0, 9.0, 29.0, 3.0] {
            flow.place(&line("x"), height);
            assert!(flow.vertical_position() >= 10.0);
        }
    }

    #[test]
    fn gap_that_does_not_fit_forces_break_before_next_line() {
        let mut flow = PageFlowController::new(geometry(), Vec::new());
        for _ in 0..7 {
            flow.place(&line("x"), 10.0);
        }
        assert_eq!(flow.vertical_position(), 20.0);
        flow.consume(15.0);
        assert_eq!(flow.vertical_position(), 10.0);
        assert_eq!(flow.current_page(), 1);

        let placed = flow.place(&line("after gap"), 10.0);
        assert_eq!(placed.page, 2);
        assert_eq!(placed.y, 90.0);
    }

    #[test]
    fn fitting_gap_moves_cursor() {
        let mut flow = PageFlowController::new(geometry(), Vec::new());
        flow.consume(25.0);
        assert_eq!(flow.vertical_position(), 65.0);
    }

    #[test]
    fn trailing_gap_does_not_add_a_page() {
        let mut flow = PageFlowController::new(geometry(), Vec::new());
        for _ in 0..8 {
            flow.place(&line("x"), 10.0);
        }
        flow.consume(50.0);
        assert_eq!(flow.finish().len(), 1);
    }

    #[test]
    fn explicit_new_page_resets_cursor() {
        let mut flow = PageFlowController::new(geometry(), Vec::new());
        flow.place(&line("x"), 10.0);
        let page = flow.new_page();
        assert_eq!(page.number(), 2);
        assert!(page.is_empty());
        assert_eq!(flow.vertical_position(), 90.0);
    }

    #[test]
    fn placements_keep_line_style() {
        let mut flow = PageFlowController::new(geometry(), Vec::new());
        flow.place(&line("styled"), 10.0);
        let pages = flow.finish();
        let placement = &pages[0].placements()[0];
        assert_eq!(placement.text, "styled");
        assert_eq!(placement.font_size, 8.0);
    }
}
