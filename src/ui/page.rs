//! The scrollable page — three full-viewport sections (intro, deck, outro)
//! behind a fractional row offset.
//!
//! The logical offset moves instantly so the freeze guard and pin boundaries
//! stay exact; a visual-only displacement eases in behind it, decaying toward
//! zero each tick.  Rendering reads `render_offset()`, the machine reads the
//! [`ScrollSurface`] impl, and the two never disagree about where the page is.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::content::DeckContent;
use crate::core::ScrollSurface;

use super::theme::Theme;

// ───────────────────────────────────────── page model ────────

/// Displacements below this are invisible; snap to settled.
const SMOOTH_SETTLE: f64 = 0.05;

/// Scroll state for the whole page.  Implements [`ScrollSurface`] so the
/// swipe machine can own the offset while the deck is pinned.
#[derive(Debug)]
pub struct PageModel {
    /// Logical scroll offset in rows from the top of the page.
    offset: f64,
    /// Height of the viewport (and of each section) in rows.
    viewport_rows: f64,
    /// Visual displacement: positive = the view still lags behind a
    /// downward jump.  Decays toward zero each tick.
    smooth: f64,
    /// Damping per tick: `smooth *= (1 - speed)`.
    smooth_speed: f64,
}

impl PageModel {
    pub fn new(viewport_rows: u16, smooth_speed: f64) -> Self {
        Self {
            offset: 0.0,
            viewport_rows: f64::from(viewport_rows.max(1)),
            smooth: 0.0,
            smooth_speed: smooth_speed.clamp(0.05, 0.95),
        }
    }

    /// Page offset at which the deck's leading edge meets the viewport top.
    pub fn section_top(&self) -> f64 {
        self.viewport_rows
    }

    pub fn viewport_rows(&self) -> f64 {
        self.viewport_rows
    }

    /// Offset the renderer should draw at (logical minus pending smoothing).
    pub fn render_offset(&self) -> f64 {
        self.offset - self.smooth
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.set_offset(self.offset + delta);
    }

    /// Re-derive geometry after a terminal resize.
    pub fn set_viewport_rows(&mut self, rows: u16) {
        self.viewport_rows = f64::from(rows.max(1));
        self.offset = self.offset.clamp(0.0, self.max_offset());
        self.smooth = 0.0;
    }

    pub fn set_smooth_speed(&mut self, speed: f64) {
        self.smooth_speed = speed.clamp(0.05, 0.95);
    }

    /// Decay the visual displacement.  Call once per frame; returns `true`
    /// while motion is still visible.
    pub fn tick(&mut self) -> bool {
        self.smooth *= 1.0 - self.smooth_speed;
        if self.smooth.abs() < SMOOTH_SETTLE {
            self.smooth = 0.0;
        }
        self.smooth != 0.0
    }
}

impl ScrollSurface for PageModel {
    fn offset(&self) -> f64 {
        self.offset
    }

    /// Clamped write.  Every offset change — wheel, guard restore, release
    /// nudge, jump — feeds the smoothing displacement, which is how a freeze
    /// restore visually cancels the scroll it counteracts.
    fn set_offset(&mut self, offset: f64) {
        let next = offset.clamp(0.0, self.max_offset());
        self.smooth += next - self.offset;
        self.offset = next;
    }

    fn max_offset(&self) -> f64 {
        // intro + deck + outro, each one viewport tall.
        self.viewport_rows * 2.0
    }
}

// ───────────────────────────────────────── page widget ───────

/// Renders the intro and outro sections at their page positions.  The deck
/// section itself is drawn by `DeckWidget`; [`deck_origin_row`] says where.
pub struct PageWidget<'a> {
    content: &'a DeckContent,
    page: &'a PageModel,
}

impl<'a> PageWidget<'a> {
    pub fn new(content: &'a DeckContent, page: &'a PageModel) -> Self {
        Self { content, page }
    }
}

/// Screen row (relative to the page area, possibly negative or past the
/// bottom) where the deck section currently starts.
pub fn deck_origin_row(page: &PageModel) -> i32 {
    (page.section_top() - page.render_offset()).round() as i32
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let v = self.page.viewport_rows();

        // Intro: deck title + prompt, centered in the first section.
        let intro = [
            Line::from(Span::styled(self.content.title.clone(), Theme::heading_style())),
            Line::raw(""),
            Line::from(Span::styled(
                format!("{} panels ahead", self.content.panels.len()),
                Theme::body_style(),
            )),
            Line::raw(""),
            Line::from(Span::styled("scroll ↓ to begin", Theme::hint_style())),
        ];
        render_section_lines(buf, area, self.page, v / 3.0, &intro);

        // Outro: closing section, one viewport past the deck.
        let outro = [
            Line::from(Span::styled("That's the deck.", Theme::heading_style())),
            Line::raw(""),
            Line::from(Span::styled(
                "scroll ↑ to swipe back through, q to quit",
                Theme::hint_style(),
            )),
        ];
        render_section_lines(buf, area, self.page, v * 2.0 + v / 3.0, &outro);
    }
}

/// Draw centered lines starting at an absolute page row, clipped to the area.
fn render_section_lines(
    buf: &mut Buffer,
    area: Rect,
    page: &PageModel,
    start_row: f64,
    lines: &[Line<'_>],
) {
    let r = page.render_offset();
    for (i, line) in lines.iter().enumerate() {
        let screen = (start_row - r).round() as i32 + i as i32;
        if screen < 0 || screen >= i32::from(area.height) {
            continue;
        }
        let y = area.y + screen as u16;
        let width = line.width() as u16;
        let x = area.x + area.width.saturating_sub(width) / 2;
        buf.set_line(x, y, line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_clamped_to_the_page() {
        let mut page = PageModel::new(20, 0.35);
        page.set_offset(-5.0);
        assert_eq!(page.offset(), 0.0);
        page.set_offset(1000.0);
        assert_eq!(page.offset(), 40.0);
    }

    #[test]
    fn smoothing_lags_then_settles() {
        let mut page = PageModel::new(20, 0.5);
        page.scroll_by(10.0);
        assert_eq!(page.offset(), 10.0);
        // The view starts where it was and eases toward the new offset.
        assert_eq!(page.render_offset(), 0.0);
        let mut guard_ticks = 0;
        while page.tick() {
            guard_ticks += 1;
            assert!(guard_ticks < 100, "smoothing never settled");
        }
        assert_eq!(page.render_offset(), page.offset());
    }

    #[test]
    fn counteracted_scroll_leaves_no_visible_motion() {
        // Freeze-guard pattern: a wheel delta immediately restored produces
        // zero net displacement, so the pinned page doesn't shudder.
        let mut page = PageModel::new(20, 0.35);
        page.set_offset(20.0);
        while page.tick() {}
        let before = page.render_offset();
        page.scroll_by(3.0);
        page.set_offset(20.0);
        assert_eq!(page.render_offset(), before);
    }

    #[test]
    fn resize_rederives_geometry() {
        let mut page = PageModel::new(20, 0.35);
        page.set_offset(40.0);
        page.set_viewport_rows(10);
        assert_eq!(page.section_top(), 10.0);
        assert_eq!(page.max_offset(), 20.0);
        assert!(page.offset() <= page.max_offset());
    }
}
