//! The deck widget — paints the card stack from each panel's visual state.
//!
//! A cell grid has no sub-pixel transforms, so the mapping is coarse:
//! `scale` becomes card width, `translate_y` a row shift, `opacity` a dim
//! tier, `z_index` the paint order (painter's algorithm — low z first, high
//! z overdraws).  `rotation` has no cell-grid analogue and is ignored here.
//! After painting, each card's on-screen rect is written back into its
//! handle so the input layer can hit-test clicks.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::StatefulWidget};

use crate::app::content::DeckContent;
use crate::app::state::Card;

use super::theme::Theme;

/// Fraction of the page width a full-scale card occupies.
const CARD_WIDTH_FRACTION: f64 = 0.7;
/// Rows of breathing room above the card stack inside the deck section.
const CARD_TOP_MARGIN: i32 = 3;
/// Rows reserved above + below the cards inside the deck section.
const CARD_VERTICAL_MARGIN: u16 = 6;

/// Card-deck widget — created fresh each frame, renders through `Vec<Card>`.
pub struct DeckWidget<'a> {
    content: &'a DeckContent,
    /// Deck section top in screen rows relative to the page area; negative
    /// or past the bottom while the section is (partially) scrolled away.
    origin_row: i32,
    active: usize,
}

impl<'a> DeckWidget<'a> {
    pub fn new(content: &'a DeckContent) -> Self {
        Self {
            content,
            origin_row: 0,
            active: 0,
        }
    }

    pub fn origin_row(mut self, row: i32) -> Self {
        self.origin_row = row;
        self
    }

    pub fn active(mut self, active: usize) -> Self {
        self.active = active;
        self
    }
}

impl StatefulWidget for DeckWidget<'_> {
    type State = Vec<Card>;

    fn render(self, area: Rect, buf: &mut Buffer, cards: &mut Self::State) {
        if area.width < 8 || area.height < 5 {
            return;
        }

        // Painter's algorithm: draw low z first so higher cards overdraw.
        let mut order: Vec<usize> = (0..cards.len().min(self.content.panels.len())).collect();
        order.sort_by_key(|&i| cards[i].visual.z_index);

        for &index in &order {
            let visual = cards[index].visual;
            cards[index].area = draw_card(
                buf,
                area,
                self.origin_row,
                &self.content.panels[index].title,
                &self.content.panels[index].body,
                visual.scale,
                visual.translate_y,
                visual.opacity,
                (index == self.active).then(|| format!(" {}/{} ", index + 1, cards.len())),
            );
        }
    }
}

/// Draw one card, row-clipped to the area.  Returns the visible on-screen
/// rect (for hit-testing), or `None` when fully clipped.
#[allow(clippy::too_many_arguments)]
fn draw_card(
    buf: &mut Buffer,
    area: Rect,
    origin_row: i32,
    title: &str,
    body: &[String],
    scale: f64,
    translate_y: f64,
    opacity: f64,
    badge: Option<String>,
) -> Option<Rect> {
    let width = ((f64::from(area.width) * CARD_WIDTH_FRACTION * scale).round() as u16)
        .clamp(8, area.width);
    let height = area.height.saturating_sub(CARD_VERTICAL_MARGIN).max(5);
    let x = (area.width - width) / 2;
    let top = origin_row + CARD_TOP_MARGIN + translate_y.round() as i32;

    let style = Theme::card_style(opacity);
    let inner = usize::from(width) - 2;

    draw_row(buf, area, top, x, &format!("╭{}╮", "─".repeat(inner)), style);

    // Interior rows are drawn opaque (padded with spaces) so this card
    // erases whatever card sits behind it.
    let title_row = format!("│{:^inner$}│", truncate(title, inner));
    draw_row(buf, area, top + 1, x, &title_row, Theme::card_title_style(opacity));
    draw_row(buf, area, top + 2, x, &format!("│{:inner$}│", ""), style);

    let body_rows = usize::from(height).saturating_sub(4);
    for row in 0..body_rows {
        let text = body
            .get(row)
            .map(|line| format!("  {}", truncate(line, inner.saturating_sub(2))))
            .unwrap_or_default();
        draw_row(buf, area, top + 3 + row as i32, x, &format!("│{text:<inner$}│"), style);
    }

    let bottom = top + i32::from(height) - 1;
    draw_row(buf, area, bottom, x, &format!("╰{}╯", "─".repeat(inner)), style);
    if let Some(badge) = badge {
        let badge_x = x + width.saturating_sub(badge.chars().count() as u16 + 2);
        draw_row(buf, area, bottom, badge_x, &badge, Theme::card_badge_style());
    }

    // Visible portion of the card, in absolute screen coordinates.
    let visible_top = top.max(0);
    let visible_bottom = (top + i32::from(height)).min(i32::from(area.height));
    if visible_bottom <= visible_top {
        return None;
    }
    Some(Rect::new(
        area.x + x,
        area.y + visible_top as u16,
        width,
        (visible_bottom - visible_top) as u16,
    ))
}

/// Write one card row if it falls inside the area.
fn draw_row(buf: &mut Buffer, area: Rect, screen_row: i32, x: u16, text: &str, style: Style) {
    if screen_row < 0 || screen_row >= i32::from(area.height) {
        return;
    }
    let max = usize::from(area.width.saturating_sub(x));
    let text: String = text.chars().take(max).collect();
    buf.set_string(area.x + x, area.y + screen_row as u16, text, style);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(1)).chain(['…']).collect()
    }
}
