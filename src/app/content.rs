//! Deck content — the caller-owned payload the machine never looks inside.
//!
//! Decks load from a plain-text file: panels separated by `---` lines, the
//! first `# ` line of a panel is its title, and an optional leading `= ` line
//! titles the whole deck.  Anything the parser doesn't recognise is body
//! text, so hand-written files stay forgiving.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// One panel's content.
#[derive(Debug, Clone)]
pub struct PanelContent {
    pub title: String,
    pub body: Vec<String>,
}

/// A full deck: title plus an ordered, fixed set of panels.
#[derive(Debug, Clone)]
pub struct DeckContent {
    pub title: String,
    pub panels: Vec<PanelContent>,
}

impl DeckContent {
    /// Read and parse a deck file.
    pub fn load(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read deck file {}", path.display()))?;
        Self::parse(&input).with_context(|| format!("in deck file {}", path.display()))
    }

    /// Parse deck text.  Fails only on a deck with no panels — a deck that
    /// cannot be navigated is a configuration error, not a rendering one.
    pub fn parse(input: &str) -> Result<Self> {
        let mut title = String::from("Untitled deck");
        let mut panels = Vec::new();
        let mut current: Option<PanelContent> = None;

        for line in input.lines() {
            let trimmed = line.trim_end();

            if let Some(deck_title) = trimmed.strip_prefix("= ") {
                if current.is_none() && panels.is_empty() {
                    title = deck_title.trim().to_string();
                    continue;
                }
            }

            // A separator closes the current panel.
            if trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-') {
                push_panel(&mut panels, current.take());
                continue;
            }

            let panel = current.get_or_insert_with(|| PanelContent {
                title: String::new(),
                body: Vec::new(),
            });

            if let Some(heading) = trimmed.strip_prefix("# ") {
                if panel.title.is_empty() {
                    panel.title = heading.trim().to_string();
                    continue;
                }
            }
            if !trimmed.is_empty() || !panel.body.is_empty() {
                panel.body.push(trimmed.to_string());
            }
        }
        push_panel(&mut panels, current.take());

        if panels.is_empty() {
            bail!("deck has no panels");
        }
        Ok(Self { title, panels })
    }

    /// Built-in demo deck — a short tour of the app itself.
    pub fn demo() -> Self {
        Self::parse(DEMO_DECK).expect("built-in demo deck parses")
    }
}

fn push_panel(panels: &mut Vec<PanelContent>, panel: Option<PanelContent>) {
    let Some(mut panel) = panel else { return };
    // Trim trailing blank body lines left by the separator.
    while panel.body.last().is_some_and(|l| l.is_empty()) {
        panel.body.pop();
    }
    if panel.title.is_empty() && panel.body.is_empty() {
        return;
    }
    if panel.title.is_empty() {
        panel.title = format!("Panel {}", panels.len() + 1);
    }
    panels.push(panel);
}

const DEMO_DECK: &str = "\
= The Swipe Deck

# Welcome
This page scrolls like any other — until it doesn't.
Keep scrolling down.
---
# The pin
When this section reached the top of your screen, the
page froze and your scrolling became card swipes.
Each wheel notch (or j/k) advances one card.
---
# The cooldown
Flick your wheel as fast as you like: at most one card
moves per cooldown window, so momentum scrolling never
skips content.
---
# The boundaries
Swiping past the last card hands your scroll back to the
page. Swiping up past the first card does the same, in
the other direction.
---
# Tuning
Press ? to open the tuning overlay and adjust the
cooldown, tolerance, and transition feel live.
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_titled_panels() {
        let deck = DeckContent::parse(
            "= My Deck\n\n# One\nfirst body\n---\n# Two\nsecond body\nmore\n",
        )
        .unwrap();
        assert_eq!(deck.title, "My Deck");
        assert_eq!(deck.panels.len(), 2);
        assert_eq!(deck.panels[0].title, "One");
        assert_eq!(deck.panels[1].body, vec!["second body", "more"]);
    }

    #[test]
    fn untitled_panels_get_numbered() {
        let deck = DeckContent::parse("just text\n---\nmore text\n").unwrap();
        assert_eq!(deck.panels[0].title, "Panel 1");
        assert_eq!(deck.panels[1].title, "Panel 2");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(DeckContent::parse("").is_err());
        assert!(DeckContent::parse("---\n---\n").is_err());
    }

    #[test]
    fn demo_deck_is_valid() {
        let deck = DeckContent::demo();
        assert!(deck.panels.len() >= 3);
        assert!(deck.panels.iter().all(|p| !p.title.is_empty()));
    }
}
