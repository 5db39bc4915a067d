/// Reveal/selection bookkeeping for the still frames shown as hints.
///
/// Frames are revealed progressively as attempts are consumed and are never
/// un-revealed. Selecting a frame is pure navigation and has no effect on the
/// game itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintReel {
    total: usize,
    revealed: usize,
    selected: usize,
}

impl HintReel {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            revealed: 0,
            selected: 0,
        }
    }

    /// Reveals the next frame, if any remain, and jumps the selection to it.
    /// Returns the newly revealed frame index.
    pub fn reveal_next(&mut self) -> Option<usize> {
        if self.revealed < self.total {
            self.revealed += 1;
            self.selected = self.revealed - 1;
            Some(self.selected)
        } else {
            None
        }
    }

    /// Moves the selection to `idx` if that frame has been revealed.
    pub fn select(&mut self, idx: usize) -> bool {
        if idx < self.revealed {
            self.selected = idx;
            true
        } else {
            false
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.revealed {
            self.selected += 1;
        }
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_is_monotonic_and_capped() {
        let mut reel = HintReel::new(4);
        assert_eq!(reel.revealed(), 0);

        assert_eq!(reel.reveal_next(), Some(0));
        assert_eq!(reel.reveal_next(), Some(1));
        assert_eq!(reel.reveal_next(), Some(2));
        assert_eq!(reel.reveal_next(), Some(3));
        assert_eq!(reel.revealed(), 4);

        // No fifth frame to reveal
        assert_eq!(reel.reveal_next(), None);
        assert_eq!(reel.revealed(), 4);
    }

    #[test]
    fn test_reveal_jumps_selection_to_newest() {
        let mut reel = HintReel::new(4);
        reel.reveal_next();
        reel.reveal_next();
        assert_eq!(reel.selected(), 1);
    }

    #[test]
    fn test_select_only_within_revealed() {
        let mut reel = HintReel::new(4);
        reel.reveal_next();
        reel.reveal_next();

        assert!(reel.select(0));
        assert_eq!(reel.selected(), 0);
        assert!(reel.select(1));
        assert_eq!(reel.selected(), 1);

        // Frame 2 not revealed yet
        assert!(!reel.select(2));
        assert_eq!(reel.selected(), 1);
    }

    #[test]
    fn test_prev_next_navigation_stays_in_bounds() {
        let mut reel = HintReel::new(4);
        reel.reveal_next();
        reel.reveal_next();
        reel.reveal_next();

        reel.select_next();
        assert_eq!(reel.selected(), 2);
        reel.select_next();
        assert_eq!(reel.selected(), 2);

        reel.select_prev();
        reel.select_prev();
        assert_eq!(reel.selected(), 0);
        reel.select_prev();
        assert_eq!(reel.selected(), 0);
    }
}
