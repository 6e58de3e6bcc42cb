//! Single-node hover emphasis.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Nothing is hovered.
    Neutral,
    Focused,
    Dimmed,
}

impl Emphasis {
    /// CSS class used by the page markup and the browser runtime.
    pub fn class(self) -> &'static str {
        match self {
            Emphasis::Neutral => "is-neutral",
            Emphasis::Focused => "is-focused",
            Emphasis::Dimmed => "is-dimmed",
        }
    }
}

/// Which node, if any, the pointer is over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hover {
    hovered: Option<usize>,
}

impl Hover {
    pub fn set_hovered(&mut self, index: Option<usize>) {
        self.hovered = index;
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn emphasis(&self, index: usize) -> Emphasis {
        match self.hovered {
            None => Emphasis::Neutral,
            Some(h) if h == index => Emphasis::Focused,
            Some(_) => Emphasis::Dimmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_when_nothing_hovered() {
        let hover = Hover::default();
        assert!((0..4).all(|i| hover.emphasis(i) == Emphasis::Neutral));
    }

    #[test]
    fn no_stale_emphasis() {
        let mut hover = Hover::default();
        hover.set_hovered(Some(1));
        hover.set_hovered(Some(3));
        let emphasis: Vec<Emphasis> = (0..5).map(|i| hover.emphasis(i)).collect();
        assert_eq!(
            emphasis,
            vec![
                Emphasis::Dimmed,
                Emphasis::Dimmed,
                Emphasis::Dimmed,
                Emphasis::Focused,
                Emphasis::Dimmed
            ]
        );
        hover.set_hovered(None);
        assert_eq!(hover.emphasis(3), Emphasis::Neutral);
    }
}
