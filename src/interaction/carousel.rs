//! Cyclic slide navigation with gated autoplay.

use std::num::NonZeroUsize;
use std::time::Duration;

/// An ordered, non-empty, immutable set of slides.
///
/// Index access wraps, so any `usize` picks a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSet<T> {
    items: Vec<T>,
}

impl<T> SlideSet<T> {
    /// `None` for an empty vector.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    pub fn len(&self) -> NonZeroUsize {
        // Construction guarantees at least one item.
        NonZeroUsize::new(self.items.len()).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn get(&self, index: usize) -> &T {
        &self.items[index % self.items.len()]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Carousel state machine.
///
/// Two independent gates stop autoplay: `paused` (pointer over the widget)
/// and `overlay_open` (a full-screen view is showing). While either is set
/// no deadline is armed. Time is whatever monotonic clock the caller uses,
/// expressed as a `Duration` since the widget mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    len: NonZeroUsize,
    current: usize,
    interval: Duration,
    paused: bool,
    overlay_open: bool,
    deadline: Option<Duration>,
}

impl Carousel {
    pub fn new(len: NonZeroUsize, interval: Duration, now: Duration) -> Self {
        let mut carousel = Self {
            len,
            current: 0,
            interval,
            paused: false,
            overlay_open: false,
            deadline: None,
        };
        carousel.rearm(now);
        carousel
    }

    pub fn for_set<T>(set: &SlideSet<T>, interval: Duration, now: Duration) -> Self {
        Self::new(set.len(), interval, now)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay_open
    }

    /// When the next autoplay step is due, if autoplay is running.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn advance(&mut self, direction: Direction, now: Duration) {
        self.step(direction);
        self.rearm(now);
    }

    /// Jump to a slide. `index` must come from the same slide set.
    pub fn go_to(&mut self, index: usize, now: Duration) {
        debug_assert!(index < self.len(), "slide {index} out of range");
        self.current = index % self.len();
        self.rearm(now);
    }

    pub fn set_paused(&mut self, paused: bool, now: Duration) {
        if self.paused != paused {
            self.paused = paused;
            self.rearm(now);
        }
    }

    pub fn set_overlay_open(&mut self, open: bool, now: Duration) {
        if self.overlay_open != open {
            self.overlay_open = open;
            self.rearm(now);
        }
    }

    pub fn set_interval(&mut self, interval: Duration, now: Duration) {
        if self.interval != interval {
            self.interval = interval;
            self.rearm(now);
        }
    }

    /// Fire autoplay if it is due. Returns whether the slide changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.step(Direction::Next);
                self.rearm(now);
                true
            }
            _ => false,
        }
    }

    fn step(&mut self, direction: Direction) {
        let len = self.len();
        self.current = match direction {
            Direction::Next => (self.current + 1) % len,
            Direction::Prev => (self.current + len - 1) % len,
        };
    }

    fn rearm(&mut self, now: Duration) {
        self.deadline = if self.paused || self.overlay_open || self.interval.is_zero() {
            None
        } else {
            Some(now + self.interval)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn carousel(len: usize, interval: u64) -> Carousel {
        Carousel::new(NonZeroUsize::new(len).unwrap(), ms(interval), ms(0))
    }

    #[test]
    fn empty_slide_set_rejected() {
        assert!(SlideSet::<u8>::new(vec![]).is_none());
        let set = SlideSet::new(vec!['a', 'b', 'c']).unwrap();
        assert_eq!(set.len().get(), 3);
        assert_eq!(*set.get(4), 'b');
    }

    #[test]
    fn n_advances_return_to_start() {
        for len in 1..=7 {
            for start in 0..len {
                let mut c = carousel(len, 1000);
                c.go_to(start, ms(0));
                for _ in 0..len {
                    c.advance(Direction::Next, ms(0));
                }
                assert_eq!(c.current(), start, "len {len} start {start}");
            }
        }
    }

    #[test]
    fn go_to_then_prev() {
        for len in 1..=7 {
            for i in 0..len {
                let mut c = carousel(len, 1000);
                c.go_to(i, ms(0));
                c.advance(Direction::Prev, ms(0));
                assert_eq!(c.current(), (i + len - 1) % len);
            }
        }
    }

    #[test]
    fn autoplay_cycles_at_interval_boundaries() {
        let mut c = carousel(3, 6000);
        assert!(!c.tick(ms(5999)));
        assert_eq!(c.current(), 0);
        assert!(c.tick(ms(6000)));
        assert_eq!(c.current(), 1);
        assert!(c.tick(ms(12000)));
        assert_eq!(c.current(), 2);
        assert!(c.tick(ms(18000)));
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn hover_blocks_next_advance_until_it_ends() {
        let mut c = carousel(3, 6000);
        c.set_paused(true, ms(4000));
        assert_eq!(c.deadline(), None);
        assert!(!c.tick(ms(6000)));
        assert!(!c.tick(ms(60000)));
        assert_eq!(c.current(), 0);

        c.set_paused(false, ms(61000));
        assert!(!c.tick(ms(66999)));
        assert!(c.tick(ms(67000)));
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn overlay_gate_is_independent_of_hover() {
        let mut c = carousel(2, 1000);
        c.set_overlay_open(true, ms(0));
        c.set_paused(true, ms(0));
        c.set_paused(false, ms(0));
        assert_eq!(c.deadline(), None, "overlay still open");
        c.set_overlay_open(false, ms(500));
        assert_eq!(c.deadline(), Some(ms(1500)));
    }

    #[test]
    fn manual_navigation_restarts_timer() {
        let mut c = carousel(3, 6000);
        c.advance(Direction::Next, ms(5000));
        assert!(!c.tick(ms(6000)), "timer restarted by advance");
        assert!(c.tick(ms(11000)));
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn interval_change_rearms() {
        let mut c = carousel(3, 6000);
        c.set_interval(ms(1000), ms(100));
        assert_eq!(c.deadline(), Some(ms(1100)));
    }

    #[test]
    fn single_slide_stays_put() {
        let mut c = carousel(1, 10);
        assert!(c.tick(ms(10)));
        assert_eq!(c.current(), 0);
        c.advance(Direction::Prev, ms(10));
        assert_eq!(c.current(), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    #[cfg(debug_assertions)]
    fn go_to_out_of_range_is_a_bug() {
        let mut c = carousel(3, 1000);
        c.go_to(3, ms(0));
    }
}
