//! Interval visibility toggling for blink effects.

use super::surfaces::RendererSurface;

/// Toggles a renderer on and off every `interval` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blink {
    interval: f32,
    countdown: f32,
}

impl Blink {
    pub fn new(interval: f32) -> Self {
        Self::with_first_toggle(interval, interval)
    }

    /// Like [`Blink::new`] but the first toggle happens after `first` seconds.
    pub fn with_first_toggle(interval: f32, first: f32) -> Self {
        Self {
            interval: interval.max(0.0),
            countdown: first.max(0.0),
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn restart(&mut self) {
        self.countdown = self.interval;
    }

    /// Advance by `delta`; returns true when the renderer was toggled.
    pub fn tick(&mut self, delta: f32, renderer: &mut dyn RendererSurface) -> bool {
        self.countdown -= delta;
        if self.countdown > 0.0 {
            return false;
        }
        renderer.set_visible(!renderer.is_visible());
        self.countdown = self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::testing::MockRenderer;

    #[test]
    fn toggles_once_per_interval() {
        let mut renderer = MockRenderer::default();
        let mut blink = Blink::new(0.1);

        assert!(!blink.tick(0.05, &mut renderer));
        assert!(renderer.visible);

        assert!(blink.tick(0.06, &mut renderer));
        assert!(!renderer.visible);

        assert!(blink.tick(0.1, &mut renderer));
        assert!(renderer.visible);
        assert_eq!(renderer.toggles, 2);
    }
}
