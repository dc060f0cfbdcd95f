//! Timed multi-frame sequences, advanced once per frame.
//!
//! Starting a sequence again while it runs throws away the running one and
//! begins fresh. Nothing is queued or merged.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadePhase {
    #[default]
    Idle,
    FadeOut,
    Hold,
    FadeIn,
}

/// What a fade tick reports back to its driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeSignal {
    None,
    /// The hold just ended with the screen fully covered.
    Covered,
    /// The fade-in completed.
    Finished,
}

/// Full-screen fade out, hold, fade in.
#[derive(Resource, Debug, Clone)]
pub struct ScreenFade {
    fade_duration: f32,
    hold_duration: f32,
    phase: FadePhase,
    elapsed: f32,
    alpha: f32,
}

impl Default for ScreenFade {
    fn default() -> Self {
        Self::new(1.0, 0.5)
    }
}

impl ScreenFade {
    pub fn new(fade_duration: f32, hold_duration: f32) -> Self {
        Self {
            fade_duration: fade_duration.max(0.0),
            hold_duration: hold_duration.max(0.0),
            phase: FadePhase::Idle,
            elapsed: 0.0,
            alpha: 0.0,
        }
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase != FadePhase::Idle
    }

    /// Overlay opacity, 0 (clear) to 1 (covered).
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Begin from the start of the fade-out, cancelling any running fade.
    pub fn start(&mut self) {
        self.phase = FadePhase::FadeOut;
        self.elapsed = 0.0;
        self.alpha = 0.0;
    }

    pub fn tick(&mut self, delta: f32) -> FadeSignal {
        match self.phase {
            FadePhase::Idle => FadeSignal::None,
            FadePhase::FadeOut => {
                self.elapsed += delta;
                self.alpha = ratio(self.elapsed, self.fade_duration);
                if self.elapsed >= self.fade_duration {
                    self.enter(FadePhase::Hold);
                    self.alpha = 1.0;
                }
                FadeSignal::None
            }
            FadePhase::Hold => {
                self.elapsed += delta;
                if self.elapsed >= self.hold_duration {
                    self.enter(FadePhase::FadeIn);
                    return FadeSignal::Covered;
                }
                FadeSignal::None
            }
            FadePhase::FadeIn => {
                self.elapsed += delta;
                self.alpha = 1.0 - ratio(self.elapsed, self.fade_duration);
                if self.elapsed >= self.fade_duration {
                    self.enter(FadePhase::Idle);
                    self.alpha = 0.0;
                    return FadeSignal::Finished;
                }
                FadeSignal::None
            }
        }
    }

    fn enter(&mut self, phase: FadePhase) {
        self.phase = phase;
        self.elapsed = 0.0;
    }
}

fn ratio(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 0.125;

    fn run(fade: &mut ScreenFade, ticks: usize) -> Vec<FadeSignal> {
        (0..ticks)
            .map(|_| fade.tick(STEP))
            .filter(|signal| *signal != FadeSignal::None)
            .collect()
    }

    #[test]
    fn runs_out_hold_in() {
        let mut fade = ScreenFade::new(1.0, 0.5);
        fade.start();

        assert!(run(&mut fade, 4).is_empty());
        assert_eq!(fade.alpha(), 0.5);

        assert!(run(&mut fade, 4).is_empty());
        assert_eq!(fade.phase(), FadePhase::Hold);
        assert_eq!(fade.alpha(), 1.0);

        assert_eq!(run(&mut fade, 4), vec![FadeSignal::Covered]);
        assert_eq!(fade.phase(), FadePhase::FadeIn);

        assert_eq!(run(&mut fade, 8), vec![FadeSignal::Finished]);
        assert!(!fade.is_running());
        assert_eq!(fade.alpha(), 0.0);
    }

    #[test]
    fn restart_cancels_the_running_fade() {
        let mut fade = ScreenFade::new(1.0, 0.5);
        fade.start();
        assert_eq!(run(&mut fade, 14), vec![FadeSignal::Covered]);

        fade.start();
        assert_eq!(fade.phase(), FadePhase::FadeOut);
        assert_eq!(fade.alpha(), 0.0);

        // A whole new sequence has to play out before it covers again.
        assert!(run(&mut fade, 11).is_empty());
        assert_eq!(
            run(&mut fade, 9),
            vec![FadeSignal::Covered, FadeSignal::Finished]
        );
    }

    #[test]
    fn idle_fade_does_nothing() {
        let mut fade = ScreenFade::default();
        assert_eq!(fade.tick(1.0), FadeSignal::None);
        assert_eq!(fade.alpha(), 0.0);
    }
}
