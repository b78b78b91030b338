// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Step-rate control.
//!
//! Converts a shaft speed in RPM into a step-timer reload value:
//!
//! ```text
//! period = clock_hz / (rpm * steps_per_revolution / 60)
//! ```
//!
//! The RPM and the programmed period only ever change together, inside
//! [`SpeedController::set_speed`]. Never call it from the step-tick interrupt.

use crate::config::MotorConfig;

/// Periodic timer whose reload value sets the step rate.
pub trait ReloadTimer {
    /// Replace the reload value. Must take effect from the next update event, not mid-period.
    fn set_reload(&mut self, period: u32);
}

/// Timer clock cycles per step at `rpm`.
///
/// Uses the same integer truncation as the step-rate formula, so `rpm * steps / 60` is truncated
/// before dividing the clock. The divisor is floored at one.
pub fn timer_period(clock_hz: u32, rpm: u32, steps_per_revolution: u32) -> u32 {
    let steps_per_second = rpm.saturating_mul(steps_per_revolution) / 60;
    clock_hz / steps_per_second.max(1)
}

/// Owns the speed setting and keeps the step timer in sync with it.
#[derive(Debug)]
pub struct SpeedController {
    config: MotorConfig,
    rpm: u32,
}

impl SpeedController {
    /// Start at the configured initial speed. Nothing is written to the timer until
    /// [`apply`](Self::apply) or a speed change.
    pub fn new(config: MotorConfig) -> Self {
        Self {
            rpm: config.clamp_rpm(config.initial_rpm),
            config,
        }
    }

    #[inline]
    pub fn rpm(&self) -> u32 {
        self.rpm
    }

    /// Reload value for the current speed.
    #[inline]
    pub fn period(&self) -> u32 {
        timer_period(
            self.config.clock_hz,
            self.rpm,
            self.config.steps_per_revolution,
        )
    }

    /// Program the timer with the current speed.
    pub fn apply<T: ReloadTimer>(&self, timer: &mut T) -> u32 {
        let period = self.period();
        timer.set_reload(period);
        period
    }

    /// Change speed, clamped to the configured limits, and retime the step timer.
    ///
    /// Returns the new reload value.
    pub fn set_speed<T: ReloadTimer>(&mut self, rpm: u32, timer: &mut T) -> u32 {
        let clamped = self.config.clamp_rpm(rpm);
        if clamped != rpm {
            warn!("speed: {=u32} rpm clamped to {=u32}", rpm, clamped);
        }

        self.rpm = clamped;
        let period = self.apply(timer);
        info!("speed: {=u32} rpm, period {=u32}", self.rpm, period);
        period
    }

    /// Raise the speed by one increment.
    pub fn speed_up<T: ReloadTimer>(&mut self, timer: &mut T) -> u32 {
        let rpm = self.rpm.saturating_add(self.config.rpm_increment);
        self.set_speed(rpm, timer)
    }

    /// Lower the speed by one increment, never below `min_rpm`.
    pub fn speed_down<T: ReloadTimer>(&mut self, timer: &mut T) -> u32 {
        let rpm = self.rpm.saturating_sub(self.config.rpm_increment);
        self.set_speed(rpm, timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeTimer {
        reloads: [u32; 8],
        writes: usize,
    }

    impl FakeTimer {
        fn last(&self) -> Option<u32> {
            self.writes.checked_sub(1).map(|i| self.reloads[i])
        }
    }

    impl ReloadTimer for FakeTimer {
        fn set_reload(&mut self, period: u32) {
            self.reloads[self.writes] = period;
            self.writes += 1;
        }
    }

    #[test]
    fn period_uses_truncated_step_rate() {
        // 70 * 96 / 60 == 112
        assert_eq!(timer_period(16_000_000, 70, 96), 16_000_000 / 112);
        assert_eq!(timer_period(16_000_000, 60, 96), 16_000_000 / 96);
        assert_eq!(timer_period(1_000, 0, 96), 1_000);
    }

    #[test]
    fn new_does_not_touch_timer() {
        let speed = SpeedController::new(MotorConfig::new());
        assert_eq!(speed.rpm(), 60);
        assert_eq!(speed.period(), 166_666);
    }

    #[test]
    fn apply_programs_current_period() {
        let speed = SpeedController::new(MotorConfig::new());
        let mut timer = FakeTimer::default();
        assert_eq!(speed.apply(&mut timer), 166_666);
        assert_eq!(timer.last(), Some(166_666));
    }

    #[test]
    fn set_speed_retimes_timer() {
        let mut speed = SpeedController::new(MotorConfig::new());
        let mut timer = FakeTimer::default();

        let period = speed.set_speed(70, &mut timer);
        assert_eq!(period, 16_000_000 / 112);
        assert_eq!(speed.rpm(), 70);
        assert_eq!(timer.last(), Some(period));
        assert_eq!(timer.writes, 1);
    }

    #[test]
    fn increments_commute_away_from_limits() {
        let mut a = SpeedController::new(MotorConfig::new());
        let mut b = SpeedController::new(MotorConfig::new());
        let mut timer = FakeTimer::default();

        a.speed_up(&mut timer);
        a.speed_up(&mut timer);
        a.speed_down(&mut timer);

        b.speed_down(&mut timer);
        b.speed_up(&mut timer);
        b.speed_up(&mut timer);

        assert_eq!(a.rpm(), 70);
        assert_eq!(a.rpm(), b.rpm());
        assert_eq!(a.period(), b.period());
    }

    #[test]
    fn speed_down_clamps_at_minimum() {
        let mut speed = SpeedController::new(MotorConfig::new());
        let mut timer = FakeTimer::default();

        for _ in 0..7 {
            speed.speed_down(&mut timer);
        }
        assert_eq!(speed.rpm(), 10);
        // 10 * 96 / 60 == 16
        assert_eq!(timer.last(), Some(1_000_000));

        // clamping breaks commutativity: -,+ from the floor ends above it
        speed.speed_up(&mut timer);
        assert_eq!(speed.rpm(), 20);
    }

    #[test]
    fn speed_up_clamps_at_maximum() {
        let cfg = MotorConfig::new().with_rpm_limits(10, 80);
        let mut speed = SpeedController::new(cfg);
        let mut timer = FakeTimer::default();

        speed.speed_up(&mut timer);
        speed.speed_up(&mut timer);
        speed.speed_up(&mut timer);
        assert_eq!(speed.rpm(), 80);
    }
}
