// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Potentiometer follow tracking.
//!
//! The first sample of a session becomes the home reference. After that, the displacement from
//! home is scaled to a step target and the tracker asks for at most one step per tick toward it,
//! so the shaft slews at the configured step rate.
//!
//! Truncating the scaled target toward zero gives a deadband: jitter smaller than one step's worth
//! of sensor counts never moves the motor.

use crate::config::MotorConfig;

/// Source of raw potentiometer readings in `0..=max_sample`.
pub trait PositionSensor {
    fn sample(&mut self) -> u16;
}

impl<F> PositionSensor for F
where
    F: FnMut() -> u16,
{
    #[inline]
    fn sample(&mut self) -> u16 {
        self()
    }
}

/// What the tracker wants the motor to do this tick.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Forward,
    Backward,
    Hold,
}

/// Reference point and progress of one stay in follow mode.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FollowSession {
    /// Sample captured on the calibration tick
    pub home_sample: u16,
    /// Net steps issued since calibration
    pub steps_issued: i32,
}

/// Scale a sample displacement to a step target, truncating toward zero.
///
/// Saturates at the `i32` range for geometries where the target would not fit.
pub fn desired_steps(steps_per_revolution: u32, max_sample: u16, home: u16, current: u16) -> i32 {
    let delta = i64::from(current) - i64::from(home);
    let steps = i64::from(steps_per_revolution) * delta / i64::from(max_sample.max(1));
    steps.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Follow-mode tracker. Owned by the step-tick context.
#[derive(Debug)]
pub struct PositionTracker {
    steps_per_revolution: u32,
    max_sample: u16,
    session: Option<FollowSession>,
}

impl PositionTracker {
    pub fn new(config: &MotorConfig) -> Self {
        Self {
            steps_per_revolution: config.steps_per_revolution,
            max_sample: config.max_sample,
            session: None,
        }
    }

    /// Drop the current session. The next [`update`](Self::update) recalibrates.
    #[inline]
    pub fn reset(&mut self) {
        self.session = None;
    }

    #[inline]
    pub fn session(&self) -> Option<&FollowSession> {
        self.session.as_ref()
    }

    /// Feed one sample and get this tick's step request.
    ///
    /// Without a session the sample becomes home and the answer is always [`Step::Hold`].
    pub fn update(&mut self, sample: u16) -> Step {
        let sample = sample.min(self.max_sample);

        let Some(session) = self.session.as_mut() else {
            debug!("follow: home sample {=u16}", sample);
            self.session = Some(FollowSession {
                home_sample: sample,
                steps_issued: 0,
            });
            return Step::Hold;
        };

        let target = desired_steps(
            self.steps_per_revolution,
            self.max_sample,
            session.home_sample,
            sample,
        );

        if target > session.steps_issued {
            session.steps_issued += 1;
            Step::Forward
        } else if target < session.steps_issued {
            session.steps_issued -= 1;
            Step::Backward
        } else {
            Step::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> PositionTracker {
        PositionTracker::new(&MotorConfig::new())
    }

    #[test]
    fn desired_steps_matches_reference_point() {
        assert_eq!(desired_steps(96, 4095, 0, 2048), 48);
        assert_eq!(desired_steps(96, 4095, 2048, 0), -48);
        assert_eq!(desired_steps(96, 4095, 0, 4095), 96);
    }

    #[test]
    fn oversized_targets_saturate() {
        assert_eq!(desired_steps(u32::MAX, 1, 0, 1), i32::MAX);
        assert_eq!(desired_steps(u32::MAX, 1, 1, 0), i32::MIN);
        assert_eq!(desired_steps(u32::MAX, 4095, 0, 4095), i32::MAX);
        // 2^31 steps: one past i32::MAX
        assert_eq!(desired_steps(1 << 31, 1, 0, 1), i32::MAX);
        assert_eq!(desired_steps(1 << 31, 1, 1, 0), i32::MIN);
    }

    #[test]
    fn small_displacements_fall_in_the_deadband() {
        // one step is ~42.7 counts
        assert_eq!(desired_steps(96, 4095, 1000, 1042), 0);
        assert_eq!(desired_steps(96, 4095, 1000, 958), 0);
        assert_eq!(desired_steps(96, 4095, 1000, 1043), 1);
    }

    #[test]
    fn first_update_calibrates_without_moving() {
        let mut t = tracker();
        assert_eq!(t.update(1234), Step::Hold);
        assert_eq!(
            t.session(),
            Some(&FollowSession {
                home_sample: 1234,
                steps_issued: 0
            })
        );
    }

    #[test]
    fn unchanged_sample_holds() {
        let mut t = tracker();
        t.update(1000);
        assert_eq!(t.update(1000), Step::Hold);
        assert_eq!(t.session().map(|s| s.steps_issued), Some(0));
    }

    #[test]
    fn converges_one_step_per_tick_without_overshoot() {
        let mut t = tracker();
        t.update(0);

        for tick in 1..=48 {
            assert_eq!(t.update(2048), Step::Forward, "tick {tick}");
            assert_eq!(t.session().map(|s| s.steps_issued), Some(tick));
        }
        for _ in 0..20 {
            assert_eq!(t.update(2048), Step::Hold);
        }
        assert_eq!(t.session().map(|s| s.steps_issued), Some(48));
    }

    #[test]
    fn tracks_back_toward_home() {
        let mut t = tracker();
        t.update(2048);
        // 96 * -172 / 4095 == -4
        for _ in 0..4 {
            assert_eq!(t.update(2048 - 4 * 43), Step::Backward);
        }
        assert_eq!(t.update(2048 - 4 * 43), Step::Hold);
        assert_eq!(t.session().map(|s| s.steps_issued), Some(-4));
    }

    #[test]
    fn reset_forces_recalibration() {
        let mut t = tracker();
        t.update(0);
        t.update(4095);
        t.reset();
        assert!(t.session().is_none());

        assert_eq!(t.update(4095), Step::Hold);
        assert_eq!(t.session().map(|s| s.home_sample), Some(4095));
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let mut t = tracker();
        t.update(u16::MAX);
        assert_eq!(t.session().map(|s| s.home_sample), Some(4095));
    }

    #[test]
    fn closures_are_position_sensors() {
        let mut n = 0u16;
        let mut sensor = || {
            n += 1;
            n
        };
        assert_eq!(PositionSensor::sample(&mut sensor), 1);
        assert_eq!(PositionSensor::sample(&mut sensor), 2);
    }
}
