// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Motor and timing configuration.
//!
//! Defaults match the bench setup: a 96 step/rev unipolar motor, a 12-bit potentiometer reading,
//! and a 16 MHz step-timer clock.
//!
//! ```ignore
//! let config = MotorConfig::new()
//!     .with_clock_hz(clocks.timclk1().raw())
//!     .validate()?;
//! ```

/// Step-timer input clock (Hz) when running from the 16 MHz HSI.
pub const DEFAULT_CLOCK_HZ: u32 = 16_000_000;
/// Physical steps per shaft revolution.
pub const STEPS_PER_REVOLUTION: u32 = 96;
/// Full-scale potentiometer reading (12-bit ADC).
pub const MAX_SAMPLE_VALUE: u16 = 4095;
/// Speed at boot.
pub const DEFAULT_RPM: u32 = 60;
/// Change applied by a single `+` or `-` command.
pub const RPM_INCREMENT: u32 = 10;
/// Lowest speed `-` can reach.
pub const MIN_RPM: u32 = 10;
/// Highest speed `+` can reach.
pub const MAX_RPM: u32 = 600;

/// Console baud rate.
pub const CONSOLE_BAUD: u32 = 115_200;
/// ADC clock divider applied to PCLK2.
pub const ADC_PRESCALER: u32 = 4;
/// Sample-time code (SMPx) for the potentiometer channel, 56 ADC cycles.
///
/// The conversion runs inside the step tick with interrupts masked, so it has to finish well
/// within one console character time or the UART overruns.
pub const POT_SAMPLE_TIME: u8 = 0b011;

/// ADC clock cycles spent sampling for a SMPx code.
pub const fn adc_sample_cycles(code: u8) -> u32 {
    match code & 0b111 {
        0 => 3,
        1 => 15,
        2 => 28,
        3 => 56,
        4 => 84,
        5 => 112,
        6 => 144,
        _ => 480,
    }
}

/// ADC clock cycles for one 12-bit conversion: sampling plus 12 cycles of successive approximation.
#[inline]
pub const fn adc_conversion_cycles(code: u8) -> u32 {
    adc_sample_cycles(code) + 12
}

/// Reasons a [`MotorConfig`] is rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    ZeroStepsPerRevolution,
    ZeroMaxSample,
    ZeroRpmIncrement,
    /// `min_rpm` is zero or above `max_rpm`.
    RpmRangeEmpty,
    InitialRpmOutOfRange,
    /// `min_rpm` yields less than one step per second.
    StepRateTooLow,
    /// `max_rpm` yields a timer period shorter than one clock cycle.
    StepRateTooHigh,
}

/// Motor geometry, sensor range, and speed limits.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorConfig {
    /// Step-timer input clock (Hz)
    pub clock_hz: u32,
    pub steps_per_revolution: u32,
    /// Largest value the position sensor reports
    pub max_sample: u16,

    pub initial_rpm: u32,
    pub rpm_increment: u32,
    pub min_rpm: u32,
    pub max_rpm: u32,
}

impl MotorConfig {
    /// Bench defaults.
    pub const fn new() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            steps_per_revolution: STEPS_PER_REVOLUTION,
            max_sample: MAX_SAMPLE_VALUE,
            initial_rpm: DEFAULT_RPM,
            rpm_increment: RPM_INCREMENT,
            min_rpm: MIN_RPM,
            max_rpm: MAX_RPM,
        }
    }

    /// Set the step-timer input clock.
    pub const fn with_clock_hz(mut self, clock_hz: u32) -> Self {
        self.clock_hz = clock_hz;
        self
    }

    pub const fn with_steps_per_revolution(mut self, steps: u32) -> Self {
        self.steps_per_revolution = steps;
        self
    }

    pub const fn with_max_sample(mut self, max_sample: u16) -> Self {
        self.max_sample = max_sample;
        self
    }

    pub const fn with_initial_rpm(mut self, rpm: u32) -> Self {
        self.initial_rpm = rpm;
        self
    }

    pub const fn with_rpm_increment(mut self, increment: u32) -> Self {
        self.rpm_increment = increment;
        self
    }

    /// Set the speed clamp used by `+`/`-`.
    pub const fn with_rpm_limits(mut self, min: u32, max: u32) -> Self {
        self.min_rpm = min;
        self.max_rpm = max;
        self
    }

    /// Check that every reachable RPM produces a usable, non-zero timer period.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.steps_per_revolution == 0 {
            return Err(ConfigError::ZeroStepsPerRevolution);
        }
        if self.max_sample == 0 {
            return Err(ConfigError::ZeroMaxSample);
        }
        if self.rpm_increment == 0 {
            return Err(ConfigError::ZeroRpmIncrement);
        }
        if self.min_rpm == 0 || self.min_rpm > self.max_rpm {
            return Err(ConfigError::RpmRangeEmpty);
        }
        if self.initial_rpm < self.min_rpm || self.initial_rpm > self.max_rpm {
            return Err(ConfigError::InitialRpmOutOfRange);
        }

        let slowest = self.steps_per_second(self.min_rpm);
        if slowest == 0 {
            return Err(ConfigError::StepRateTooLow);
        }
        let fastest = self.steps_per_second(self.max_rpm);
        if fastest == 0 || self.clock_hz / fastest == 0 {
            return Err(ConfigError::StepRateTooHigh);
        }

        Ok(self)
    }

    /// Step ticks per second at `rpm`, or 0 if the product overflows.
    ///
    /// Integer-divided the same way the timer period is computed.
    pub fn steps_per_second(&self, rpm: u32) -> u32 {
        rpm.checked_mul(self.steps_per_revolution)
            .map_or(0, |steps_per_min| steps_per_min / 60)
    }

    /// Clamp an RPM request into `[min_rpm, max_rpm]`.
    #[inline]
    pub fn clamp_rpm(&self, rpm: u32) -> u32 {
        rpm.clamp(self.min_rpm, self.max_rpm)
    }
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(MotorConfig::new().validate(), Ok(MotorConfig::new()));
    }

    #[test]
    fn rejects_zero_geometry() {
        let cfg = MotorConfig::new().with_steps_per_revolution(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroStepsPerRevolution));

        let cfg = MotorConfig::new().with_max_sample(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMaxSample));

        let cfg = MotorConfig::new().with_rpm_increment(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroRpmIncrement));
    }

    #[test]
    fn rejects_bad_rpm_range() {
        let cfg = MotorConfig::new().with_rpm_limits(0, 100);
        assert_eq!(cfg.validate(), Err(ConfigError::RpmRangeEmpty));

        let cfg = MotorConfig::new().with_rpm_limits(200, 100);
        assert_eq!(cfg.validate(), Err(ConfigError::RpmRangeEmpty));

        let cfg = MotorConfig::new().with_initial_rpm(5);
        assert_eq!(cfg.validate(), Err(ConfigError::InitialRpmOutOfRange));
    }

    #[test]
    fn rejects_min_rpm_below_one_step_per_second() {
        // 10 rpm * 4 steps / 60 s == 0 steps/s
        let cfg = MotorConfig::new().with_steps_per_revolution(4);
        assert_eq!(cfg.validate(), Err(ConfigError::StepRateTooLow));
    }

    #[test]
    fn rejects_period_shorter_than_a_clock_cycle() {
        let cfg = MotorConfig::new().with_clock_hz(100);
        assert_eq!(cfg.validate(), Err(ConfigError::StepRateTooHigh));
    }

    /// PCLK2 at reset runs from the 16 MHz HSI.
    fn adc_conversion_ns(code: u8) -> u64 {
        let adc_hz = 16_000_000 / ADC_PRESCALER;
        u64::from(adc_conversion_cycles(code)) * 1_000_000_000 / u64::from(adc_hz)
    }

    /// Start, 8 data and stop bits.
    fn console_char_ns() -> u64 {
        10 * 1_000_000_000 / u64::from(CONSOLE_BAUD)
    }

    #[test]
    fn pot_conversion_fits_in_one_console_character() {
        assert_eq!(adc_conversion_ns(POT_SAMPLE_TIME), 17_000);
        assert!(adc_conversion_ns(POT_SAMPLE_TIME) < console_char_ns());
    }

    #[test]
    fn longest_sample_time_outlasts_a_console_character() {
        // 480 + 12 cycles at 4 MHz
        assert_eq!(adc_conversion_ns(0b111), 123_000);
        assert!(adc_conversion_ns(0b111) > console_char_ns());
    }

    #[test]
    fn steps_per_second_truncates() {
        let cfg = MotorConfig::new();
        assert_eq!(cfg.steps_per_second(70), 112);
        assert_eq!(cfg.steps_per_second(60), 96);
        assert_eq!(cfg.steps_per_second(u32::MAX), 0);
    }
}
