//! Piezo buzzer on a PWM channel.
//!
//! The PWM counter runs at 1 MHz, so the period in counts is simply
//! `1_000_000 / freq_hz`; duty is held at 50 %.

use crate::feedback::{Chime, ToneOutput};
use embassy_nrf::pwm::{self, Prescaler, SimplePwm};
use embassy_time::{block_for, Duration};

const PWM_CLOCK_HZ: u32 = 1_000_000;

pub struct Buzzer<'d, T: pwm::Instance> {
    pwm: SimplePwm<'d, T>,
}

impl<'d, T: pwm::Instance> Buzzer<'d, T> {
    pub fn new(mut pwm: SimplePwm<'d, T>) -> Self {
        pwm.set_prescaler(Prescaler::Div16);
        pwm.disable();
        Self { pwm }
    }

    fn tone(&mut self, freq_hz: u32) {
        let top = (PWM_CLOCK_HZ / freq_hz).min(u16::MAX as u32) as u16;
        self.pwm.set_max_duty(top);
        self.pwm.set_duty(0, top / 2);
        self.pwm.enable();
    }
}

impl<'d, T: pwm::Instance> ToneOutput for Buzzer<'d, T> {
    fn play(&mut self, chime: Chime) {
        for step in chime.pattern() {
            if step.freq_hz == 0 {
                self.pwm.disable();
            } else {
                self.tone(step.freq_hz);
            }
            block_for(Duration::from_millis(step.duration_ms as u64));
        }
        self.pwm.disable();
    }
}
