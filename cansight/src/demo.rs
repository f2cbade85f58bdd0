//! Demo mode simulation engine.
//!
//! Produces motor-controller samples that drift around realistic operating
//! points so the dashboard can run without a live CAN feed.

use std::f64::consts::PI;

use chrono::{SecondsFormat, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cansight_common::{GROUP_MEASUREMENT, GROUP_STATUS, GROUP_TEMPERATURE, Sample};

/// An analog channel: baseline, oscillation amplitude and period in ticks.
struct Channel {
    group: &'static str,
    key: &'static str,
    base: f64,
    amplitude: f64,
    period: f64,
}

const CHANNELS: [Channel; 9] = [
    Channel {
        group: GROUP_TEMPERATURE,
        key: "CtlrTemp1",
        base: 45.3,
        amplitude: 3.0,
        period: 60.0,
    },
    Channel {
        group: GROUP_TEMPERATURE,
        key: "CtlrTemp2",
        base: 47.8,
        amplitude: 3.0,
        period: 60.0,
    },
    Channel {
        group: GROUP_TEMPERATURE,
        key: "CtlrTemp",
        base: 46.5,
        amplitude: 3.0,
        period: 60.0,
    },
    Channel {
        group: GROUP_TEMPERATURE,
        key: "MtrTemp",
        base: 55.2,
        amplitude: 5.0,
        period: 90.0,
    },
    Channel {
        group: GROUP_MEASUREMENT,
        key: "AcCurrMeaRms",
        base: 65.4,
        amplitude: 15.0,
        period: 20.0,
    },
    Channel {
        group: GROUP_MEASUREMENT,
        key: "DcCurrEstd",
        base: 40.2,
        amplitude: 10.0,
        period: 20.0,
    },
    Channel {
        group: GROUP_MEASUREMENT,
        key: "DcBusVolt",
        base: 350.7,
        amplitude: 12.0,
        period: 40.0,
    },
    Channel {
        group: GROUP_MEASUREMENT,
        key: "Mtrspd",
        base: 1800.0,
        amplitude: 400.0,
        period: 30.0,
    },
    Channel {
        group: GROUP_MEASUREMENT,
        key: "ThrotVolt",
        base: 3.2,
        amplitude: 0.8,
        period: 30.0,
    },
];

/// Status flags and their initial state.
const FLAGS: [(&str, bool); 26] = [
    ("EcoPost", true),
    ("LimpHomeMode", false),
    ("Brake", true),
    ("Forward", true),
    ("Reverse", false),
    ("Neutral", true),
    ("HillholdMode", false),
    ("RegeMode", true),
    ("ThrotMode", false),
    ("AscMode", true),
    ("SnsrHealthStatus", true),
    ("SnsrHealthStatusDcBus", true),
    ("SnsrHealthStatus12V", true),
    ("SnsrHealthStatus5V", true),
    ("SnsrHealthStatusPhBCurr", true),
    ("SnsrHealthStatusPhCCurr", true),
    ("SnsrHealthStatusThrot1", true),
    ("SnsrHealthStatusQep", true),
    ("SnsrHealthStatusCtlrTemp1", true),
    ("SnsrHealthStatusMtrTemp", true),
    ("SnsrHealthStatusThrot2", true),
    ("SnsrHealthStatusCtlrTemp2", true),
    ("PcModeEnable", true),
    ("StartStop", false),
    ("DcuControlModeStatus", true),
    ("IdleShutdown", false),
];

/// Flags that flip occasionally; the rest hold their initial state.
const TOGGLING_FLAGS: [&str; 6] = [
    "Brake",
    "EcoPost",
    "RegeMode",
    "LimpHomeMode",
    "Forward",
    "Reverse",
];

/// Chance per tick that a toggling flag flips.
const TOGGLE_PROBABILITY: f64 = 0.1;

/// Demo simulation state.
pub struct DemoSimulator {
    rng: SmallRng,
    tick: u64,
    /// Per-channel phase offsets so channels do not move in lockstep.
    phases: [f64; CHANNELS.len()],
    flags: [bool; FLAGS.len()],
}

impl DemoSimulator {
    /// Create a simulator seeded from system entropy.
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_os_rng())
    }

    /// Create a reproducible simulator.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: SmallRng) -> Self {
        let phases = std::array::from_fn(|_| rng.random_range(0.0..PI));
        Self {
            rng,
            tick: 0,
            phases,
            flags: FLAGS.map(|(_, initial)| initial),
        }
    }

    /// Generate the next sample stamped with the current time.
    pub fn next_sample(&mut self) -> Sample {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.sample_at(timestamp)
    }

    /// Generate the next sample with an explicit timestamp.
    pub fn sample_at(&mut self, timestamp: impl Into<String>) -> Sample {
        self.tick += 1;
        let mut sample = Sample::new(timestamp);

        for (channel, phase) in CHANNELS.iter().zip(self.phases) {
            let angle = 2.0 * PI * self.tick as f64 / channel.period + phase;
            let noise = self
                .rng
                .random_range(-channel.amplitude * 0.2..channel.amplitude * 0.2);
            let value = (channel.base + channel.amplitude * angle.sin() + noise).max(0.0);
            sample.insert(channel.group, channel.key, round2(value));
        }

        for (i, (key, _)) in FLAGS.iter().enumerate() {
            if TOGGLING_FLAGS.contains(key) && self.rng.random_bool(TOGGLE_PROBABILITY) {
                self.flags[i] = !self.flags[i];
            }
            sample.insert(GROUP_STATUS, *key, self.flags[i]);
        }

        sample
    }
}

impl Default for DemoSimulator {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
