//! Simulation configuration loaded from the environment.
use std::env;

/// Settings for one scripted guard run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Frames to simulate.
    pub ticks: u64,
    /// Frame at which the guard hears a noise.
    pub noise_at: u64,
    /// Corridor cell the noise comes from. Cells outside the corridor are
    /// unreachable.
    pub noise_pos: i32,
    /// Frame at which a threat shows up.
    pub threat_at: u64,
    /// Frames the threat stays visible.
    pub threat_for: u64,
    /// Print the final scheduler snapshot as JSON.
    pub report_json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 40,
            noise_at: 8,
            noise_pos: 7,
            threat_at: 20,
            threat_for: 6,
            report_json: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SIM_TICKS` - Frames to run (default: 40, min: 1)
    /// - `SIM_NOISE_AT` - Frame of the noise (default: 8)
    /// - `SIM_NOISE_POS` - Corridor cell of the noise (default: 7)
    /// - `SIM_THREAT_AT` - First frame with a visible threat (default: 20)
    /// - `SIM_THREAT_FOR` - Frames the threat stays (default: 6)
    /// - `SIM_REPORT_JSON` - Print the final snapshot as JSON (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ticks) = parse::<u64>(&lookup, "SIM_TICKS") {
            config.ticks = ticks.max(1);
        }
        if let Some(frame) = parse(&lookup, "SIM_NOISE_AT") {
            config.noise_at = frame;
        }
        if let Some(pos) = parse(&lookup, "SIM_NOISE_POS") {
            config.noise_pos = pos;
        }
        if let Some(frame) = parse(&lookup, "SIM_THREAT_AT") {
            config.threat_at = frame;
        }
        if let Some(frames) = parse(&lookup, "SIM_THREAT_FOR") {
            config.threat_for = frames;
        }

        // Accept a bare `SIM_REPORT_JSON=` as "true"
        if let Some(enable) = parse::<bool>(&lookup, "SIM_REPORT_JSON") {
            config.report_json = enable;
        } else if lookup("SIM_REPORT_JSON").is_some() {
            config.report_json = true;
        }

        config
    }

    /// Whether the threat is visible on `frame`.
    pub fn threat_visible(&self, frame: u64) -> bool {
        frame >= self.threat_at && frame - self.threat_at < self.threat_for
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> SimConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SimConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(from_pairs(&[]), SimConfig::default());
    }

    #[test]
    fn reads_and_clamps_values() {
        let config = from_pairs(&[
            ("SIM_TICKS", "0"),
            ("SIM_NOISE_POS", "-3"),
            ("SIM_THREAT_FOR", "2"),
        ]);
        assert_eq!(config.ticks, 1);
        assert_eq!(config.noise_pos, -3);
        assert_eq!(config.threat_for, 2);
    }

    #[test]
    fn ignores_garbage() {
        let config = from_pairs(&[("SIM_TICKS", "many"), ("SIM_NOISE_AT", "")]);
        assert_eq!(config.ticks, 40);
        assert_eq!(config.noise_at, 8);
    }

    #[test]
    fn bare_json_flag_enables_report() {
        assert!(from_pairs(&[("SIM_REPORT_JSON", "")]).report_json);
        assert!(!from_pairs(&[("SIM_REPORT_JSON", "false")]).report_json);
    }

    #[test]
    fn threat_window() {
        let config = SimConfig {
            threat_at: 5,
            threat_for: 2,
            ..SimConfig::default()
        };
        assert!(!config.threat_visible(4));
        assert!(config.threat_visible(5));
        assert!(config.threat_visible(6));
        assert!(!config.threat_visible(7));
    }
}
