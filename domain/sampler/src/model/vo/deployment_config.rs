use serde::{Deserialize, Serialize};

pub const ABSOLUTE_ZERO_C: f64 = -273.15;

/// Sampling parameters the device fetches before a deployment starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Target depth, in meters.
    pub depth: i32,
    pub depth_band: i32,
    /// Target temperature, in Celsius.
    pub temperature: f64,
    pub temp_band: f64,
    /// Seconds to wait before pumping.
    pub wait_pump_start: i32,
    /// Liters to pump.
    pub flow_volume: f64,
    #[serde(rename = "min_flowrate")]
    pub min_flow_rate: f64,
    /// Seconds to wait after pumping.
    pub wait_pump_end: i32,
    /// Flow meter ticks per liter.
    #[serde(rename = "ticks_per_L")]
    pub ticks_per_l: i32,
    #[serde(default)]
    pub notes: String,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            depth: 0,
            depth_band: 0,
            temperature: ABSOLUTE_ZERO_C,
            temp_band: 0.0,
            wait_pump_start: 0,
            flow_volume: 0.0,
            min_flow_rate: 0.0,
            wait_pump_end: 0,
            ticks_per_l: 0,
            notes: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_facing_names() {
        let value = serde_json::to_value(DeploymentConfig::default()).unwrap();
        assert_eq!(value["temperature"], ABSOLUTE_ZERO_C);
        assert!(value.get("min_flowrate").is_some());
        assert!(value.get("ticks_per_L").is_some());
        assert!(value.get("min_flow_rate").is_none());
    }

    #[test]
    fn notes_are_optional() {
        let mut value = serde_json::to_value(DeploymentConfig::default()).unwrap();
        value.as_object_mut().unwrap().remove("notes");
        let config: DeploymentConfig = serde_json::from_value(value).unwrap();
        assert_eq!(config, DeploymentConfig::default());
    }
}
