use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routing: RoutingConfig::default(),
            input: InputConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutingConfig {
    /// Route nets hardest-first instead of id-ascending.
    #[serde(default = "default_net_reordering")]
    pub enable_net_reordering: bool,
    /// Penalty the net-cost estimator charges per via-like, diagonal or
    /// obstacle-crossed pin pair when scoring nets for ordering.
    #[serde(default = "default_reorder_penalty")]
    pub reorder_penalty: i64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            enable_net_reordering: default_net_reordering(),
            reorder_penalty: default_reorder_penalty(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_netlist_file")]
    pub netlist_file: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    /// Optional PNG rendering of the routed grid.
    #[serde(default)]
    pub image_file: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            netlist_file: default_netlist_file(),
            output_file: default_output_file(),
            image_file: None,
        }
    }
}

fn default_net_reordering() -> bool {
    false
}

fn default_reorder_penalty() -> i64 {
    10
}

fn default_netlist_file() -> String {
    "inputs/input.txt".to_string()
}

fn default_output_file() -> String {
    "output/routed.txt".to_string()
}
