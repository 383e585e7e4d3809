//! Library side of the `segcomp` binary: configuration, the interactive
//! prompt adapter and the rendering pipelines.

pub mod config;
pub mod pipeline;
pub mod prompt;

pub use config::{ConfigError, ContourConfig, SamplingOpt, SegcompConfig};
pub use pipeline::{
    build_charts, build_map, order_for_viewing, profile_routes, run_compare, run_dashboard,
    run_map, PipelineSettings, ProfiledRoute,
};

impl From<&SegcompConfig> for PipelineSettings {
    fn from(config: &SegcompConfig) -> Self {
        PipelineSettings {
            smoothing_passes: config.smoothing_passes,
            section_length_m: config.section_length_m,
            map_style: config.map_style(),
        }
    }
}
