use complexbuilder::engine::config as core_config;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub seed: Option<PathBuf>,
    pub extensions: Vec<String>,
    pub core_config: core_config::AssemblyConfig,
}
