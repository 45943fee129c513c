use complexbuilder::engine::config::{DEFAULT_CLASH_RADIUS, FragmentErrorPolicy};

pub struct DefaultsConfig {
    pub rmsd_threshold: f64,
    pub clash_threshold: usize,
    pub clash_radius: f64,
    pub max_iterations: Option<usize>,
    pub on_fragment_error: FragmentErrorPolicy,
    pub extensions: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            rmsd_threshold: 2.0,
            clash_threshold: 30,
            clash_radius: DEFAULT_CLASH_RADIUS,
            max_iterations: None,
            on_fragment_error: FragmentErrorPolicy::Abort,
            extensions: vec!["pdb".to_string(), "ent".to_string()],
        }
    }
}
