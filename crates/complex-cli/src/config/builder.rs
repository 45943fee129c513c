use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::AssembleArgs;
use crate::error::{CliError, Result};
use complexbuilder::engine::config::{self as core_config, FragmentErrorPolicy};
use std::str::FromStr;

pub fn build_config(args: &AssembleArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let stoichiometry = args.stoichiometry.or(file_config.stoichiometry).ok_or_else(|| {
        CliError::Config(
            "A target stoichiometry is required, either via --stoichiometry or `stoichiometry` in the config file."
                .to_string(),
        )
    })?;

    let thresholds_file = file_config.thresholds.take().unwrap_or_default();
    let rmsd_threshold = args
        .rmsd
        .or(thresholds_file.rmsd)
        .unwrap_or(defaults.rmsd_threshold);
    let clash_threshold = args
        .clashes
        .or(thresholds_file.clashes)
        .unwrap_or(defaults.clash_threshold);
    let clash_radius = args
        .clash_radius
        .or(thresholds_file.clash_radius)
        .unwrap_or(defaults.clash_radius);

    let search_file = file_config.search.take().unwrap_or_default();
    let max_iterations = args
        .max_iterations
        .or(search_file.max_iterations)
        .or(defaults.max_iterations);
    let on_fragment_error = if args.skip_bad_fragments {
        FragmentErrorPolicy::Skip
    } else {
        match search_file.on_fragment_error.as_deref() {
            Some(value) => FragmentErrorPolicy::from_str(value)
                .map_err(|e| CliError::Config(e.to_string()))?,
            None => defaults.on_fragment_error,
        }
    };

    let extensions = file_config
        .input
        .take()
        .and_then(|input| input.extensions)
        .unwrap_or(defaults.extensions);
    if extensions.is_empty() {
        return Err(CliError::Config(
            "`input.extensions` must list at least one file extension.".to_string(),
        ));
    }

    let core_config = core_config::AssemblyConfigBuilder::new()
        .stoichiometry(stoichiometry)
        .rmsd_threshold(rmsd_threshold)
        .clash_threshold(clash_threshold)
        .clash_radius(clash_radius)
        .max_iterations(max_iterations)
        .on_fragment_error(on_fragment_error)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_dir: args.input.clone(),
        output_dir: args.output.clone(),
        seed: args.seed.clone(),
        extensions,
        core_config,
    })
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key.trim() {
            "stoichiometry" => {
                config.stoichiometry = Some(parse_value(key, value_str, "integer")?);
            }
            "thresholds.rmsd" => {
                config.thresholds.get_or_insert_with(Default::default).rmsd =
                    Some(parse_value(key, value_str, "float")?);
            }
            "thresholds.clashes" => {
                config.thresholds.get_or_insert_with(Default::default).clashes =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "thresholds.clash-radius" => {
                config
                    .thresholds
                    .get_or_insert_with(Default::default)
                    .clash_radius = Some(parse_value(key, value_str, "float")?);
            }
            "search.max-iterations" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .max_iterations = Some(parse_value(key, value_str, "integer")?);
            }
            "search.on-fragment-error" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .on_fragment_error = Some(value_str.trim().to_string());
            }
            "input.extensions" => {
                config.input.get_or_insert_with(Default::default).extensions = Some(
                    value_str
                        .split(',')
                        .map(|ext| ext.trim().trim_start_matches('.').to_string())
                        .filter(|ext| !ext.is_empty())
                        .collect(),
                );
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_assemble_args() -> AssembleArgs {
        AssembleArgs {
            input: PathBuf::from("fragments"),
            output: PathBuf::from("out"),
            config: None,
            seed: None,
            stoichiometry: Some(4),
            rmsd: None,
            clashes: None,
            clash_radius: None,
            max_iterations: None,
            skip_bad_fragments: false,
            set_values: vec![],
        }
    }

    #[test]
    fn defaults_fill_everything_but_the_stoichiometry() {
        let app = build_config(&base_assemble_args()).expect("build ok");
        let cfg = app.core_config;
        let defaults = DefaultsConfig::default();

        assert_eq!(cfg.stoichiometry, 4);
        assert_eq!(cfg.thresholds.rmsd, defaults.rmsd_threshold);
        assert_eq!(cfg.thresholds.clashes, defaults.clash_threshold);
        assert_eq!(cfg.thresholds.clash_radius, defaults.clash_radius);
        assert_eq!(cfg.search.max_iterations, None);
        assert_eq!(cfg.search.on_fragment_error, FragmentErrorPolicy::Abort);
        assert_eq!(app.extensions, defaults.extensions);
        assert_eq!(app.input_dir, PathBuf::from("fragments"));
    }

    #[test]
    fn missing_stoichiometry_is_a_config_error() {
        let mut args = base_assemble_args();
        args.stoichiometry = None;

        let result = build_config(&args);

        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("stoichiometry")));
    }

    #[test]
    fn file_values_are_used_and_cli_values_win() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            r#"
            stoichiometry = 10

            [thresholds]
            rmsd = 1.0
            clashes = 8

            [search]
            on-fragment-error = "skip"
            max-iterations = 40

            [input]
            extensions = ["pdb"]
            "#,
        )
        .unwrap();

        let mut args = base_assemble_args();
        args.config = Some(cfg_path);
        args.stoichiometry = None;
        args.clashes = Some(3);

        let app = build_config(&args).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(cfg.stoichiometry, 10);
        assert_eq!(cfg.thresholds.rmsd, 1.0);
        assert_eq!(cfg.thresholds.clashes, 3);
        assert_eq!(cfg.search.max_iterations, Some(40));
        assert_eq!(cfg.search.on_fragment_error, FragmentErrorPolicy::Skip);
        assert_eq!(app.extensions, vec!["pdb".to_string()]);
    }

    #[test]
    fn set_values_override_the_file_but_not_cli_flags() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(&cfg_path, "[thresholds]\nrmsd = 1.0\nclash-radius = 6.0\n").unwrap();

        let mut args = base_assemble_args();
        args.config = Some(cfg_path);
        args.clash_radius = Some(4.5);
        args.set_values = vec![
            "thresholds.rmsd=0.75".to_string(),
            "thresholds.clash-radius=3.0".to_string(),
            "input.extensions=pdb, .cif".to_string(),
            "search.max-iterations = 12".to_string(),
        ];

        let app = build_config(&args).expect("build ok");

        assert_eq!(app.core_config.thresholds.rmsd, 0.75);
        assert_eq!(app.core_config.thresholds.clash_radius, 4.5);
        assert_eq!(app.core_config.search.max_iterations, Some(12));
        assert_eq!(app.extensions, vec!["pdb".to_string(), "cif".to_string()]);
    }

    #[test]
    fn skip_flag_overrides_the_file_policy() {
        let mut args = base_assemble_args();
        args.skip_bad_fragments = true;
        args.set_values = vec!["search.on-fragment-error=abort".to_string()];

        let app = build_config(&args).unwrap();

        assert_eq!(
            app.core_config.search.on_fragment_error,
            FragmentErrorPolicy::Skip
        );
    }

    #[test]
    fn invalid_set_values_are_rejected() {
        for bad in [
            "thresholds.rmsd",
            "thresholds.rmsd=low",
            "thresholds.unknown=1",
            "search.on-fragment-error=ignore",
        ] {
            let mut args = base_assemble_args();
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "'{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn invalid_core_values_surface_as_config_errors() {
        let mut args = base_assemble_args();
        args.rmsd = Some(-1.0);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let mut args = base_assemble_args();
        args.set_values = vec!["input.extensions=,".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }
}
