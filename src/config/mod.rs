use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Args;
use crate::extract::Bindings;

pub const DEFAULT_CONFIG_FILE: &str = ".sema-extract.yml";
pub const DEFAULT_SOURCE: &str = "scripts/actionlint/expr_sema.go";
pub const DEFAULT_GLOBALS_OUT: &str = "scripts/actionlint/builtin-global-variable-types.json";
pub const DEFAULT_FUNCTIONS_OUT: &str = "scripts/actionlint/builtin-func-signatures.json";

/// Keys accepted in `.sema-extract.yml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    source: Option<PathBuf>,
    globals_out: Option<PathBuf>,
    functions_out: Option<PathBuf>,
    globals_binding: Option<String>,
    functions_binding: Option<String>,
}

/// Resolved settings for one run.
///
/// Relative paths are kept as written and joined onto `root` on access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub root: PathBuf,
    pub source: PathBuf,
    pub globals_out: PathBuf,
    pub functions_out: PathBuf,
    pub bindings: Bindings,
    /// The YAML file that was applied, if any.
    pub config_file: Option<PathBuf>,
}

impl ExtractConfig {
    pub fn with_root(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            source: PathBuf::from(DEFAULT_SOURCE),
            globals_out: PathBuf::from(DEFAULT_GLOBALS_OUT),
            functions_out: PathBuf::from(DEFAULT_FUNCTIONS_OUT),
            bindings: Bindings::default(),
            config_file: None,
        }
    }

    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.source)
    }

    pub fn globals_out_path(&self) -> PathBuf {
        self.root.join(&self.globals_out)
    }

    pub fn functions_out_path(&self) -> PathBuf {
        self.root.join(&self.functions_out)
    }

    fn merge(&mut self, file: ConfigFile) {
        if let Some(source) = file.source {
            self.source = source;
        }
        if let Some(out) = file.globals_out {
            self.globals_out = out;
        }
        if let Some(out) = file.functions_out {
            self.functions_out = out;
        }
        if let Some(binding) = file.globals_binding {
            self.bindings.globals = binding;
        }
        if let Some(binding) = file.functions_binding {
            self.bindings.functions = binding;
        }
    }

    /// Command-line flags take precedence over the config file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(source) = &args.source {
            self.source = source.clone();
        }
        if let Some(out) = &args.globals_out {
            self.globals_out = out.clone();
        }
        if let Some(out) = &args.functions_out {
            self.functions_out = out.clone();
        }
    }
}

/// Load config from the given path, or look for `.sema-extract.yml` under
/// `root`. A missing default file yields the built-in defaults; a missing
/// explicit file is an error.
pub fn load_config(root: &Path, path: Option<&Path>) -> Result<ExtractConfig> {
    let mut config = ExtractConfig::with_root(root);

    let config_path = match path {
        Some(p) => root.join(p),
        None => {
            let default = root.join(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(config);
            }
            default
        }
    };

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    // An empty document deserializes as null, not as a mapping.
    let file: ConfigFile = if contents.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?
    };

    config.merge(file);
    config.config_file = Some(config_path);
    Ok(config)
}
