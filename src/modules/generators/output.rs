//! Writing rendered targets below an output root

use std::fs;
use std::path::{Path, PathBuf};

use cgen_core::{CgenError, Cli};
use tracing::{debug, info, warn};

use crate::registry::{Generator, GeneratorRegistry, RenderedFile};

/// Render and write every registered target below `root`
///
/// A failing target does not stop the others. Returns the written paths, or
/// `CgenError::Output` listing every failure.
pub fn write_all(
    registry: &GeneratorRegistry,
    cli: &Cli,
    root: &Path,
) -> Result<Vec<PathBuf>, CgenError> {
    let mut written = Vec::new();
    let mut failures = Vec::new();

    for generator in registry.iter() {
        match write_target(generator, cli, root) {
            Ok(paths) => {
                info!("Generated {} ({} file(s))", generator.target(), paths.len());
                written.extend(paths);
            }
            Err(errors) => {
                for error in &errors {
                    warn!("{}", error);
                }
                failures.extend(errors);
            }
        }
    }

    if failures.is_empty() {
        Ok(written)
    } else {
        Err(CgenError::Output(failures))
    }
}

fn write_target(
    generator: &dyn Generator,
    cli: &Cli,
    root: &Path,
) -> Result<Vec<PathBuf>, Vec<CgenError>> {
    let target = generator.target();
    let files = generator
        .render(cli)
        .map_err(|e| vec![CgenError::generate(target, e)])?;

    let mut written = Vec::new();
    let mut errors = Vec::new();
    for file in files {
        match write_file(target, root, &file) {
            Ok(path) => written.push(path),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(written)
    } else {
        Err(errors)
    }
}

fn write_file(target: &str, root: &Path, file: &RenderedFile) -> Result<PathBuf, CgenError> {
    let path = root.join(&file.path);
    let write_error = |source| CgenError::Write {
        target: target.to_string(),
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(&path, &file.content).map_err(write_error)?;
    debug!("Wrote {}", path.display());

    Ok(path)
}
