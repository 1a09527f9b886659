//! Generator trait and registry
//!
//! Every output target (one per shell, plus man pages) implements
//! [`Generator`]. The registry holds the targets selected for a run.

use std::path::{Path, PathBuf};

use cgen_core::{CgenError, Cli};
use cgen_types::Shell;

use crate::{bash, fish, man, zsh};

/// A file produced by a generator, relative to the output root
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
}

/// A single output target
///
/// Rendering is pure: generators never touch the file system, so targets
/// may run in any order or in parallel.
pub trait Generator: Send + Sync {
    /// Name used in logs and error messages
    fn target(&self) -> &str;

    /// Render every file of this target
    fn render(&self, cli: &Cli) -> Result<Vec<RenderedFile>, CgenError>;
}

/// Completion script for one shell
#[derive(Debug, Clone, Copy)]
pub struct CompletionGenerator {
    shell: Shell,
}

impl CompletionGenerator {
    pub fn new(shell: Shell) -> Self {
        Self { shell }
    }

    pub fn shell(&self) -> Shell {
        self.shell
    }

    /// Script text without a file around it
    pub fn script(&self, cli: &Cli) -> Result<String, CgenError> {
        match self.shell {
            Shell::Bash => bash::generate(cli),
            Shell::Fish => fish::generate(cli),
            Shell::Zsh => zsh::generate(cli),
        }
    }
}

impl Generator for CompletionGenerator {
    fn target(&self) -> &str {
        match self.shell {
            Shell::Bash => "bash",
            Shell::Fish => "fish",
            Shell::Zsh => "zsh",
        }
    }

    fn render(&self, cli: &Cli) -> Result<Vec<RenderedFile>, CgenError> {
        let path = Path::new(self.shell.completion_dir()).join(self.shell.file_name(&cli.name));
        Ok(vec![RenderedFile {
            path,
            content: self.script(cli)?,
        }])
    }
}

/// Section 1 man pages under `share/man/man1`
#[derive(Debug, Clone)]
pub struct ManPageGenerator {
    date: String,
}

impl ManPageGenerator {
    /// `date` is printed on every page, e.g. `18-Oct-2026`
    pub fn new(date: impl Into<String>) -> Self {
        Self { date: date.into() }
    }
}

impl Generator for ManPageGenerator {
    fn target(&self) -> &str {
        "man"
    }

    fn render(&self, cli: &Cli) -> Result<Vec<RenderedFile>, CgenError> {
        let dir = Path::new("share").join("man").join("man1");
        Ok(man::render(cli, &self.date)?
            .into_iter()
            .map(|page| RenderedFile {
                path: dir.join(format!("{}.1", page.name)),
                content: page.content,
            })
            .collect())
    }
}

/// Create the completion generator for a shell
pub fn create_generator(shell: Shell) -> Box<dyn Generator> {
    Box::new(CompletionGenerator::new(shell))
}

/// Ordered set of generators for one run
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// Registry with one completion generator per shell, duplicates ignored
    pub fn with_shells(shells: &[Shell]) -> Self {
        let mut registry = Self::new();
        for shell in shells {
            if registry.get(&shell.to_string()).is_none() {
                registry.register(create_generator(*shell));
            }
        }
        registry
    }

    /// Add a generator; a target registered twice replaces the earlier one
    pub fn register(&mut self, generator: Box<dyn Generator>) {
        match self
            .generators
            .iter()
            .position(|g| g.target() == generator.target())
        {
            Some(index) => self.generators[index] = generator,
            None => self.generators.push(generator),
        }
    }

    /// Get a generator by target name
    pub fn get(&self, target: &str) -> Option<&dyn Generator> {
        self.generators
            .iter()
            .find(|g| g.target() == target)
            .map(|g| g.as_ref())
    }

    /// Target names in registration order
    pub fn targets(&self) -> Vec<&str> {
        self.generators.iter().map(|g| g.target()).collect()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Generator> {
        self.generators.iter().map(|g| g.as_ref())
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_shells(Shell::all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let registry = GeneratorRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("bash").is_none());
    }

    #[test]
    fn test_default_registry_has_every_shell() {
        let registry = GeneratorRegistry::default();
        assert_eq!(registry.targets(), vec!["bash", "fish", "zsh"]);
    }

    #[test]
    fn test_with_shells_ignores_duplicates() {
        let registry = GeneratorRegistry::with_shells(&[Shell::Zsh, Shell::Zsh, Shell::Bash]);
        assert_eq!(registry.targets(), vec!["zsh", "bash"]);
    }

    #[test]
    fn test_register_replaces_same_target() {
        let mut registry = GeneratorRegistry::new();
        registry.register(Box::new(ManPageGenerator::new("a")));
        registry.register(Box::new(ManPageGenerator::new("b")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_completion_paths() {
        let cli = Cli::new("cli");
        let expected = [
            (Shell::Bash, "share/bash/completions/cli.bash"),
            (Shell::Fish, "share/fish/completions/cli.fish"),
            (Shell::Zsh, "share/zsh/completions/_cli"),
        ];
        for (shell, path) in expected {
            let files = create_generator(shell).render(&cli).unwrap();
            assert_eq!(files.len(), 1);
            assert_eq!(files[0].path, Path::new(path));
        }
    }

    #[test]
    fn test_man_page_paths() {
        let cli = Cli::new("git").with_command(cgen_core::Command::new("remote"));
        let files = ManPageGenerator::new("18-Oct-2026").render(&cli).unwrap();
        let paths: Vec<&Path> = files.iter().map(|f| f.path.as_path()).collect();
        assert_eq!(
            paths,
            vec![Path::new("share/man/man1/git.1"), Path::new("share/man/man1/git-remote.1")]
        );
    }
}
