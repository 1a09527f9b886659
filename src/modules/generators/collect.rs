//! Tree collection helpers
//!
//! Every backend derives its vocabulary from these functions, so the three
//! scripts offer the same tokens even though their control flow differs.

use cgen_core::{Argument, Cli, Command};
use cgen_types::{CompletionKind, LongSeparator, Shell};

use crate::escape::ident;

/// One node of the command tree seen from a backend
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    /// Commands from the root down to this node; empty at the root
    pub path: Vec<&'a Command>,
    /// Arguments declared on this node (the globals at the root)
    pub arguments: &'a [Argument],
    /// Direct subcommands
    pub commands: &'a [Command],
    /// Commands sharing this node's parent, this node included
    pub siblings: &'a [Command],
}

impl<'a> Scope<'a> {
    /// The tool itself
    pub fn root(cli: &'a Cli) -> Self {
        Self {
            path: Vec::new(),
            arguments: &cli.arguments,
            commands: &cli.commands,
            siblings: &[],
        }
    }

    /// Descend into one of this node's commands
    pub fn child(&self, command: &'a Command) -> Self {
        let mut path = self.path.clone();
        path.push(command);
        Self {
            path,
            arguments: &command.arguments,
            commands: &command.commands,
            siblings: self.commands,
        }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// The command this scope belongs to
    pub fn command(&self) -> Option<&'a Command> {
        self.path.last().copied()
    }

    /// Identifier built from the primary names on the path
    pub fn key(&self, separator: &str) -> String {
        self.path
            .iter()
            .map(|c| ident(&c.name))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Arguments accepted at this node: its own, then the inherited global flags
    pub fn in_effect(&self, globals: &'a [Argument]) -> Vec<&'a Argument> {
        let own = self.arguments.iter();
        if self.is_root() {
            own.collect()
        } else {
            own.chain(globals.iter().filter(|a| a.named)).collect()
        }
    }
}

/// A suggestion contributed by an argument
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentToken<'a> {
    /// A literal word
    Literal(String),
    /// Whatever the argument's function body prints
    Function(&'a Argument),
}

/// Literal words that select a flag
///
/// Long forms are suffixed with `=` when the value may be attached with
/// `=`; with `both` the bare form is offered as well.
pub fn flag_tokens(argument: &Argument) -> Vec<String> {
    let mut tokens = Vec::new();
    if let Some(long) = argument.long_flag() {
        let takes_value = argument.consumes_value();
        match argument.long_separator {
            LongSeparator::Equal if takes_value => tokens.push(format!("{}=", long)),
            LongSeparator::Both if takes_value => {
                tokens.push(long.clone());
                tokens.push(format!("{}=", long));
            }
            _ => tokens.push(long),
        }
    }
    tokens.extend(argument.short_flag_token());
    tokens
}

/// Tokens offered for a list of arguments, hidden ones excluded
pub fn argument_tokens(arguments: &[Argument]) -> Vec<ArgumentToken<'_>> {
    let mut tokens = Vec::new();
    for argument in arguments.iter().filter(|a| !a.hidden) {
        if argument.named {
            tokens.extend(flag_tokens(argument).into_iter().map(ArgumentToken::Literal));
            continue;
        }
        match argument.completion.kind {
            CompletionKind::Static => tokens.extend(
                argument
                    .completion
                    .values
                    .iter()
                    .cloned()
                    .map(ArgumentToken::Literal),
            ),
            CompletionKind::Function => tokens.push(ArgumentToken::Function(argument)),
            _ => {}
        }
    }
    tokens
}

/// Names and aliases of the visible commands, in declaration order
pub fn command_tokens(commands: &[Command]) -> Vec<&str> {
    commands
        .iter()
        .filter(|c| !c.hidden)
        .flat_map(|c| c.names())
        .collect()
}

/// Every name and alias, hidden commands included
pub fn all_command_names(commands: &[Command]) -> Vec<&str> {
    commands.iter().flat_map(|c| c.names()).collect()
}

/// Positional arguments with their 1-based slot
///
/// Hidden positionals keep their slot so later ones stay aligned.
pub fn positionals(arguments: &[Argument]) -> Vec<(usize, &Argument)> {
    arguments
        .iter()
        .filter(|a| !a.named)
        .enumerate()
        .map(|(index, argument)| (index + 1, argument))
        .collect()
}

/// Exclusivity groups among visible flags, ordered by first member
pub fn exclusive_groups<'a>(arguments: &[&'a Argument]) -> Vec<(&'a str, Vec<&'a Argument>)> {
    let mut groups: Vec<(&'a str, Vec<&'a Argument>)> = Vec::new();
    for argument in arguments.iter().copied().filter(|a| a.named && !a.hidden) {
        let Some(group) = argument.exclusive_group.as_deref() else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| *name == group) {
            Some((_, members)) => members.push(argument),
            None => groups.push((group, vec![argument])),
        }
    }
    groups
}

/// Other visible flags sharing `argument`'s group
pub fn group_mates<'a>(arguments: &[&'a Argument], argument: &Argument) -> Vec<&'a Argument> {
    let Some(group) = argument.exclusive_group.as_deref() else {
        return Vec::new();
    };
    arguments
        .iter()
        .copied()
        .filter(|a| a.named && !a.hidden && !std::ptr::eq(*a, argument))
        .filter(|a| a.exclusive_group.as_deref() == Some(group))
        .collect()
}

/// Short names that may be clustered, without duplicates
pub fn chain_letters(arguments: &[&Argument]) -> String {
    let mut letters = String::new();
    for letter in arguments
        .iter()
        .copied()
        .filter(|a| !a.hidden)
        .filter_map(|a| a.chain_letter())
    {
        if !letters.contains(letter) {
            letters.push_str(letter);
        }
    }
    letters
}

/// A function-backed completion with its generated helper name
#[derive(Debug)]
pub struct FunctionEntry<'a> {
    pub name: String,
    pub argument: &'a Argument,
    pub body: &'a str,
}

/// Helper function names for every function completion of one shell
///
/// Names come from the command path and the argument name, and are made
/// unique in tree order.
#[derive(Debug, Default)]
pub struct FunctionTable<'a> {
    entries: Vec<FunctionEntry<'a>>,
}

impl<'a> FunctionTable<'a> {
    /// Collect the visible function completions that define a body for `shell`
    pub fn build(cli: &'a Cli, shell: Shell, prefix: &str, separator: &str) -> Self {
        let mut table = Self::default();
        table.visit(&Scope::root(cli), shell, prefix, separator);
        table
    }

    fn visit(&mut self, scope: &Scope<'a>, shell: Shell, prefix: &str, separator: &str) {
        for (index, argument) in scope.arguments.iter().enumerate() {
            if argument.hidden {
                continue;
            }
            let Some(body) = argument.completion.body(shell) else {
                continue;
            };

            let leaf = match argument.name.as_deref().or(argument.short_name.as_deref()) {
                Some(name) => ident(name),
                None => format!("arg{}", index + 1),
            };
            let mut segments = vec![prefix.to_string()];
            if !scope.is_root() {
                segments.push(scope.key(separator));
            }
            segments.push(leaf);

            let name = self.unique(segments.join(separator));
            self.entries.push(FunctionEntry {
                name,
                argument,
                body,
            });
        }

        for command in scope.commands {
            self.visit(&scope.child(command), shell, prefix, separator);
        }
    }

    fn unique(&self, base: String) -> String {
        let taken = |name: &str| self.entries.iter().any(|e| e.name == name);
        if !taken(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}_{}", base, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Helper name generated for an argument
    pub fn name_for(&self, argument: &Argument) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| std::ptr::eq(e.argument, argument))
            .map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[FunctionEntry<'a>] {
        &self.entries
    }
}
