//! Zsh completion backend
//!
//! Every node becomes one `_arguments` call. Nodes with subcommands end in a
//! `*::args:->STATE` rest spec; `_arguments -C` then shifts `words` so that
//! `${words[1]}` is the subcommand and the nested `case` descends into it.

use cgen_core::{Argument, CgenError, Cli};
use cgen_types::{CompletionKind, LongSeparator, ShortSeparator, Shell};

use crate::collect::{self, FunctionTable, Scope};
use crate::emitter::Emitter;
use crate::escape::{ident, quote, quote_list, zsh_spec_text};

/// Action for slots that accept a word but offer nothing
///
/// `_arguments` only shows the message for a blank action; anything else is
/// evaluated as a command.
const NO_CANDIDATES: &str = " ";

/// Render the zsh completion script for a tool
pub fn generate(cli: &Cli) -> Result<String, CgenError> {
    let function = format!("_{}", ident(&cli.name));
    let functions = FunctionTable::build(cli, Shell::Zsh, &function, "__");
    let writer = ZshWriter {
        globals: &cli.arguments,
        functions: &functions,
    };

    let mut em = Emitter::new("  ");
    em.line(format!("#compdef {}", cli.name));
    em.line(format!("compdef {} {}", function, quote(&cli.name, Shell::Zsh)?));
    em.blank();

    for entry in functions.entries() {
        em.line(format!("{}() {{", entry.name));
        em.indented(|em| {
            em.line(r#"compadd "$@" -- ${(f)"$("#);
            em.raw(entry.body);
            em.line(r#")"}"#);
            Ok(())
        })?;
        em.line("}");
        em.blank();
    }

    em.line(format!("{}() {{", function));
    em.indented(|em| {
        em.line("local context state state_descr line");
        em.line("typeset -A opt_args");
        em.blank();
        writer.write_scope(em, &Scope::root(cli), "args")
    })?;
    em.line("}");
    em.blank();

    em.line(format!(r#"if [[ "${{funcstack[1]}}" == "{}" ]]; then"#, function));
    em.indented(|em| {
        em.line(format!(r#"{} "$@""#, function));
        Ok(())
    })?;
    em.line("fi");

    Ok(em.finish())
}

struct ZshWriter<'a> {
    globals: &'a [Argument],
    functions: &'a FunctionTable<'a>,
}

impl<'a> ZshWriter<'a> {
    fn write_scope(&self, em: &mut Emitter, scope: &Scope<'a>, state: &str) -> Result<(), CgenError> {
        let visible = |a: &&Argument| a.named && !a.hidden;
        let own: Vec<&Argument> = scope.arguments.iter().filter(visible).collect();
        let globals: Vec<&Argument> = if scope.is_root() {
            Vec::new()
        } else {
            self.globals.iter().filter(visible).collect()
        };

        // groups apply within one declaration list
        let mut specs = Vec::new();
        for list in [&own, &globals] {
            for argument in list.iter() {
                specs.push(self.flag_spec(argument, &collect::group_mates(list, argument))?);
            }
        }

        if scope.commands.is_empty() {
            for (slot, argument) in collect::positionals(scope.arguments) {
                let spec = format!(
                    "{}:{}:{}",
                    slot,
                    zsh_spec_text(argument.label()),
                    self.action(argument)?
                );
                specs.push(quote(&spec, Shell::Zsh)?);
            }
        } else {
            let commands = quote_list(collect::command_tokens(scope.commands), Shell::Zsh)?;
            specs.push(quote(&format!("1:command:({})", commands), Shell::Zsh)?);
            specs.push(quote(&format!("*::args:->{}", state), Shell::Zsh)?);
        }

        let flags: Vec<&Argument> = own.iter().chain(globals.iter()).copied().collect();
        let options = if collect::chain_letters(&flags).is_empty() {
            "-C"
        } else {
            "-s -C"
        };
        if specs.is_empty() {
            em.line(format!("_arguments {}", options));
        } else {
            em.line(format!("_arguments {} \\", options));
            em.indented(|em| {
                let last = specs.len() - 1;
                for (index, spec) in specs.iter().enumerate() {
                    if index == last {
                        em.line(spec);
                    } else {
                        em.line(format!("{} \\", spec));
                    }
                }
                Ok(())
            })?;
        }

        if scope.commands.is_empty() {
            return Ok(());
        }

        em.blank();
        em.line("case $state in");
        em.indented(|em| {
            em.line(format!("{})", state));
            em.indented(|em| {
                em.line("case ${words[1]} in");
                em.indented(|em| {
                    // hidden commands keep their branch: typed by hand they still complete
                    for command in scope.commands {
                        let pattern = command
                            .names()
                            .map(|name| quote(name, Shell::Zsh))
                            .collect::<Result<Vec<_>, _>>()?
                            .join("|");
                        em.line(format!("{})", pattern));
                        em.indented(|em| {
                            let child = format!("{}_{}", state, ident(&command.name));
                            self.write_scope(em, &scope.child(command), &child)?;
                            em.line(";;");
                            Ok(())
                        })?;
                    }
                    Ok(())
                })?;
                em.line("esac");
                em.line(";;");
                Ok(())
            })
        })?;
        em.line("esac");
        Ok(())
    }

    /// One `_arguments` spec for a flag, quoted for the script
    ///
    /// With both a short and a long form the spec uses brace expansion:
    /// `'(--target -t)'{--target,-t}'[desc]:target:action'`.
    fn flag_spec(&self, argument: &Argument, mates: &[&Argument]) -> Result<String, CgenError> {
        let takes_value = argument.consumes_value();

        let mut forms = Vec::new();
        if let Some(long) = argument.long_flag() {
            let suffix = if takes_value { long_suffix(argument.long_separator) } else { "" };
            forms.push(format!("{}{}", long, suffix));
        }
        if let Some(short) = argument.short_flag_token() {
            let suffix = if takes_value { short_suffix(argument.short_separator) } else { "" };
            forms.push(format!("{}{}", short, suffix));
        }

        let mut excluded = argument.flag_forms();
        for mate in mates {
            excluded.extend(mate.flag_forms());
        }
        let exclusion = format!("({})", excluded.join(" "));

        let mut rest = String::new();
        if let Some(description) = argument.description() {
            rest.push_str(&format!("[{}]", zsh_spec_text(description)));
        }
        if takes_value {
            rest.push_str(&format!(
                ":{}:{}",
                zsh_spec_text(argument.label()),
                self.action(argument)?
            ));
        }

        match forms.as_slice() {
            [] => Err(CgenError::Validation(format!(
                "argument {:?} has neither a name nor a short-name",
                argument.label()
            ))),
            [form] => quote(&format!("{}{}{}", exclusion, form, rest), Shell::Zsh),
            _ => {
                let braces = forms
                    .iter()
                    .map(|form| quote(form, Shell::Zsh))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(",");
                let mut spec = format!("{}{{{}}}", quote(&exclusion, Shell::Zsh)?, braces);
                if !rest.is_empty() {
                    spec.push_str(&quote(&rest, Shell::Zsh)?);
                }
                Ok(spec)
            }
        }
    }

    /// The action part of a spec; `_arguments` evaluates it again
    fn action(&self, argument: &Argument) -> Result<String, CgenError> {
        if argument.hidden {
            return Ok(NO_CANDIDATES.to_string());
        }
        let action = match argument.completion.kind {
            CompletionKind::None => NO_CANDIDATES.to_string(),
            CompletionKind::File => "_files".to_string(),
            CompletionKind::Folder => "_files -/".to_string(),
            CompletionKind::Static => format!(
                "({})",
                quote_list(argument.completion.static_list(), Shell::Zsh)?
            ),
            CompletionKind::Function => match self.functions.name_for(argument) {
                Some(name) => name.to_string(),
                None => NO_CANDIDATES.to_string(),
            },
        };
        Ok(action)
    }
}

/// `_arguments` suffix for a long flag's value: `=-` only attached, `=` either
fn long_suffix(separator: LongSeparator) -> &'static str {
    match separator {
        LongSeparator::Space => "",
        LongSeparator::Equal => "=-",
        LongSeparator::Both => "=",
    }
}

/// `_arguments` suffix for a short flag's value: `-` only attached, `+` either
fn short_suffix(separator: ShortSeparator) -> &'static str {
    match separator {
        ShortSeparator::Space => "",
        ShortSeparator::Attached => "-",
        ShortSeparator::Both => "+",
    }
}
