//! Fish completion backend
//!
//! fish evaluates every `complete` rule independently, so instead of
//! dispatch logic each rule carries a condition: every ancestor command was
//! seen, no sibling of the node was seen, and none of the node's own
//! subcommands was seen yet.

use cgen_core::{Argument, CgenError, Cli, Command};
use cgen_types::{CompletionKind, Shell};

use crate::collect::{self, FunctionTable, Scope};
use crate::emitter::Emitter;
use crate::escape::{ident, quote, quote_list, single_line};

const POSITION_HELPER: &str = r#"function __ID_position_is --description 'Test the word position after the last selecting command'
    set -l tokens (commandline -opc)
    set -l want $argv[1]
    set -e argv[1]
    set -l index 1
    if set -q argv[1]
        set index 0
        for i in (seq 2 (count $tokens))
            if contains -- $tokens[$i] $argv
                set index $i
                break
            end
        end
        test $index -gt 0; or return 1
    end
    test (math (count $tokens) - $index + 1) -eq $want
end"#;

/// Render the fish completion script for a tool
pub fn generate(cli: &Cli) -> Result<String, CgenError> {
    let id = ident(&cli.name);
    let helper = format!("__{}", id);
    let functions = FunctionTable::build(cli, Shell::Fish, &helper, "_");
    let writer = FishWriter {
        command: quote(&cli.name, Shell::Fish)?,
        helper,
        globals: &cli.arguments,
        functions: &functions,
    };

    let mut em = Emitter::new("    ");
    em.line(format!("# fish completion for {}", cli.name));
    em.blank();
    em.block(&POSITION_HELPER.replace("__ID", &writer.helper));
    em.blank();

    for entry in functions.entries() {
        em.line(format!("function {}", entry.name));
        em.raw(entry.body);
        em.line("end");
        em.blank();
    }

    em.line(format!("complete -c {} -f", writer.command));
    writer.write_scope(&mut em, &Scope::root(cli), &[])?;

    Ok(em.finish())
}

struct FishWriter<'a> {
    command: String,
    helper: String,
    globals: &'a [Argument],
    functions: &'a FunctionTable<'a>,
}

impl<'a> FishWriter<'a> {
    /// `conditions` select this node: ancestors seen, siblings not seen
    fn write_scope(
        &self,
        em: &mut Emitter,
        scope: &Scope<'a>,
        conditions: &[String],
    ) -> Result<(), CgenError> {
        let mut own = conditions.to_vec();
        if !scope.commands.is_empty() {
            own.push(format!(
                "not __fish_seen_subcommand_from {}",
                quote_list(collect::all_command_names(scope.commands), Shell::Fish)?
            ));
        }

        for command in scope.commands.iter().filter(|c| !c.hidden) {
            self.write_command_rule(em, command, &own)?;
        }

        // globals are accepted everywhere and carry no condition
        let argument_conditions: &[String] = if scope.is_root() { &[] } else { &own };
        for argument in scope.arguments.iter().filter(|a| a.named && !a.hidden) {
            self.write_flag_rule(em, argument, argument_conditions)?;
        }

        let names = scope.command().map(|c| c.names().collect::<Vec<_>>());
        for (slot, argument) in collect::positionals(scope.arguments) {
            let mut with_slot = own.clone();
            if scope.commands.is_empty() {
                let mut test = format!("{}_position_is {}", self.helper, slot);
                if let Some(names) = &names {
                    test.push(' ');
                    test.push_str(&quote_list(names, Shell::Fish)?);
                }
                with_slot.push(test);
            }
            self.write_positional_rule(em, argument, &with_slot)?;
        }

        for command in scope.commands {
            let mut child = conditions.to_vec();
            child.push(format!(
                "__fish_seen_subcommand_from {}",
                quote_list(command.names(), Shell::Fish)?
            ));
            let child_scope = scope.child(command);
            let siblings: Vec<&str> = child_scope
                .siblings
                .iter()
                .filter(|c| !std::ptr::eq(*c, command))
                .flat_map(|c| c.names())
                .collect();
            if !siblings.is_empty() {
                child.push(format!(
                    "not __fish_seen_subcommand_from {}",
                    quote_list(siblings, Shell::Fish)?
                ));
            }
            self.write_scope(em, &child_scope, &child)?;
        }

        Ok(())
    }

    fn write_command_rule(
        &self,
        em: &mut Emitter,
        command: &Command,
        conditions: &[String],
    ) -> Result<(), CgenError> {
        for name in command.names() {
            let mut rule = self.rule(conditions)?;
            rule.push_str(&format!(" -a {}", quote(name, Shell::Fish)?));
            if let Some(description) = command.description() {
                rule.push_str(&format!(" -d {}", quote(single_line(description), Shell::Fish)?));
            }
            em.line(rule);
        }
        Ok(())
    }

    fn write_flag_rule(
        &self,
        em: &mut Emitter,
        argument: &Argument,
        conditions: &[String],
    ) -> Result<(), CgenError> {
        let mut rule = self.rule(conditions)?;

        if let Some(short) = argument.short_name.as_deref() {
            rule.push_str(&format!(" -s {}", quote(short, Shell::Fish)?));
        }
        if let Some(name) = argument.name.as_deref() {
            let option = if argument.single_dash_long { "-o" } else { "-l" };
            rule.push_str(&format!(" {} {}", option, quote(name, Shell::Fish)?));
        }
        if let Some(description) = argument.description() {
            rule.push_str(&format!(" -d {}", quote(single_line(description), Shell::Fish)?));
        }

        match argument.completion.kind {
            CompletionKind::None => {}
            CompletionKind::File => rule.push_str(" -r -F"),
            kind => match self.candidates(argument, kind)? {
                Some(arguments) => rule.push_str(&format!(" -x -a {}", arguments)),
                None => rule.push_str(" -x"),
            },
        }

        em.line(rule);
        Ok(())
    }

    fn write_positional_rule(
        &self,
        em: &mut Emitter,
        argument: &Argument,
        conditions: &[String],
    ) -> Result<(), CgenError> {
        if argument.hidden {
            return Ok(());
        }

        let kind = argument.completion.kind;
        let completion = match kind {
            CompletionKind::None => return Ok(()),
            CompletionKind::File => " -F".to_string(),
            kind => match self.candidates(argument, kind)? {
                Some(arguments) => format!(" -a {}", arguments),
                None => return Ok(()),
            },
        };

        let mut rule = self.rule(conditions)?;
        rule.push_str(&completion);
        let description = argument.description().or(argument.name.as_deref());
        if let Some(description) = description {
            rule.push_str(&format!(" -d {}", quote(single_line(description), Shell::Fish)?));
        }
        em.line(rule);
        Ok(())
    }

    /// The `-a` argument for word-list completions, quoted for the rule line
    fn candidates(&self, argument: &Argument, kind: CompletionKind) -> Result<Option<String>, CgenError> {
        let inner = match kind {
            CompletionKind::Static => quote_list(&argument.completion.values, Shell::Fish)?,
            CompletionKind::Folder => "(__fish_complete_directories)".to_string(),
            CompletionKind::Function => match self.functions.name_for(argument) {
                Some(name) => format!("({})", name),
                None => return Ok(None),
            },
            CompletionKind::None | CompletionKind::File => return Ok(None),
        };
        quote(&inner, Shell::Fish).map(Some)
    }

    fn rule(&self, conditions: &[String]) -> Result<String, CgenError> {
        let mut rule = format!("complete -c {}", self.command);
        if !conditions.is_empty() {
            rule.push_str(&format!(" -n {}", quote(&conditions.join("; and "), Shell::Fish)?));
        }
        Ok(rule)
    }
}
