//! Bash completion backend
//!
//! Emits one completion function per tool. Bash only hands over the word
//! array and the cursor index, so the function scans the typed words to find
//! which command is active and dispatches in this order for every node:
//!
//! 1. the current word is a flag with an attached value (`--name=`, `-tvalue`)
//! 2. the previous word is a flag expecting a separate value
//! 3. a subcommand was typed anywhere: descend into it
//! 4. a positional slot, counted from the node's command word
//! 5. otherwise subcommands, own flags and inherited global flags

use cgen_core::{Argument, CgenError, Cli};
use cgen_types::{CompletionKind, Shell};

use crate::collect::{self, ArgumentToken, Scope};
use crate::emitter::Emitter;
use crate::escape::{ident, quote, quote_list};

const HELPERS: &str = r#"__ID_words() {
  local i join=0
  words=()
  cword=0
  for (( i = 0; i < ${#COMP_WORDS[@]}; i++ )); do
    if (( i > 0 )) && [[ -n "${COMP_WORDS[i]}" && -z "${COMP_WORDS[i]//[=:]/}" ]]; then
      words[${#words[@]}-1]+="${COMP_WORDS[i]}"
      join=1
    elif (( join )); then
      words[${#words[@]}-1]+="${COMP_WORDS[i]}"
      join=0
    else
      words+=("${COMP_WORDS[i]}")
    fi
    (( i == COMP_CWORD )) && cword=$(( ${#words[@]} - 1 ))
  done
  return 0
}

__ID_seen_word() {
  local i word
  for (( i = 1; i < ${#words[@]}; i++ )); do
    (( i == cword )) && continue
    for word in "$@"; do
      [[ "${words[i]}" == "$word" ]] && return 0
      [[ "$word" == *= && "${words[i]}" == "$word"* ]] && return 0
    done
  done
  return 1
}

__ID_index_of() {
  local i word
  for (( i = 1; i < ${#words[@]}; i++ )); do
    (( i == cword )) && continue
    for word in "$@"; do
      if [[ "${words[i]}" == "$word" ]]; then
        echo "$i"
        return 0
      fi
    done
  done
  echo 0
}

__ID_ltrim() {
  local cur="$1" breaks="" strip
  [[ "$COMP_WORDBREAKS" == *=* ]] && breaks+="="
  [[ "$COMP_WORDBREAKS" == *:* ]] && breaks+=":"
  [[ -n "$breaks" && "$cur" == *["$breaks"]* ]] || return 0
  strip="${cur%"${cur##*["$breaks"]}"}"
  COMPREPLY=("${COMPREPLY[@]#"$strip"}")
}

__ID_reply() {
  local prefix="$1" cur="$2" value
  shift 2
  COMPREPLY=()
  for value in "$@"; do
    [[ "$value" == "${cur#"$prefix"}"* ]] && COMPREPLY+=("$prefix$value")
  done
  __ID_ltrim "$cur"
}

__ID_files() {
  local prefix="$1" cur="$2" value
  COMPREPLY=()
  while IFS= read -r value; do
    COMPREPLY+=("$prefix$value")
  done < <(compgen "$3" -- "${cur#"$prefix"}")
  if [[ -z "$prefix" || "$prefix" == *= ]]; then
    compopt -o filenames 2>/dev/null
  fi
  __ID_ltrim "$cur"
}

__ID_chain() {
  local cur="$1" letters="$2" rest i added=0
  [[ "$cur" == -?* && "$cur" != --* ]] || return 0
  rest="${cur#-}"
  for (( i = 0; i < ${#rest}; i++ )); do
    [[ "$letters" == *"${rest:i:1}"* ]] || return 0
  done
  for (( i = 0; i < ${#letters}; i++ )); do
    if [[ "$rest" != *"${letters:i:1}"* ]]; then
      candidates+=("$cur${letters:i:1}")
      added=1
    fi
  done
  # a complete cluster still completes to itself
  (( added )) || candidates+=("$cur")
  return 0
}
"#;

/// Render the bash completion script for a tool
pub fn generate(cli: &Cli) -> Result<String, CgenError> {
    let id = ident(&cli.name);
    let writer = BashWriter {
        helper: format!("__{}", id),
        globals: &cli.arguments,
    };

    let mut em = Emitter::new("  ");
    em.line(format!("# bash completion for {}", cli.name));
    em.blank();
    em.block(&HELPERS.replace("__ID", &writer.helper));
    em.blank();

    em.line(format!("_{}() {{", id));
    em.indented(|em| {
        em.line("local cur prev pos value cword");
        em.line("local -a words values candidates");
        em.line(format!("{}_words", writer.helper));
        em.line(r#"cur="${words[cword]}""#);
        em.line(r#"prev="${words[cword-1]}""#);
        writer.write_scope(em, &Scope::root(cli))
    })?;
    em.line("}");
    em.blank();
    em.line(format!(
        "complete -o bashdefault -F _{} {}",
        id,
        quote(&cli.name, Shell::Bash)?
    ));

    Ok(em.finish())
}

struct BashWriter<'a> {
    helper: String,
    globals: &'a [Argument],
}

impl<'a> BashWriter<'a> {
    fn write_scope(&self, em: &mut Emitter, scope: &Scope<'a>) -> Result<(), CgenError> {
        let in_effect = scope.in_effect(self.globals);

        self.write_current_word(em, &in_effect)?;
        self.write_previous_word(em, &in_effect)?;

        for command in scope.commands {
            em.line(format!(
                "if {}_seen_word {}; then",
                self.helper,
                quote_list(command.names(), Shell::Bash)?
            ));
            em.indented(|em| {
                self.write_scope(em, &scope.child(command))?;
                em.line("return");
                Ok(())
            })?;
            em.line("fi");
        }

        if scope.commands.is_empty() {
            self.write_positionals(em, scope)?;
        }
        self.write_fallback(em, scope)
    }

    /// `--name=value` and `-tvalue`: the flag and its value share the word
    fn write_current_word(&self, em: &mut Emitter, arguments: &[&Argument]) -> Result<(), CgenError> {
        let takes_value = || arguments.iter().filter(|a| a.named && a.consumes_value());

        let mut arms = Vec::new();
        for argument in takes_value().filter(|a| a.long_separator.takes_equal()) {
            if let Some(long) = argument.long_flag() {
                arms.push((format!("{}=", long), *argument));
            }
        }
        // short arms go last so `-t*` never shadows a single-dash `-target=`
        for argument in takes_value().filter(|a| a.short_separator.takes_attached()) {
            if let Some(short) = argument.short_flag_token() {
                arms.push((short, *argument));
            }
        }

        if arms.is_empty() {
            return Ok(());
        }

        em.line(r#"case "$cur" in"#);
        em.indented(|em| {
            for (token, argument) in &arms {
                em.line(format!("{}*)", quote(token, Shell::Bash)?));
                em.indented(|em| {
                    self.write_values(em, argument, token)?;
                    em.line("return");
                    em.line(";;");
                    Ok(())
                })?;
            }
            Ok(())
        })?;
        em.line("esac");
        Ok(())
    }

    /// `--name value` and `-t value`
    fn write_previous_word(&self, em: &mut Emitter, arguments: &[&Argument]) -> Result<(), CgenError> {
        let mut arms = Vec::new();
        for argument in arguments.iter().filter(|a| a.named && a.consumes_value()) {
            let mut keys = Vec::new();
            if argument.long_separator.takes_separate_word() {
                keys.extend(argument.long_flag());
            }
            if argument.short_separator.takes_separate_word() {
                keys.extend(argument.short_flag_token());
            }
            if !keys.is_empty() {
                arms.push((keys, *argument));
            }
        }

        if arms.is_empty() {
            return Ok(());
        }

        em.line(r#"case "$prev" in"#);
        em.indented(|em| {
            for (keys, argument) in &arms {
                let pattern = keys
                    .iter()
                    .map(|key| quote(key, Shell::Bash))
                    .collect::<Result<Vec<_>, _>>()?
                    .join("|");
                em.line(format!("{})", pattern));
                em.indented(|em| {
                    self.write_values(em, argument, "")?;
                    em.line("return");
                    em.line(";;");
                    Ok(())
                })?;
            }
            Ok(())
        })?;
        em.line("esac");
        Ok(())
    }

    fn write_positionals(&self, em: &mut Emitter, scope: &Scope<'a>) -> Result<(), CgenError> {
        let slots = collect::positionals(scope.arguments);
        if slots.is_empty() {
            return Ok(());
        }

        match scope.command() {
            Some(command) => em.line(format!(
                "pos=$(( cword - $({}_index_of {}) ))",
                self.helper,
                quote_list(command.names(), Shell::Bash)?
            )),
            None => em.line("pos=$cword"),
        }

        em.line(r#"if [[ "$cur" != -* ]]; then"#);
        em.indented(|em| {
            em.line(r#"case "$pos" in"#);
            em.indented(|em| {
                for (slot, argument) in &slots {
                    em.line(format!("{})", slot));
                    em.indented(|em| {
                        if argument.hidden {
                            em.line("COMPREPLY=()");
                        } else {
                            self.write_values(em, argument, "")?;
                        }
                        em.line("return");
                        em.line(";;");
                        Ok(())
                    })?;
                }
                Ok(())
            })?;
            em.line("esac");
            Ok(())
        })?;
        em.line("fi");
        Ok(())
    }

    /// Bare-word suggestions: subcommands, flags and (with subcommands) positional values
    fn write_fallback(&self, em: &mut Emitter, scope: &Scope<'a>) -> Result<(), CgenError> {
        let mut literals: Vec<String> = collect::command_tokens(scope.commands)
            .into_iter()
            .map(String::from)
            .collect();
        let mut functions = Vec::new();
        let own: Vec<&Argument> = scope.arguments.iter().collect();
        let globals: Vec<&Argument> = if scope.is_root() {
            Vec::new()
        } else {
            self.globals.iter().filter(|a| a.named).collect()
        };

        for list in [&own, &globals] {
            for token in ungrouped_tokens(list, !scope.commands.is_empty()) {
                match token {
                    ArgumentToken::Literal(word) => literals.push(word),
                    ArgumentToken::Function(argument) => functions.push(argument),
                }
            }
        }

        em.line(format!("candidates=({})", quote_list(&literals, Shell::Bash)?));

        for argument in functions {
            if let Some(body) = argument.completion.body(Shell::Bash) {
                self.write_read_lines(em, "candidates", body);
            }
        }

        for list in [&own, &globals] {
            for (_, members) in collect::exclusive_groups(list) {
                let tokens: Vec<String> = members
                    .iter()
                    .flat_map(|a| collect::flag_tokens(a))
                    .collect();
                let tokens = quote_list(&tokens, Shell::Bash)?;
                em.line(format!("if ! {}_seen_word {}; then", self.helper, tokens));
                em.indented(|em| {
                    em.line(format!("candidates+=({})", tokens));
                    Ok(())
                })?;
                em.line("fi");
            }
        }

        let in_effect = scope.in_effect(self.globals);
        let letters = collect::chain_letters(&in_effect);
        if !letters.is_empty() {
            em.line(format!(
                r#"{}_chain "$cur" {}"#,
                self.helper,
                quote(&letters, Shell::Bash)?
            ));
        }

        em.line(format!(r#"{}_reply '' "$cur" "${{candidates[@]}}""#, self.helper));
        Ok(())
    }

    /// Value completion for one argument; `prefix` is the flag text sharing the word
    fn write_values(&self, em: &mut Emitter, argument: &Argument, prefix: &str) -> Result<(), CgenError> {
        let prefix = quote(prefix, Shell::Bash)?;
        let completion = &argument.completion;

        match completion.kind {
            CompletionKind::None => em.line("COMPREPLY=()"),
            CompletionKind::Static => {
                let mut line = format!(r#"{}_reply {} "$cur""#, self.helper, prefix);
                if !completion.values.is_empty() {
                    line.push(' ');
                    line.push_str(&quote_list(&completion.values, Shell::Bash)?);
                }
                em.line(line);
            }
            CompletionKind::File => {
                em.line(format!(r#"{}_files {} "$cur" -f"#, self.helper, prefix))
            }
            CompletionKind::Folder => {
                em.line(format!(r#"{}_files {} "$cur" -d"#, self.helper, prefix))
            }
            CompletionKind::Function => match completion.body(Shell::Bash) {
                Some(body) => {
                    em.line("values=()");
                    self.write_read_lines(em, "values", body);
                    em.line(format!(
                        r#"{}_reply {} "$cur" "${{values[@]}}""#,
                        self.helper, prefix
                    ));
                }
                None => em.line(format!(r#"{}_reply {} "$cur""#, self.helper, prefix)),
            },
        }
        Ok(())
    }

    /// Append every line printed by `body` to `array`
    fn write_read_lines(&self, em: &mut Emitter, array: &str, body: &str) {
        em.line("while IFS= read -r value; do");
        em.line(format!(r#"  {}+=("$value")"#, array));
        em.line("done < <(");
        em.raw(body);
        em.line(")");
    }
}

/// Tokens of arguments outside any exclusivity group
///
/// Positional values only count when the node also has subcommands; without
/// them positionals are completed by slot.
fn ungrouped_tokens<'b>(arguments: &[&'b Argument], with_positionals: bool) -> Vec<ArgumentToken<'b>> {
    let mut tokens = Vec::new();
    for argument in arguments {
        if argument.named && argument.exclusive_group.is_some() {
            continue;
        }
        if !argument.named && !with_positionals {
            continue;
        }
        tokens.extend(collect::argument_tokens(std::slice::from_ref(*argument)));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgen_core::{Command, Completion};
    use cgen_types::{LongSeparator, ShortSeparator};

    fn scenario() -> Cli {
        Cli::new("cli")
            .with_argument(Argument::flag("verbose").with_short("v"))
            .with_command(
                Command::new("push").with_alias("p").with_argument(
                    Argument::flag("target")
                        .with_short("t")
                        .with_completion(Completion::static_values(["staging", "prod"])),
                ),
            )
    }

    fn q(text: &str) -> String {
        quote(text, Shell::Bash).unwrap()
    }

    #[test]
    fn test_scenario_top_level_and_push() {
        let script = generate(&scenario()).unwrap();

        assert!(script.contains("candidates=(push p --verbose -v)"));
        assert!(script.contains("if __cli_seen_word push p; then"));
        // inside push: own flag, then the inherited global flag
        assert!(script.contains("candidates=(--target -t --verbose -v)"));
        assert!(script.contains(&format!("{}|{})", q("--target"), q("-t"))));
        assert!(script.contains(r#"__cli_reply '' "$cur" staging prod"#));
        assert!(script.trim_end().ends_with("complete -o bashdefault -F _cli cli"));
    }

    #[test]
    fn test_switch_has_no_value_dispatch() {
        let script = generate(&scenario()).unwrap();
        assert!(!script.contains(&format!("{})", q("--verbose"))));
        assert!(!script.contains(&format!("{}|", q("--verbose"))));
    }

    #[test]
    fn test_equal_separator_only_current_word() {
        let cli = Cli::new("cli").with_argument(
            Argument::flag("format")
                .with_long_separator(LongSeparator::Equal)
                .with_completion(Completion::static_values(["json", "yaml"])),
        );
        let script = generate(&cli).unwrap();

        let current = format!("{}*)", q("--format="));
        assert!(script.contains(&current));
        assert!(script.contains(&format!(r#"__cli_reply {} "$cur" json yaml"#, q("--format="))));
        assert!(!script.contains(&format!("{})", q("--format"))));
        assert!(script.contains(&format!("candidates=({})", q("--format="))));
    }

    #[test]
    fn test_both_separator_generates_both_arms() {
        let cli = Cli::new("cli").with_argument(
            Argument::flag("format")
                .with_short("f")
                .with_long_separator(LongSeparator::Both)
                .with_short_separator(ShortSeparator::Both)
                .with_completion(Completion::static_values(["json"])),
        );
        let script = generate(&cli).unwrap();

        assert!(script.contains(&format!("{}*)", q("--format="))));
        assert!(script.contains(&format!("{}*)", q("-f"))));
        assert!(script.contains(&format!("{}|{})", q("--format"), q("-f"))));

        let long_arm = script.find(&format!("{}*)", q("--format="))).unwrap();
        let short_arm = script.find(&format!("{}*)", q("-f"))).unwrap();
        assert!(long_arm < short_arm);
    }

    #[test]
    fn test_positional_offsets() {
        let cli = Cli::new("cli").with_command(
            Command::new("deploy")
                .with_alias("d")
                .with_argument(Argument::positional("a").with_completion(Completion::static_values(["alpha"])))
                .with_argument(Argument::positional("b").with_completion(Completion::file()))
                .with_argument(Argument::positional("c").with_completion(Completion::folder())),
        );
        let script = generate(&cli).unwrap();

        assert!(script.contains("pos=$(( cword - $(__cli_index_of deploy d) ))"));
        let one = script.find(" 1)\n").unwrap();
        let two = script.find(" 2)\n").unwrap();
        let three = script.find(" 3)\n").unwrap();
        assert!(one < two && two < three);
        assert!(script[one..two].contains("alpha"));
        assert!(script[two..three].contains(r#"__cli_files '' "$cur" -f"#));
        assert!(script[three..].contains(r#"__cli_files '' "$cur" -d"#));
    }

    #[test]
    fn test_root_positionals_count_from_tool_word() {
        let cli = Cli::new("cli").with_argument(Argument::positional("file").with_completion(Completion::file()));
        let script = generate(&cli).unwrap();
        assert!(script.contains("pos=$cword"));
    }

    #[test]
    fn test_hidden_and_deprecated() {
        let cli = Cli::new("cli")
            .with_argument(Argument::flag("secret").hidden())
            .with_argument(Argument::flag("old").deprecated("use --new"))
            .with_command(Command::new("internal").hidden())
            .with_command(Command::new("legacy").deprecated("gone soon"));
        let script = generate(&cli).unwrap();

        assert!(script.contains("candidates=(legacy --old)"));
        assert!(!script.contains("candidates=(internal"));
        assert!(!script.contains("--secret"));
        // a typed hidden command still selects its scope
        assert!(script.contains("if __cli_seen_word internal; then"));
    }

    #[test]
    fn test_exclusive_group_is_conditional() {
        let cli = Cli::new("cli")
            .with_argument(Argument::flag("json").in_group("format"))
            .with_argument(Argument::flag("yaml").in_group("format"))
            .with_argument(Argument::flag("quiet"));
        let script = generate(&cli).unwrap();

        assert!(script.contains("candidates=(--quiet)"));
        assert!(script.contains("if ! __cli_seen_word --json --yaml; then"));
        assert!(script.contains("candidates+=(--json --yaml)"));
    }

    #[test]
    fn test_chainable_flags_use_chain_helper() {
        let cli = Cli::new("ls")
            .with_argument(Argument::short_flag("a").chainable())
            .with_argument(Argument::short_flag("l").chainable());
        let script = generate(&cli).unwrap();
        assert!(script.contains(r#"__ls_chain "$cur" al"#));
        assert!(script.contains(r#"(( added )) || candidates+=("$cur")"#));
    }

    #[test]
    fn test_function_body_is_raw() {
        let cli = Cli::new("cli").with_command(
            Command::new("checkout").with_argument(
                Argument::positional("branch")
                    .with_completion(Completion::function().with_body(Shell::Bash, "git branch --format='%(refname:short)'")),
            ),
        );
        let script = generate(&cli).unwrap();
        assert!(script.contains("done < <(\ngit branch --format='%(refname:short)'\n"));
        assert!(script.contains(r#"__cli_reply '' "$cur" "${values[@]}""#));
    }

    #[test]
    fn test_heredoc_body_keeps_its_terminator() {
        let body = "cat <<EOF\nalpha\n  beta gamma\nEOF";
        let cli = Cli::new("cli")
            .with_argument(
                Argument::positional("item").with_completion(Completion::function().with_body(Shell::Bash, body)),
            )
            .with_argument(
                Argument::flag("pick").with_completion(Completion::function().with_body(Shell::Bash, body)),
            );
        let script = generate(&cli).unwrap();

        let verbatim = "done < <(\ncat <<EOF\nalpha\n  beta gamma\nEOF\n";
        assert_eq!(script.matches(verbatim).count(), 2);
        assert!(!script.contains(" EOF\n"));
    }

    #[test]
    fn test_helpers_are_namespaced() {
        let script = generate(&Cli::new("docker-compose")).unwrap();
        assert!(script.contains("__docker_compose_seen_word() {"));
        assert!(script.contains("_docker_compose() {"));
        assert!(script.contains("complete -o bashdefault -F _docker_compose docker-compose"));
        assert!(!script.contains("__ID"));
    }

    #[test]
    fn test_values_are_quoted() {
        let cli = Cli::new("cli").with_argument(
            Argument::flag("name").with_completion(Completion::static_values(["two words", "$(reboot)"])),
        );
        let script = generate(&cli).unwrap();
        let line = script
            .lines()
            .find(|l| l.contains("__cli_reply ''") && l.contains("two words"))
            .unwrap();
        let words = shlex::split(line.trim()).unwrap();
        assert_eq!(&words[3..], ["two words", "$(reboot)"]);
    }

    #[test]
    fn test_idempotent() {
        let cli = scenario();
        assert_eq!(generate(&cli).unwrap(), generate(&cli).unwrap());
    }
}
