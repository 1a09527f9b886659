//! Man pages in roff format
//!
//! One page for the tool and one per visible command, named after the
//! command path (`git-remote-add.1`).

use cgen_core::{Argument, CgenError, Cli, Command};
use cgen_types::{LongSeparator, ShortSeparator};

use crate::emitter::Emitter;

/// A rendered page, `name` without the `.1` section suffix
#[derive(Debug, Clone, PartialEq)]
pub struct ManPage {
    pub name: String,
    pub content: String,
}

/// Render every page for a tool; `date` goes into the `.TH` line verbatim
pub fn render(cli: &Cli, date: &str) -> Result<Vec<ManPage>, CgenError> {
    let writer = PageWriter { cli, date };
    let mut pages = Vec::new();

    let arguments: Vec<&Argument> = cli.arguments.iter().collect();
    pages.push(writer.page(&[], &arguments, &cli.commands)?);
    writer.command_pages(&mut pages, &[], &cli.commands)?;

    Ok(pages)
}

struct PageWriter<'a> {
    cli: &'a Cli,
    date: &'a str,
}

impl<'a> PageWriter<'a> {
    fn command_pages(
        &self,
        pages: &mut Vec<ManPage>,
        parents: &[&'a Command],
        commands: &'a [Command],
    ) -> Result<(), CgenError> {
        for command in commands.iter().filter(|c| !c.hidden) {
            let mut path = parents.to_vec();
            path.push(command);

            let arguments: Vec<&Argument> = self
                .cli
                .global_flags()
                .chain(command.arguments.iter())
                .collect();
            pages.push(self.page(&path, &arguments, &command.commands)?);
            self.command_pages(pages, &path, &command.commands)?;
        }
        Ok(())
    }

    fn page(
        &self,
        path: &[&Command],
        arguments: &[&Argument],
        commands: &[Command],
    ) -> Result<ManPage, CgenError> {
        let cli = self.cli;
        let command = path.last().copied();
        let name = page_name(&cli.name, path);
        let invocation = std::iter::once(cli.name.as_str())
            .chain(path.iter().map(|c| c.name.as_str()))
            .collect::<Vec<_>>()
            .join(" ");

        let mut em = Emitter::new("");
        em.line(format!(
            ".TH \"{}\" 1 \"{}\" \"{}\"",
            roff(&name.to_uppercase()),
            roff(self.date),
            roff(cli.version.as_deref().unwrap_or(""))
        ));

        em.line(".SH NAME");
        let summary = match command {
            Some(command) => command.short_description.as_deref(),
            None => cli.short_description.as_deref(),
        };
        match summary.filter(|s| !s.is_empty()) {
            Some(summary) => em.line(format!("{} \\- {}", roff(&name), roff(first_line(summary)))),
            None => em.line(roff(&name)),
        }

        em.line(".SH SYNOPSIS");
        match command.and_then(|c| c.usage.as_deref()) {
            Some(usage) => text(&mut em, usage),
            None => em.line(synopsis(&invocation, arguments, commands)),
        }

        em.line(".SH DESCRIPTION");
        let description = match command {
            Some(command) => command.long_description.as_deref().or(command.description()),
            None => cli.long_description.as_deref().or(cli.description()),
        };
        em.line(format!(".B {}", roff(&invocation)));
        if let Some(description) = description {
            text(&mut em, description);
        }
        if let Some(notice) = command.and_then(|c| c.deprecated.as_deref()) {
            deprecated(&mut em, notice);
        }

        let options = options(arguments);
        if !options.is_empty() {
            em.line(".SH OPTIONS");
            for argument in options {
                em.line(".TP");
                em.line(option_term(argument, ", "));
                if let Some(description) = argument
                    .long_description
                    .as_deref()
                    .or(argument.short_description.as_deref())
                {
                    text(&mut em, description);
                }
                if let Some(notice) = argument.deprecated.as_deref() {
                    deprecated(&mut em, notice);
                }
            }
        }

        let positionals: Vec<&Argument> = arguments
            .iter()
            .copied()
            .filter(|a| !a.named && !a.hidden)
            .collect();
        if !positionals.is_empty() && commands.is_empty() {
            em.line(".SH ARGUMENTS");
            for argument in positionals {
                em.line(".TP");
                em.line(format!("\\fI{}\\fR", roff(&argument.label().to_uppercase())));
                if let Some(description) = argument.description() {
                    text(&mut em, description);
                }
            }
        }

        let visible: Vec<&Command> = commands.iter().filter(|c| !c.hidden).collect();
        if !visible.is_empty() {
            em.line(".SH COMMANDS");
            for child in visible {
                let mut child_path = path.to_vec();
                child_path.push(child);
                em.line(".TP");
                em.line(format!(".BR {} (1)", roff(&page_name(&cli.name, &child_path))));
                if let Some(summary) = child.short_description.as_deref() {
                    text(&mut em, first_line(summary));
                }
                if let Some(notice) = child.deprecated.as_deref() {
                    deprecated(&mut em, notice);
                }
            }
        }

        let examples: Vec<&str> = command
            .and_then(|c| c.example.as_deref())
            .into_iter()
            .chain(arguments.iter().filter(|a| !a.hidden).filter_map(|a| a.example.as_deref()))
            .collect();
        if !examples.is_empty() {
            em.line(".SH EXAMPLES");
            for example in examples {
                em.line(".PP");
                em.line(".nf");
                text(&mut em, example);
                em.line(".fi");
            }
        }

        Ok(ManPage {
            name,
            content: em.finish(),
        })
    }
}

/// `tool` or `tool-cmd-sub`
fn page_name(tool: &str, path: &[&Command]) -> String {
    std::iter::once(tool)
        .chain(path.iter().map(|c| c.name.as_str()))
        .collect::<Vec<_>>()
        .join("-")
}

/// Visible named arguments, sorted by name when any of them asks for it
fn options<'a>(arguments: &[&'a Argument]) -> Vec<&'a Argument> {
    let mut options: Vec<&Argument> = arguments
        .iter()
        .copied()
        .filter(|a| a.named && !a.hidden)
        .collect();
    if arguments.iter().any(|a| a.sort) {
        options.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
    }
    options
}

fn sort_key(argument: &Argument) -> &str {
    argument
        .name
        .as_deref()
        .or(argument.short_name.as_deref())
        .unwrap_or("")
}

fn synopsis(invocation: &str, arguments: &[&Argument], commands: &[Command]) -> String {
    let mut line = format!("\\fB{}\\fR", roff(invocation));
    for argument in arguments.iter().filter(|a| a.named && !a.hidden) {
        line.push_str(&format!(" [{}]", option_term(argument, "|")));
    }
    if commands.iter().any(|c| !c.hidden) {
        line.push_str(" \\fI<command>\\fR");
    } else {
        for argument in arguments.iter().filter(|a| !a.named && !a.hidden) {
            line.push_str(&format!(" \\fI{}\\fR", roff(&argument.label().to_uppercase())));
        }
    }
    line
}

/// `\fB\-t\fR \fITARGET\fR, \fB\-\-target\fR=\fITARGET\fR`
fn option_term(argument: &Argument, separator: &str) -> String {
    let value = argument
        .consumes_value()
        .then(|| format!("\\fI{}\\fR", roff(&argument.label().to_uppercase())));

    let mut forms = Vec::new();
    if let Some(short) = argument.short_flag_token() {
        let mut form = format!("\\fB{}\\fR", roff(&short));
        if let Some(value) = &value {
            if argument.short_separator != ShortSeparator::Attached {
                form.push(' ');
            }
            form.push_str(value);
        }
        forms.push(form);
    }
    if let Some(long) = argument.long_flag() {
        let mut form = format!("\\fB{}\\fR", roff(&long));
        if let Some(value) = &value {
            form.push(match argument.long_separator {
                LongSeparator::Space => ' ',
                LongSeparator::Equal | LongSeparator::Both => '=',
            });
            form.push_str(value);
        }
        forms.push(form);
    }
    forms.join(separator)
}

fn deprecated(em: &mut Emitter, notice: &str) {
    em.line(".PP");
    em.line(".B DEPRECATED");
    if !notice.is_empty() {
        text(em, notice);
    }
}

/// Write free text line by line, skipping blank lines
fn text(em: &mut Emitter, text: &str) {
    for line in text.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
        em.line(roff(line));
    }
}

fn first_line(text: &str) -> &str {
    text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
}

/// Escape text so roff prints it literally
pub fn roff(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    if text.starts_with('.') || text.starts_with('\'') {
        escaped.push_str("\\&");
    }
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\e"),
            '-' => escaped.push_str("\\-"),
            c => escaped.push(c),
        }
    }
    escaped
}
