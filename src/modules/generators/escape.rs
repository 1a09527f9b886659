//! Shell quoting
//!
//! Every literal that ends up in generated source goes through [`quote`].
//! Function bodies are shell code and are never passed through here.

use cgen_core::CgenError;
use cgen_types::Shell;

/// Quote a literal so the shell reads it back as exactly `value`
pub fn quote(value: &str, shell: Shell) -> Result<String, CgenError> {
    match shell {
        Shell::Bash | Shell::Zsh => shlex::try_quote(value)
            .map(|quoted| quoted.into_owned())
            .map_err(|e| CgenError::Escape(format!("{:?}: {}", value, e))),
        Shell::Fish => quote_fish(value),
    }
}

/// Quote each value and join them with single spaces
pub fn quote_list<I, S>(values: I, shell: Shell) -> Result<String, CgenError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let quoted = values
        .into_iter()
        .map(|value| quote(value.as_ref(), shell))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quoted.join(" "))
}

/// fish has no POSIX quoting: inside single quotes only `\\` and `\'` escape
fn quote_fish(value: &str) -> Result<String, CgenError> {
    if value.contains('\0') {
        return Err(CgenError::Escape(format!(
            "{:?}: fish cannot represent a NUL byte",
            value
        )));
    }
    if value.is_empty() {
        return Ok("''".to_string());
    }
    if value.chars().all(is_fish_safe) {
        return Ok(value.to_string());
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    Ok(quoted)
}

fn is_fish_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.' | '/' | ':' | '@' | '=' | ',')
}

/// Escape text for the `[description]` and `:message:` parts of an `_arguments` spec
pub fn zsh_spec_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in single_line(text).chars() {
        if matches!(c, '\\' | '[' | ']' | ':') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// First line of a description, trimmed
pub fn single_line(text: &str) -> &str {
    text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
}

/// Map a name onto characters valid in every shell's function names
pub fn ident(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
