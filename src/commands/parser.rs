use log::debug;

use crate::commands::history::CommandHistory;
use crate::types::error::{ConsoleError, Result};
use crate::types::invocation::{ArgValue, Arguments, ParsedInvocation};

/// Splits a line into its command name and flag arguments.
///
/// Value tokens following a flag are joined with `,`. A flag closed by the
/// next flag keeps whatever it accumulated, even nothing; the trailing flag
/// is kept only when it accumulated a value.
pub fn tokenize(line: &str) -> Result<(String, Arguments)> {
    let mut tokens = line.split_whitespace();
    let command = tokens.next().ok_or(ConsoleError::EmptyInput)?.to_string();

    let mut arguments = Arguments::new();
    let mut open: Option<(&str, String)> = None;

    for token in tokens {
        if token.starts_with('-') {
            if let Some((key, values)) = open.take() {
                arguments.insert(key, ArgValue::from_joined(&values));
            }
            open = Some((token, String::new()));
        } else {
            let Some((_, values)) = open.as_mut() else {
                return Err(ConsoleError::ParseError(format!(
                    "value `{}` is not preceded by a flag",
                    token
                )));
            };
            if !values.is_empty() {
                values.push(',');
            }
            values.push_str(token);
        }
    }

    if let Some((key, values)) = open {
        if !values.is_empty() {
            arguments.insert(key, ArgValue::from_joined(&values));
        }
    }

    Ok((command, arguments))
}

/// Tokenizes a line and records the resulting invocation in `history`.
pub fn parse_line(line: &str, history: &mut CommandHistory) -> Result<ParsedInvocation> {
    let (command, arguments) = tokenize(line)?;
    let invocation = history.register(command, arguments);
    debug!(
        "parsed invocation {} `{}` with {} argument(s)",
        invocation.id,
        invocation.command,
        invocation.arguments.len()
    );
    Ok(invocation)
}
