//! Read-method browser: resolves a method, binds its arguments, calls it and
//! formats what comes back.

use async_trait::async_trait;
use console::style;
use ethers::abi::Token;
use ethers::types::U256;
use log::debug;

use crate::interactive::prompt::Prompt;
use crate::interactive::{CommandHandler, Session};
use crate::types::command::Flag;
use crate::types::error::{ConsoleError, Result};
use crate::types::invocation::{ArgValue, ParsedInvocation};
use crate::types::method::{CallArg, MethodDescriptor, ParamDescriptor, UINT256};
use crate::utils::eth::ContractReader;
use crate::utils::helper::Helper;
use crate::utils::table::TableBuilder;

pub struct ReadCommand;

#[async_trait(?Send)]
impl CommandHandler for ReadCommand {
    async fn handle(&self, session: &mut Session, invocation: &ParsedInvocation) -> Result<()> {
        let Some(contract) = session.contract.as_deref() else {
            println!("{}", style(ConsoleError::MissingConfiguration).yellow());
            return Ok(());
        };

        let output = read_method(contract, session.prompt.as_mut(), invocation).await?;
        println!("{}", output);
        Ok(())
    }
}

/// Runs one `read` invocation against `contract`, returning the formatted
/// result. Whatever the invocation leaves out is asked through `prompt`.
pub async fn read_method(
    contract: &dyn ContractReader,
    prompt: &mut dyn Prompt,
    invocation: &ParsedInvocation,
) -> Result<String> {
    let methods = contract.read_methods();

    let reference = match invocation.flag(Flag::Method) {
        Some(value) => value
            .as_single()
            .ok_or_else(|| ConsoleError::UnknownMethod(value.to_string()))?
            .to_string(),
        None => {
            print_methods(&methods);
            prompt.ask("Enter method name or mid: ")?
        }
    };

    let method = resolve_method(&methods, reference.trim())?;
    println!(
        "{}\t\t({})\t\t({})\n",
        style(&method.name).bold(),
        method.inputs_label(),
        method.outputs_label()
    );

    let args = if method.inputs.is_empty() {
        Vec::new()
    } else if let Some(supplied) = invocation.flag(Flag::Args) {
        bind_arguments(method, supplied)?
    } else {
        prompt_arguments(prompt, method)?
    };

    debug!("calling {} with {} argument(s)", method.name, args.len());
    let tokens = contract.call_read_method(method, &args).await?;
    Ok(format_result(method, &tokens))
}

/// Finds a method by exact name, or by 1-based position when `reference` is
/// all digits.
pub fn resolve_method<'a>(
    methods: &'a [MethodDescriptor],
    reference: &str,
) -> Result<&'a MethodDescriptor> {
    let unknown = || ConsoleError::UnknownMethod(reference.to_string());

    if is_digits(reference) {
        let index: usize = reference.parse().map_err(|_| unknown())?;
        return index
            .checked_sub(1)
            .and_then(|i| methods.get(i))
            .ok_or_else(unknown);
    }

    methods
        .iter()
        .find(|method| method.name == reference)
        .ok_or_else(unknown)
}

/// Checks the supplied `-a` value against the method's inputs and coerces it.
pub fn bind_arguments(method: &MethodDescriptor, supplied: &ArgValue) -> Result<Vec<CallArg>> {
    let expected = method.inputs.len();
    let raw: Vec<&str> = match (expected, supplied) {
        (0, _) => return Ok(Vec::new()),
        (1, ArgValue::Single(value)) => vec![value.as_str()],
        (_, ArgValue::List(values)) if values.len() == expected => {
            values.iter().map(String::as_str).collect()
        }
        (_, ArgValue::Single(_)) => return Err(ConsoleError::ArityMismatch { expected, got: 1 }),
        (_, ArgValue::List(values)) => {
            return Err(ConsoleError::ArityMismatch {
                expected,
                got: values.len(),
            });
        }
    };

    method
        .inputs
        .iter()
        .zip(raw)
        .enumerate()
        .map(|(i, (param, value))| coerce_argument(i + 1, param, value))
        .collect()
}

/// Converts `uint256` inputs to integers; other types pass through raw.
pub fn coerce_argument(position: usize, param: &ParamDescriptor, raw: &str) -> Result<CallArg> {
    if !param.is_uint256() {
        return Ok(CallArg::Raw(raw.to_string()));
    }

    let mismatch = || ConsoleError::TypeMismatch {
        position,
        name: param.name.clone(),
        expected: UINT256.to_string(),
    };
    if !is_digits(raw) {
        return Err(mismatch());
    }
    U256::from_dec_str(raw)
        .map(CallArg::Uint)
        .map_err(|_| mismatch())
}

fn prompt_arguments(prompt: &mut dyn Prompt, method: &MethodDescriptor) -> Result<Vec<CallArg>> {
    let mut args = Vec::with_capacity(method.inputs.len());
    for (i, param) in method.inputs.iter().enumerate() {
        let raw = prompt.ask(&format!("Please enter: {} ({}): ", param.name, param.kind))?;
        args.push(coerce_argument(i + 1, param, raw.trim())?);
    }
    Ok(args)
}

/// A single `uint256` output is also shown as an 18-decimal token amount.
pub fn format_result(method: &MethodDescriptor, tokens: &[Token]) -> String {
    match (method.outputs.as_slice(), tokens.first()) {
        ([output], Some(Token::Uint(value))) if output.is_uint256() => format!(
            "{}: {}    ({}) [18d]",
            output.name,
            value,
            Helper::format_token_amount(*value)
        ),
        ([output], Some(token)) => format!("{}: {}", output.name, Helper::format_token(token)),
        _ => format!("[{}]", Helper::format_tokens(tokens)),
    }
}

fn print_methods(methods: &[MethodDescriptor]) {
    println!("Choose one of the contract read methods:");

    let mut table = TableBuilder::new();
    table.add_header(&["[mid]", "method_name", "(inputs[name: type])", "(outputs[name: type])"]);
    for (i, method) in methods.iter().enumerate() {
        let mid = format!("[{}]", i + 1);
        let inputs = format!("({})", method.inputs_label());
        let outputs = format!("({})", method.outputs_label());
        table.add_row(&[mid.as_str(), method.name.as_str(), inputs.as_str(), outputs.as_str()]);
    }
    table.print();
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
