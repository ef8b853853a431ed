use alloy::json_abi::Function;
use alloy::primitives::{Address, Bytes};
use alloy_dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier};
use color_eyre::eyre::{eyre, Result};

/// Encodes a call from a human-readable signature and string arguments
///
/// `encode_function_call("transfer(address,uint256)", &["0x..", "100"])`
pub fn encode_function_call(sig: &str, args: &[String]) -> Result<Bytes> {
    let function =
        Function::parse(sig).map_err(|e| eyre!("Invalid function signature '{}': {}", sig, e))?;

    if function.inputs.len() != args.len() {
        return Err(eyre!(
            "{} expects {} arguments, got {}",
            function.name,
            function.inputs.len(),
            args.len()
        ));
    }

    let values = function
        .inputs
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            let ty: DynSolType = param
                .resolve()
                .map_err(|e| eyre!("Unsupported type '{}': {}", param.ty, e))?;
            coerce(&ty, arg)
        })
        .collect::<Result<Vec<_>>>()?;

    let data = function
        .abi_encode_input(&values)
        .map_err(|e| eyre!("Failed to encode {}: {}", function.name, e))?;
    Ok(data.into())
}

fn coerce(ty: &DynSolType, arg: &str) -> Result<DynSolValue> {
    ty.coerce_str(arg.trim())
        .map_err(|e| eyre!("Invalid {} value '{}': {}", ty, arg, e))
}

/// Parses "0xAddr:sig(types):arg1,arg2" into a target and calldata
pub fn parse_call_spec(spec: &str) -> Result<(Address, Bytes)> {
    let parts: Vec<&str> = spec.splitn(3, ':').collect();
    if parts.len() < 2 {
        return Err(eyre!(
            "Invalid call spec format. Expected '0xAddr:sig(types)' or '0xAddr:sig(types):args'"
        ));
    }

    let to: Address = parts[0]
        .parse()
        .map_err(|e| eyre!("Invalid address '{}': {}", parts[0], e))?;

    let args = match parts.get(2) {
        Some(args) if !args.trim().is_empty() => split_args(args),
        _ => Vec::new(),
    };

    let data = encode_function_call(parts[1], &args)?;
    Ok((to, data))
}

/// Splits on top-level commas, keeping arrays and tuples together
fn split_args(s: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in s.chars() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    args.push(current.trim().to_string());

    args
}
