use crate::engine::codes::CodeTable;
use crate::error::{CodecError, Result};

/// Concatenates the codeword of every symbol, in order. No padding or framing.
pub fn encode<I>(symbols: I, table: &CodeTable) -> Result<String>
where
    I: IntoIterator<Item = char>,
{
    let mut bits = String::new();

    for symbol in symbols {
        let code = table.get(symbol).ok_or(CodecError::UnknownSymbol(symbol))?;
        bits.push_str(code);
    }

    Ok(bits)
}
