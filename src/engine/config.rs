#[derive(Debug, Clone)]
pub struct EngineLimits {
    pub max_input_symbols: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_input_symbols: 16 * 1024 * 1024,
        }
    }
}
