/// Name given to the nested timer of a chained command
pub const CHAIN_TIMER: &str = "chain";

/// Splits `a && b && c` into its commands, dropping empty ones
pub fn split(command: &str) -> Vec<&str> {
    command
        .split("&&")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}
