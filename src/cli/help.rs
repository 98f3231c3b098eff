//! CLI help: usage text printed when the positional contract is not met.

/// Usage summary for the opcode-driven surface.
pub fn usage() -> String {
    [
        "Usage: coffer <path> [opcode] [partCount]",
        "   opcode:",
        "      1: List summary information at top level",
        "      2: Aggregate whole-tree container/stream counts",
        "      3: Generate a synthetic container file with <partCount> parts",
    ]
    .join("\n")
}
