// File: crates/wickline-core/src/symbols.rs
// Summary: Built-in trading pairs offered by the hosts' symbol pickers.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbol {
    /// Identifier sent to the data source, e.g. `BTCUSDT`.
    pub id: &'static str,
    /// Label shown to the viewer, e.g. `BTC/USDT`.
    pub display: &'static str,
}

pub const SYMBOLS: [Symbol; 3] = [
    Symbol { id: "BTCUSDT", display: "BTC/USDT" },
    Symbol { id: "ETHUSDT", display: "ETH/USDT" },
    Symbol { id: "XRPUSDT", display: "XRP/USDT" },
];

/// Case-insensitive lookup by id.
pub fn find(id: &str) -> Option<Symbol> {
    SYMBOLS.iter().copied().find(|s| s.id.eq_ignore_ascii_case(id.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(find("ethusdt").map(|s| s.display), Some("ETH/USDT"));
        assert_eq!(find("DOGEUSDT"), None);
    }
}
