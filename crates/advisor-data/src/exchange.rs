//! Exchange-qualified ticker symbols.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exchange name to ticker suffix, e.g. `LSE` to `.L`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeMap {
    suffixes: HashMap<String, String>,
}

impl Default for ExchangeMap {
    fn default() -> Self {
        let suffixes = [
            ("NASDAQ", ""),
            ("NYSE", ""),
            ("LSE", ".L"),
            ("NSE", ".NS"),
            ("BSE", ".BO"),
            ("HKEX", ".HK"),
            ("CRYPTO", "-USD"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { suffixes }
    }
}

impl ExchangeMap {
    pub fn new(suffixes: HashMap<String, String>) -> Self {
        Self { suffixes }
    }

    /// Suffix for an exchange, matched case-insensitively.
    pub fn suffix(&self, exchange: &str) -> Option<&str> {
        let exchange = exchange.trim();
        self.suffixes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(exchange))
            .map(|(_, suffix)| suffix.as_str())
    }

    /// Upper-case the symbol and append the exchange suffix unless it is
    /// already there. Unknown exchanges leave the symbol bare.
    pub fn apply(&self, symbol: &str, exchange: Option<&str>) -> String {
        let symbol = symbol.trim().to_uppercase();
        match exchange.and_then(|e| self.suffix(e)) {
            Some(suffix) if !suffix.is_empty() && !symbol.ends_with(&suffix.to_uppercase()) => {
                format!("{symbol}{suffix}")
            }
            _ => symbol,
        }
    }
}

/// Split a comma separated symbol list, dropping blanks.
pub fn parse_symbol_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_suffix() {
        let map = ExchangeMap::default();
        assert_eq!(map.apply("vod", Some("LSE")), "VOD.L");
        assert_eq!(map.apply("VOD.L", Some("lse")), "VOD.L");
        assert_eq!(map.apply("reliance", Some("NSE")), "RELIANCE.NS");
        assert_eq!(map.apply("BTC", Some("CRYPTO")), "BTC-USD");
        assert_eq!(map.apply("AAPL", Some("NASDAQ")), "AAPL");
        assert_eq!(map.apply("AAPL", None), "AAPL");
        assert_eq!(map.apply("AAPL", Some("MARS")), "AAPL");
    }

    #[test]
    fn test_custom_map() {
        let map = ExchangeMap::new(HashMap::from([("tsx".to_string(), ".TO".to_string())]));
        assert_eq!(map.apply("shop", Some("TSX")), "SHOP.TO");
    }

    #[test]
    fn test_parse_symbol_list() {
        assert_eq!(parse_symbol_list(" aapl, msft ,,tsla"), vec!["AAPL", "MSFT", "TSLA"]);
        assert!(parse_symbol_list(" , ").is_empty());
    }
}
