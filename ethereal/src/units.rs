//! Ether denominations
//!
//! Parses user-supplied amounts such as `20gwei`, `1.5 Ether` or `21000`
//! (bare numbers are wei) and renders wei values in the largest unit that
//! keeps the value at or above one.

use ethers::types::U256;
use ethers::utils::{format_units, parse_units};

struct Denomination {
    /// Name shown to the user
    display: &'static str,
    /// Name understood by `ethers::utils` unit conversion
    ethers_name: &'static str,
    decimals: usize,
    aliases: &'static [&'static str],
    /// Wei, GWei and Ether are the standard denominations
    standard: bool,
}

/// Smallest first
const DENOMINATIONS: &[Denomination] = &[
    Denomination {
        display: "Wei",
        ethers_name: "wei",
        decimals: 0,
        aliases: &["wei"],
        standard: true,
    },
    Denomination {
        display: "KWei",
        ethers_name: "kwei",
        decimals: 3,
        aliases: &["kwei", "babbage"],
        standard: false,
    },
    Denomination {
        display: "MWei",
        ethers_name: "mwei",
        decimals: 6,
        aliases: &["mwei", "lovelace"],
        standard: false,
    },
    Denomination {
        display: "GWei",
        ethers_name: "gwei",
        decimals: 9,
        aliases: &["gwei", "shannon", "nano"],
        standard: true,
    },
    Denomination {
        display: "Szabo",
        ethers_name: "twei",
        decimals: 12,
        aliases: &["szabo", "micro", "microether"],
        standard: false,
    },
    Denomination {
        display: "Finney",
        ethers_name: "pwei",
        decimals: 15,
        aliases: &["finney", "milli", "milliether"],
        standard: false,
    },
    Denomination {
        display: "Ether",
        ethers_name: "ether",
        decimals: 18,
        aliases: &["ether", "eth"],
        standard: true,
    },
];

fn denomination(name: &str) -> Option<&'static Denomination> {
    let name = name.to_lowercase();
    DENOMINATIONS
        .iter()
        .find(|d| d.aliases.contains(&name.as_str()))
}

/// Parse an amount with an optional denomination into wei
///
/// Accepts `<number>[ ]<unit>` (case-insensitive unit, decimals allowed when
/// the unit has them) and `0x`-prefixed hex wei values.
pub fn string_to_wei(input: &str) -> Result<U256, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty amount".to_string());
    }

    if let Some(hex_value) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return U256::from_str_radix(hex_value, 16)
            .map_err(|e| format!("invalid hex amount: {}", e));
    }

    if trimmed.starts_with('-') {
        return Err("amount cannot be negative".to_string());
    }

    let split = trimmed
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let (amount, unit) = trimmed.split_at(split);
    let amount = amount.trim();
    let unit = unit.trim();

    if amount.is_empty() {
        return Err(format!("missing number in '{}'", trimmed));
    }

    let denomination = if unit.is_empty() {
        &DENOMINATIONS[0]
    } else {
        denomination(unit).ok_or_else(|| format!("unknown unit '{}'", unit))?
    };

    parse_units(amount, denomination.ethers_name)
        .map(Into::into)
        .map_err(|e| format!("cannot parse '{}': {}", trimmed, e))
}

/// Render a wei value in the largest denomination in which it is at least one
///
/// With `standard` set only Wei, GWei and Ether are used.
pub fn wei_to_string(value: U256, standard: bool) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    let denomination = DENOMINATIONS
        .iter()
        .rev()
        .filter(|d| !standard || d.standard)
        .find(|d| value >= U256::exp10(d.decimals))
        .unwrap_or(&DENOMINATIONS[0]);

    match format_units(value, denomination.ethers_name) {
        Ok(formatted) => format!("{} {}", trim_fraction(&formatted), denomination.display),
        Err(_) => format!("{} Wei", value),
    }
}

fn trim_fraction(formatted: &str) -> &str {
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted
    }
}
