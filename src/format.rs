/// Unit base for byte-size formatting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnitBase {
    /// Powers of 1000.
    Decimal,
    /// Powers of 1024.
    Binary,
}

impl UnitBase {
    fn value(self) -> f64 {
        match self {
            Self::Decimal => 1000.0,
            Self::Binary => 1024.0,
        }
    }
}

const UNITS: [&str; 7] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Render a byte count as a human-readable size.
///
/// The value is scaled into the largest unit it fills at least once, shown
/// with at most `decimals` fractional digits; trailing zeros (and a bare
/// decimal point) are trimmed, so `1024` at two decimals renders `"1 KB"`,
/// not `"1.00 KB"`.
pub fn format_bytes(bytes: u64, base: UnitBase, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let base = base.value();
    let exponent = ((bytes as f64).ln() / base.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / base.powi(exponent as i32);

    let mut rendered = format!("{value:.decimals$}");
    if rendered.contains('.') {
        rendered = rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_owned();
    }
    format!("{rendered} {}", UNITS[exponent])
}
