//! Raw-token sanitization rules shared by every category.
//!
//! The sources mark "no trade" with a dash and "absent" with a blank
//! cell; both collapse to zero before numeric parsing. The conversion is
//! lossy on purpose: upstream itself cannot distinguish a holiday from a
//! true zero, and the output keeps that ambiguity.

/// Sentinel published for "no trade occurred" / "halted".
const DASH: &str = "-";

/// Dash sentinel → `0`; anything else passes through for parsing.
pub fn dash_to_zero(token: &str) -> &str {
    if token.trim() == DASH {
        "0"
    } else {
        token
    }
}

/// Empty or whitespace-only token → `0`; anything else passes through.
pub fn blank_to_zero(token: &str) -> &str {
    if token.trim().is_empty() {
        "0"
    } else {
        token
    }
}

/// Uppercase an identifier and strip interior spaces, the way index
/// names like "Nifty 50" are folded into symbols.
pub fn normalize_symbol(token: &str) -> String {
    token.trim().to_ascii_uppercase().replace(' ', "")
}

/// Price cell → decimal after sentinel conversion. Non-sentinel garbage
/// is reported, never zeroed.
pub fn parse_price(token: &str) -> Result<f64, &'static str> {
    let cleaned = blank_to_zero(dash_to_zero(token)).trim();
    let value: f64 = cleaned.parse().map_err(|_| "not a decimal number")?;
    if !value.is_finite() {
        return Err("not a finite number");
    }
    Ok(value)
}

/// Quantity cell → integer after sentinel conversion. Fractional counts
/// round to the nearest whole unit.
pub fn parse_quantity(token: &str) -> Result<u64, &'static str> {
    let cleaned = blank_to_zero(dash_to_zero(token)).trim();
    if let Ok(value) = cleaned.parse::<u64>() {
        return Ok(value);
    }
    let value: f64 = cleaned.parse().map_err(|_| "not a quantity")?;
    if !value.is_finite() || value < 0.0 {
        return Err("not a quantity");
    }
    Ok(value.round() as u64)
}

/// Cross-field repair for an open/high/low/close quadruple.
///
/// An all-zero quadruple is a holiday row and passes through untouched.
/// A row where only close is non-zero is a settlement-only session: open,
/// high and low take the close. Otherwise inconsistent readings (the
/// sources occasionally publish a spurious high below the recorded low
/// after corporate-action adjustments) are clamped rather than dropped,
/// greedily in field order open → high → low → close. Zero-valued cells
/// came from sentinels and are exempt: never clamped, never forcing a
/// clamp of another field.
pub fn sanitize_ohlc(open: f64, high: f64, low: f64, close: f64) -> (f64, f64, f64, f64) {
    if open == 0.0 && high == 0.0 && low == 0.0 {
        return if close == 0.0 {
            (open, high, low, close)
        } else {
            (close, close, close, close)
        };
    }

    let mut o = open;
    let mut h = high;
    let mut l = low;
    let mut c = close;

    if o != 0.0 {
        if l != 0.0 && o < l {
            o = l;
        }
        if h != 0.0 && o > h {
            o = h;
        }
    }
    if h != 0.0 {
        if let Some(peak) = nonzero_max([o, l, c]) {
            if h < peak {
                h = peak;
            }
        }
    }
    if l != 0.0 {
        if let Some(floor) = nonzero_min([o, h, c]) {
            if l > floor {
                l = floor;
            }
        }
    }
    if c != 0.0 {
        if l != 0.0 && c < l {
            c = l;
        }
        if h != 0.0 && c > h {
            c = h;
        }
    }

    (o, h, l, c)
}

fn nonzero_max(values: [f64; 3]) -> Option<f64> {
    values
        .into_iter()
        .filter(|value| *value != 0.0)
        .reduce(f64::max)
}

fn nonzero_min(values: [f64; 3]) -> Option<f64> {
    values
        .into_iter()
        .filter(|value| *value != 0.0)
        .reduce(f64::min)
}
