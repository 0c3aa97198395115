use crate::models::state::AppState;
use crate::models::view::{TransactionRow, ViewModel};
use super::budget_service::BudgetService;

/// Projects an `AppState` into what the user sees.
///
/// Rendering never touches the state. Each call builds the whole view from
/// scratch; lists here are small enough that diffing isn't worth it.
pub struct RenderService {
    budget: BudgetService,
}

impl RenderService {
    pub fn new() -> Self {
        Self {
            budget: BudgetService::new(),
        }
    }

    /// Build the full view: formatted remaining balance plus every expense,
    /// most recently entered first.
    pub fn render_snapshot(&self, state: &AppState) -> ViewModel {
        let remaining = self.budget.compute_remaining_balance(state);

        let transactions = state
            .expenses
            .iter()
            .rev()
            .map(|e| TransactionRow {
                description: e.description.clone(),
                date: e.date.clone(),
                time: e.time.clone(),
                amount: e.amount,
                amount_display: format_currency(e.amount),
            })
            .collect();

        ViewModel {
            remaining_balance: remaining,
            remaining_balance_display: format_currency(remaining),
            transactions,
        }
    }
}

impl Default for RenderService {
    fn default() -> Self {
        Self::new()
    }
}

/// Format an amount as US dollars: `$1,234.50`, `-$5.00`.
///
/// Rounds half away from zero on the shortest decimal form of the value,
/// so `1.005` shows as `$1.01` rather than suffering binary rounding.
/// A value that rounds to zero never carries a minus sign.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount < 0.0 { "-$∞" } else { "$∞" }.to_string();
    }

    let (whole, cents) = round_to_cents(amount.abs());
    let is_zero = whole.bytes().all(|b| b == b'0') && cents == "00";
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

    format!("{sign}${}.{cents}", group_thousands(&whole))
}

/// Split a non-negative value into whole-dollar digits and two cent digits.
fn round_to_cents(abs: f64) -> (String, String) {
    // `Display` for f64 is the shortest round-trip form and never uses an exponent.
    let repr = abs.to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part.as_bytes().get(2).is_some_and(|&d| d >= b'5');
    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - 2;
    let as_text = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    (as_text(&digits[..split]), as_text(&digits[split..]))
}

fn group_thousands(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let digits = if trimmed.is_empty() { "0" } else { trimmed };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
