#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitGrouping {
    /// 1,234,567
    Western,
    /// 12,34,567
    Indian,
}

/// How amounts are rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub code: &'static str,
    pub symbol: &'static str,
    pub grouping: DigitGrouping,
    /// Approximate units per US dollar, only used to size offline estimates.
    pub per_usd: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            code: "INR",
            symbol: "₹",
            grouping: DigitGrouping::Indian,
            per_usd: 83,
        }
    }
}

impl CurrencyFormat {
    pub fn for_code(code: &str) -> Option<Self> {
        let format = match code.to_ascii_uppercase().as_str() {
            "INR" => Self::default(),
            "USD" => Self {
                code: "USD",
                symbol: "$",
                grouping: DigitGrouping::Western,
                per_usd: 1,
            },
            "EUR" => Self {
                code: "EUR",
                symbol: "€",
                grouping: DigitGrouping::Western,
                per_usd: 1,
            },
            "GBP" => Self {
                code: "GBP",
                symbol: "£",
                grouping: DigitGrouping::Western,
                per_usd: 1,
            },
            _ => return None,
        };
        Some(format)
    }

    /// Renders `amount` rounded to the nearest whole unit, e.g. `₹1,25,000`.
    pub fn format(&self, amount: f64) -> String {
        format!("{}{}", self.symbol, self.group_digits(whole_units(amount)))
    }

    /// Renders a range label such as `₹500-1,000`.
    pub fn format_range(&self, low: f64, high: f64) -> String {
        format!(
            "{}{}-{}",
            self.symbol,
            self.group_digits(whole_units(low)),
            self.group_digits(whole_units(high))
        )
    }

    fn group_digits(&self, value: u64) -> String {
        let digits = value.to_string();
        if digits.len() <= 3 {
            return digits;
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let group = match self.grouping {
            DigitGrouping::Western => 3,
            DigitGrouping::Indian => 2,
        };

        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(group);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();

        format!("{},{}", groups.join(","), tail)
    }
}

fn whole_units(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    }
}
