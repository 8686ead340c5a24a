// ============================================================================
// Pattern Codec
// Renders and reads money text using display patterns such as "S#,##0.00"
// ============================================================================
//
// Pattern characters:
// - S  currency symbol
// - C  one character of the currency code; a run of n C's prints the first
//      n characters, and three or more print the whole code
// - 0  mandatory digit
// - #  optional digit
// - ,  grouping separator
// - .  decimal separator
// Anything else is copied literally. With `invert_separators` the roles of
// '.' and ',' swap in both pattern and text.

use crate::domain::{Currency, MoneyError, MoneyResult};
use crate::interfaces::{MoneyData, PatternDecoder, PatternEncoder};
use crate::numeric::{FixedDecimal, MAX_SCALE};
use smallvec::SmallVec;
use std::sync::Arc;

/// Layout of the numeric section of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberLayout {
    min_int_digits: usize,
    group_size: Option<usize>,
    min_frac_digits: usize,
    max_frac_digits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Symbol,
    /// Length of the `C` run
    Code(usize),
    Number(NumberLayout),
    Literal(char),
}

/// A pattern broken into tokens, with the separator convention resolved.
#[derive(Debug, Clone)]
pub(crate) struct CompiledPattern {
    tokens: SmallVec<[Token; 8]>,
    decimal_separator: char,
    group_separator: char,
}

fn invalid(pattern: &str, reason: &str) -> MoneyError {
    MoneyError::InvalidPattern(format!("{pattern:?}: {reason}"))
}

impl CompiledPattern {
    pub(crate) fn compile(pattern: &str, invert_separators: bool) -> MoneyResult<Self> {
        let (decimal_separator, group_separator) = if invert_separators {
            (',', '.')
        } else {
            ('.', ',')
        };
        let is_number_char =
            |c: char| c == '0' || c == '#' || c == decimal_separator || c == group_separator;

        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens: SmallVec<[Token; 8]> = SmallVec::new();
        let mut seen_number = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match c {
                'S' => {
                    tokens.push(Token::Symbol);
                    i += 1;
                }
                'C' => {
                    let start = i;
                    while i < chars.len() && chars[i] == 'C' {
                        i += 1;
                    }
                    tokens.push(Token::Code(i - start));
                }
                c if c == '0' || c == '#' => {
                    if seen_number {
                        return Err(invalid(pattern, "more than one number section"));
                    }
                    let start = i;
                    while i < chars.len() && is_number_char(chars[i]) {
                        i += 1;
                    }
                    let section: String = chars[start..i].iter().collect();
                    let layout =
                        Self::number_layout(pattern, &section, decimal_separator, group_separator)?;
                    tokens.push(Token::Number(layout));
                    seen_number = true;
                }
                c => {
                    tokens.push(Token::Literal(c));
                    i += 1;
                }
            }
        }

        if !seen_number {
            return Err(invalid(pattern, "no digit placeholders"));
        }

        Ok(Self {
            tokens,
            decimal_separator,
            group_separator,
        })
    }

    fn number_layout(
        pattern: &str,
        section: &str,
        decimal_separator: char,
        group_separator: char,
    ) -> MoneyResult<NumberLayout> {
        let mut parts = section.split(decimal_separator);
        let int_part = parts.next().unwrap_or_default();
        let frac_part = parts.next().unwrap_or_default();
        if parts.next().is_some() {
            return Err(invalid(pattern, "more than one decimal separator"));
        }
        if frac_part.contains(group_separator) {
            return Err(invalid(pattern, "grouping separator after the decimal separator"));
        }

        let group_size = match int_part.rfind(group_separator) {
            Some(pos) => {
                let size = int_part.len() - pos - group_separator.len_utf8();
                if size == 0 {
                    return Err(invalid(pattern, "empty digit group"));
                }
                Some(size)
            }
            None => None,
        };

        let max_frac_digits = frac_part.chars().count();
        if max_frac_digits > MAX_SCALE as usize {
            return Err(invalid(pattern, "too many fractional digits"));
        }

        Ok(NumberLayout {
            min_int_digits: int_part.chars().filter(|&c| c == '0').count(),
            group_size,
            min_frac_digits: frac_part.chars().filter(|&c| c == '0').count(),
            max_frac_digits,
        })
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    fn encode(&self, amount: &FixedDecimal, currency: &Currency) -> String {
        let mut out = String::new();
        let mut negative = false;

        for token in &self.tokens {
            match token {
                Token::Symbol => out.push_str(currency.symbol()),
                Token::Code(run) => out.push_str(code_prefix(currency.code(), *run)),
                Token::Literal(c) => out.push(*c),
                Token::Number(layout) => {
                    let max_frac = u32::try_from(layout.max_frac_digits).unwrap_or(MAX_SCALE);
                    let rounded = amount.rescaled_unchecked(max_frac);
                    negative = rounded.is_negative();
                    out.push_str(&self.render_number(&rounded, layout));
                }
            }
        }

        if negative {
            out.insert(0, '-');
        }
        out
    }

    fn render_number(&self, rounded: &FixedDecimal, layout: &NumberLayout) -> String {
        let digits = rounded.minor_units().magnitude().to_string();
        let padded = format!("{digits:0>width$}", width = layout.max_frac_digits + 1);
        let (int_digits, frac_digits) = padded.split_at(padded.len() - layout.max_frac_digits);

        let mut frac = frac_digits.to_string();
        while frac.len() > layout.min_frac_digits && frac.ends_with('0') {
            frac.pop();
        }

        let mut int = if layout.min_int_digits == 0 && int_digits == "0" {
            String::new()
        } else {
            int_digits.to_string()
        };
        if int.len() < layout.min_int_digits {
            int = format!("{int:0>width$}", width = layout.min_int_digits);
        }
        if int.is_empty() && frac.is_empty() {
            int.push('0');
        }

        if let Some(size) = layout.group_size {
            int = group_digits(&int, size, self.group_separator);
        }

        if frac.is_empty() {
            int
        } else {
            format!("{int}{}{frac}", self.decimal_separator)
        }
    }

    // ========================================================================
    // Decoding
    // ========================================================================

    fn decode(&self, text: &str, currency: &Currency) -> MoneyResult<FixedDecimal> {
        let mut reader = Reader::new(text);
        reader.skip_whitespace();
        let mut negative = reader.eat('-');
        let mut amount = None;

        for token in &self.tokens {
            match token {
                Token::Symbol => reader.expect_str(currency.symbol(), "currency symbol")?,
                Token::Code(run) => {
                    reader.expect_str(code_prefix(currency.code(), *run), "currency code")?
                }
                Token::Literal(c) if c.is_whitespace() => reader.skip_whitespace(),
                Token::Literal(c) => reader.expect_str(&c.to_string(), "literal")?,
                Token::Number(layout) => {
                    if !negative {
                        negative = reader.eat('-');
                    }
                    amount = Some(self.read_number(&mut reader, layout, currency.scale())?);
                }
            }
        }

        reader.skip_whitespace();
        if !reader.is_done() {
            return Err(reader.failure("unexpected trailing characters"));
        }

        let amount = amount.ok_or_else(|| reader.failure("no amount found"))?;
        Ok(if negative { -amount } else { amount })
    }

    /// Read the digits of the number section.
    ///
    /// Every fractional digit is kept when there are at most `MAX_SCALE` of
    /// them; longer fractions are rounded once, straight to `currency_scale`.
    fn read_number(
        &self,
        reader: &mut Reader,
        layout: &NumberLayout,
        currency_scale: u32,
    ) -> MoneyResult<FixedDecimal> {
        let start = reader.position();
        let mut int_digits = String::new();
        let mut frac_digits = String::new();

        while let Some(c) = reader.peek() {
            if c.is_ascii_digit() {
                int_digits.push(c);
            } else if c == self.group_separator && layout.group_size.is_some() {
                // grouping is cosmetic
            } else {
                break;
            }
            reader.advance();
        }

        if reader.eat(self.decimal_separator) {
            while let Some(c) = reader.peek().filter(char::is_ascii_digit) {
                frac_digits.push(c);
                reader.advance();
            }
        }

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(MoneyError::ParseFailure {
                detail: "expected digits".to_string(),
                position: start,
            });
        }

        let scale = match u32::try_from(frac_digits.len()) {
            Ok(scale) if scale <= MAX_SCALE => scale,
            _ => currency_scale,
        };
        FixedDecimal::parse_with_scale(&format!("{int_digits}.{frac_digits}"), scale).map_err(
            |err| MoneyError::ParseFailure {
                detail: err.to_string(),
                position: start,
            },
        )
    }
}

/// First `run` characters of `code`; runs of three or more give the whole code.
fn code_prefix(code: &str, run: usize) -> &str {
    if run >= 3 {
        return code;
    }
    code.char_indices()
        .nth(run)
        .map_or(code, |(end, _)| &code[..end])
}

fn group_digits(int: &str, size: usize, separator: char) -> String {
    let len = int.len();
    let mut out = String::with_capacity(len + len / size);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (len - i) % size == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Cursor over the characters of the text being decoded.
struct Reader {
    chars: Vec<char>,
    pos: usize,
}

impl Reader {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn is_done(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn expect_str(&mut self, expected: &str, what: &str) -> MoneyResult<()> {
        let start = self.pos;
        for c in expected.chars() {
            if !self.eat(c) {
                self.pos = start;
                return Err(self.failure(&format!("expected {what} {expected:?}")));
            }
        }
        Ok(())
    }

    fn failure(&self, detail: &str) -> MoneyError {
        MoneyError::ParseFailure {
            detail: detail.to_string(),
            position: self.pos,
        }
    }
}

// ============================================================================
// Pattern Codec
// ============================================================================

/// Default text codec for money values.
///
/// Encoding rounds half away from zero to the pattern's fractional digits.
/// Decoding keeps up to `MAX_SCALE` fractional digits; longer fractions are
/// rounded to the currency's scale. Callers rescale to the currency.
///
/// # Example
/// ```text
/// pattern "S#,##0.00", AUD, 1234567 minor units  ->  "$12,345.67"
/// pattern "CCC 0.00",  AUD, -150 minor units     ->  "-AUD 1.50"
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternCodec;

impl PatternCodec {
    pub fn new() -> Self {
        Self
    }
}

impl PatternDecoder for PatternCodec {
    fn decode(
        &self,
        text: &str,
        pattern: &str,
        currency: &Arc<Currency>,
    ) -> MoneyResult<MoneyData> {
        let compiled = CompiledPattern::compile(pattern, currency.invert_separators())?;
        let amount = compiled.decode(text, currency).inspect_err(|err| {
            tracing::debug!(text, pattern, error = %err, "money text did not match pattern");
        })?;
        Ok(MoneyData::new(amount, Arc::clone(currency)))
    }
}

impl PatternEncoder for PatternCodec {
    fn encode(&self, data: &MoneyData, pattern: &str) -> MoneyResult<String> {
        let compiled = CompiledPattern::compile(pattern, data.currency.invert_separators())?;
        Ok(compiled.encode(&data.amount, &data.currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aud() -> Arc<Currency> {
        Arc::new(Currency::new("AUD", 2).unwrap())
    }

    fn eur() -> Arc<Currency> {
        Arc::new(
            Currency::new("EUR", 2)
                .unwrap()
                .with_symbol("€")
                .with_invert_separators(true),
        )
    }

    fn encode(amount: &str, currency: &Arc<Currency>, pattern: &str) -> String {
        let data = MoneyData::new(amount.parse().unwrap(), Arc::clone(currency));
        PatternCodec.encode(&data, pattern).unwrap()
    }

    fn decode(text: &str, currency: &Arc<Currency>, pattern: &str) -> MoneyResult<FixedDecimal> {
        PatternCodec
            .decode(text, pattern, currency)
            .map(|data| data.amount)
    }

    #[test]
    fn test_encode_basic() {
        let aud = aud();
        assert_eq!(encode("10.00", &aud, "S0.00"), "$10.00");
        assert_eq!(encode("10.5", &aud, "S0.00"), "$10.50");
        assert_eq!(encode("0.05", &aud, "S0.00"), "$0.05");
        assert_eq!(encode("7", &aud, "S0"), "$7");
    }

    #[test]
    fn test_encode_grouping_and_code() {
        let aud = aud();
        assert_eq!(encode("12345.67", &aud, "S#,##0.00"), "$12,345.67");
        assert_eq!(encode("1234567.00", &aud, "CCC #,##0.00"), "AUD 1,234,567.00");
        assert_eq!(encode("999.00", &aud, "S#,##0.00"), "$999.00");
    }

    #[test]
    fn test_encode_optional_digits() {
        let aud = aud();
        assert_eq!(encode("10.50", &aud, "S0.##"), "$10.5");
        assert_eq!(encode("10.00", &aud, "S0.##"), "$10");
        assert_eq!(encode("0.50", &aud, "S#.00"), "$.50");
    }

    #[test]
    fn test_encode_rounds_half_away_from_zero() {
        let aud = aud();
        assert_eq!(encode("1.005", &aud, "S0.00"), "$1.01");
        assert_eq!(encode("-1.005", &aud, "S0.00"), "-$1.01");
        assert_eq!(encode("-0.004", &aud, "S0.00"), "$0.00");
    }

    #[test]
    fn test_encode_inverted_separators() {
        let eur = eur();
        assert_eq!(encode("1234.56", &eur, "S#.##0,00"), "€1.234,56");
        assert_eq!(encode("-5.00", &eur, "0,00 S"), "-5,00 €");
    }

    #[test]
    fn test_decode_basic() {
        let aud = aud();
        assert_eq!(decode("$10.25", &aud, "S0.00").unwrap(), "10.25".parse().unwrap());
        assert_eq!(decode("  $10.25 ", &aud, "S0.00").unwrap(), "10.25".parse().unwrap());
        assert_eq!(decode("-$3.50", &aud, "S0.00").unwrap(), "-3.50".parse().unwrap());
        assert_eq!(decode("$-3.50", &aud, "S0.00").unwrap(), "-3.50".parse().unwrap());
        assert_eq!(decode("$7", &aud, "S0.00").unwrap(), "7".parse().unwrap());
    }

    #[test]
    fn test_decode_grouping_and_code() {
        let aud = aud();
        assert_eq!(
            decode("AUD 1,234,567.89", &aud, "CCC #,##0.00").unwrap(),
            "1234567.89".parse().unwrap()
        );
        assert_eq!(
            decode("AUD1,000", &aud, "CCC #,##0.00").unwrap(),
            "1000".parse().unwrap()
        );
    }

    #[test]
    fn test_decode_inverted_separators() {
        let eur = eur();
        assert_eq!(
            decode("€1.234,56", &eur, "S#.##0,00").unwrap(),
            "1234.56".parse().unwrap()
        );
    }

    #[test]
    fn test_decode_failures_report_position() {
        let aud = aud();
        assert_eq!(
            decode("10.00", &aud, "S0.00").unwrap_err(),
            MoneyError::ParseFailure {
                detail: "expected currency symbol \"$\"".to_string(),
                position: 0,
            }
        );
        assert_eq!(
            decode("$abc", &aud, "S0.00").unwrap_err(),
            MoneyError::ParseFailure {
                detail: "expected digits".to_string(),
                position: 1,
            }
        );
        assert!(matches!(
            decode("$10.00 extra", &aud, "S0.00"),
            Err(MoneyError::ParseFailure { position: 7, .. })
        ));
        assert!(matches!(
            decode("USD 10.00", &aud, "CCC 0.00"),
            Err(MoneyError::ParseFailure { .. })
        ));
    }

    #[test]
    fn test_code_runs() {
        let aud = aud();
        assert_eq!(encode("1.00", &aud, "C 0.00"), "A 1.00");
        assert_eq!(encode("1.00", &aud, "CC0.00"), "AU1.00");
        assert_eq!(encode("1.00", &aud, "CCC 0.00"), "AUD 1.00");
        assert_eq!(encode("1.00", &aud, "CCCC 0.00"), "AUD 1.00");

        assert_eq!(decode("A 1.00", &aud, "C 0.00").unwrap(), "1".parse().unwrap());
        assert_eq!(decode("AU1.00", &aud, "CC0.00").unwrap(), "1".parse().unwrap());
        assert!(matches!(
            decode("AUD 1.00", &aud, "C 0.00"),
            Err(MoneyError::ParseFailure { position: 1, .. })
        ));
    }

    #[test]
    fn test_code_prefix() {
        assert_eq!(code_prefix("AUD", 1), "A");
        assert_eq!(code_prefix("AUD", 2), "AU");
        assert_eq!(code_prefix("USDT", 3), "USDT");
        assert_eq!(code_prefix("X", 2), "X");
    }

    #[test]
    fn test_decode_long_fraction_rounds_to_currency_scale() {
        let aud = aud();
        let text = format!("$0.{}", "1".repeat(70));
        assert_eq!(decode(&text, &aud, "S0.00").unwrap(), "0.11".parse().unwrap());

        let text = format!("$2.00{}", "5".repeat(70));
        assert_eq!(decode(&text, &aud, "S0.00").unwrap(), "2.01".parse().unwrap());

        // up to the scale limit every digit is kept
        let text = format!("$0.{}", "1".repeat(64));
        assert_eq!(decode(&text, &aud, "S0.00").unwrap().scale(), 64);
    }

    #[test]
    fn test_invalid_patterns() {
        for bad in ["S", "0.00.0", "0.0,0", "0,.00", "0.00 #"] {
            assert!(
                matches!(
                    CompiledPattern::compile(bad, false),
                    Err(MoneyError::InvalidPattern(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1234567", 3, ','), "1,234,567");
        assert_eq!(group_digits("123", 3, ','), "123");
        assert_eq!(group_digits("12345", 2, ' '), "1 23 45");
    }
}
