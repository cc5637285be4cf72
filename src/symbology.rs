use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Barcode encodings a label can be printed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    Code128,
    Interleaved2of5,
}

impl Symbology {
    pub const ALL: [Symbology; 2] = [Symbology::Code128, Symbology::Interleaved2of5];

    /// Encoder backing this symbology. New variants need a row here.
    pub fn encoder(self) -> &'static dyn SymbolEncoder {
        match self {
            Symbology::Code128 => &Code128Encoder,
            Symbology::Interleaved2of5 => &Interleaved2of5Encoder,
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbology::Code128 => write!(f, "CODE_128"),
            Symbology::Interleaved2of5 => write!(f, "INTERLEAVED_2_OF_5"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("nothing to encode")]
    Empty,
    #[error("unsupported character: '{0}' (U+{1:04X})")]
    Unsupported(char, u32),
    #[error("interleaved 2 of 5 needs an even number of digits, got {0}")]
    OddLength(usize),
}

/// Module sequence of one symbol, left to right. `true` is a bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarPattern {
    modules: Vec<bool>,
}

impl BarPattern {
    /// Build from alternating element widths, starting with a bar.
    fn from_widths<I: IntoIterator<Item = u8>>(widths: I) -> Self {
        let mut modules = Vec::new();
        let mut bar = true;
        for width in widths {
            modules.extend(std::iter::repeat_n(bar, width as usize));
            bar = !bar;
        }
        Self { modules }
    }

    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// Symbol width in modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

pub trait SymbolEncoder: Sync {
    fn name(&self) -> &'static str;
    fn encode(&self, data: &str) -> Result<BarPattern, EncodeError>;
    fn is_supported(&self, data: &str) -> bool {
        self.encode(data).is_ok()
    }
}

const CODE128_START_B: u8 = 104;
const CODE128_START_C: u8 = 105;
const CODE128_SWITCH_B: u8 = 100;
const CODE128_STOP: u8 = 106;

/// Bar/space widths for symbol values 0..=105, then the stop pattern.
#[rustfmt::skip]
const CODE128_PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312",
    "132212", "221213", "221312", "231212", "112232", "122132", "122231", "113222",
    "123122", "123221", "223211", "221132", "221231", "213212", "223112", "312131",
    "311222", "321122", "321221", "312212", "322112", "322211", "212123", "212321",
    "232121", "111323", "131123", "131321", "112313", "132113", "132311", "211313",
    "231113", "231311", "112133", "112331", "132131", "113123", "113321", "133121",
    "313121", "211331", "231131", "213113", "213311", "213131", "311123", "311321",
    "331121", "312113", "312311", "332111", "314111", "221411", "431111", "111224",
    "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111",
    "111242", "121142", "121241", "114212", "124112", "124211", "411212", "421112",
    "421211", "212141", "214121", "412121", "111143", "111341", "131141", "114113",
    "114311", "411113", "411311", "113141", "114131", "311141", "411131", "211412",
    "211214", "211232", "2331112",
];

/// Code 128 with automatic code set selection.
///
/// Digit-only payloads are packed two digits per symbol (code set C); a
/// trailing odd digit switches to code set B. Anything else printable goes
/// through code set B.
#[derive(Debug, Default, Clone, Copy)]
pub struct Code128Encoder;

impl Code128Encoder {
    /// Symbol values including start, checksum and stop.
    pub fn symbol_values(&self, data: &str) -> Result<Vec<u8>, EncodeError> {
        if data.is_empty() {
            return Err(EncodeError::Empty);
        }
        if let Some(ch) = data.chars().find(|ch| !(' '..='~').contains(ch)) {
            return Err(EncodeError::Unsupported(ch, ch as u32));
        }

        let bytes = data.as_bytes();
        let mut values = Vec::with_capacity(bytes.len() + 3);
        if bytes.len() >= 2 && bytes.iter().all(u8::is_ascii_digit) {
            values.push(CODE128_START_C);
            let mut pairs = bytes.chunks_exact(2);
            for pair in pairs.by_ref() {
                values.push((pair[0] - b'0') * 10 + (pair[1] - b'0'));
            }
            if let [last] = pairs.remainder() {
                values.push(CODE128_SWITCH_B);
                values.push(last - b' ');
            }
        } else {
            values.push(CODE128_START_B);
            values.extend(bytes.iter().map(|b| b - b' '));
        }

        let weighted: u32 = values
            .iter()
            .enumerate()
            .map(|(pos, &value)| pos.max(1) as u32 * value as u32)
            .sum();
        values.push((weighted % 103) as u8);
        values.push(CODE128_STOP);
        Ok(values)
    }
}

impl SymbolEncoder for Code128Encoder {
    fn name(&self) -> &'static str {
        "Code 128"
    }

    fn encode(&self, data: &str) -> Result<BarPattern, EncodeError> {
        let values = self.symbol_values(data)?;
        Ok(BarPattern::from_widths(values.iter().flat_map(|&value| {
            CODE128_PATTERNS[value as usize].bytes().map(|b| b - b'0')
        })))
    }
}

/// Narrow/wide element layout per digit.
const ITF_DIGITS: [&str; 10] = [
    "NNWWN", "WNNNW", "NWNNW", "WWNNN", "NNWNW", "WNWNN", "NWWNN", "NNNWW", "WNNWN", "NWNWN",
];
const ITF_WIDE: u8 = 3;
const ITF_START: [u8; 4] = [1, 1, 1, 1];
const ITF_STOP: [u8; 3] = [ITF_WIDE, 1, 1];

/// Interleaved 2 of 5: digit pairs, the first digit in the bars and the
/// second in the spaces. No check digit is appended.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interleaved2of5Encoder;

impl SymbolEncoder for Interleaved2of5Encoder {
    fn name(&self) -> &'static str {
        "Interleaved 2 of 5"
    }

    fn encode(&self, data: &str) -> Result<BarPattern, EncodeError> {
        if data.is_empty() {
            return Err(EncodeError::Empty);
        }
        if let Some(ch) = data.chars().find(|ch| !ch.is_ascii_digit()) {
            return Err(EncodeError::Unsupported(ch, ch as u32));
        }
        if data.len() % 2 != 0 {
            return Err(EncodeError::OddLength(data.len()));
        }

        let mut widths: Vec<u8> = ITF_START.to_vec();
        for pair in data.as_bytes().chunks_exact(2) {
            let bars = ITF_DIGITS[(pair[0] - b'0') as usize].as_bytes();
            let spaces = ITF_DIGITS[(pair[1] - b'0') as usize].as_bytes();
            for (&bar, &space) in bars.iter().zip(spaces) {
                widths.push(itf_width(bar));
                widths.push(itf_width(space));
            }
        }
        widths.extend_from_slice(&ITF_STOP);
        Ok(BarPattern::from_widths(widths))
    }
}

fn itf_width(element: u8) -> u8 {
    if element == b'W' { ITF_WIDE } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn code128_patterns_are_eleven_modules() {
        for (value, pattern) in CODE128_PATTERNS.iter().enumerate().take(106) {
            let total: u32 = pattern.bytes().map(|b| (b - b'0') as u32).sum();
            assert_eq!(total, 11, "pattern for value {value}");
        }
        let stop: u32 = CODE128_PATTERNS[106].bytes().map(|b| (b - b'0') as u32).sum();
        assert_eq!(stop, 13);
    }

    #[test]
    fn code128_packs_digit_pairs() {
        let values = Code128Encoder.symbol_values("00000123").unwrap();
        assert_eq!(values, vec![105, 0, 0, 1, 23, 97, 106]);
        let pattern = Code128Encoder.encode("00000123").unwrap();
        assert_eq!(pattern.len(), 6 * 11 + 13);
    }

    #[test]
    fn code128_odd_digit_tail_switches_to_set_b() {
        let values = Code128Encoder.symbol_values("123456789").unwrap();
        assert_eq!(values, vec![105, 12, 34, 56, 78, 100, 25, 79, 106]);
    }

    #[test]
    fn code128_text_uses_set_b() {
        let values = Code128Encoder.symbol_values("ABC").unwrap();
        assert_eq!(values, vec![104, 33, 34, 35, 1, 106]);
        let values = Code128Encoder.symbol_values("7").unwrap();
        assert_eq!(values[0], 104);
    }

    #[test]
    fn code128_rejects_control_and_empty() {
        assert_eq!(
            Code128Encoder.encode("a\tb"),
            Err(EncodeError::Unsupported('\t', 9))
        );
        assert_eq!(Code128Encoder.encode(""), Err(EncodeError::Empty));
    }

    #[test]
    fn interleaved_widths() {
        let pattern = Interleaved2of5Encoder.encode("00000123").unwrap();
        // start 4 + four pairs of 18 + stop 5
        assert_eq!(pattern.len(), 4 + 4 * 18 + 5);
        assert_eq!(&pattern.modules()[..4], &[true, false, true, false]);
    }

    #[test]
    fn interleaved_rejects_odd_and_letters() {
        assert_eq!(
            Interleaved2of5Encoder.encode("123"),
            Err(EncodeError::OddLength(3))
        );
        assert_eq!(
            Interleaved2of5Encoder.encode("12a4"),
            Err(EncodeError::Unsupported('a', 0x61))
        );
        assert!(!Interleaved2of5Encoder.is_supported("123456789"));
    }

    #[test]
    fn patterns_start_and_end_with_bars() {
        for symbology in Symbology::ALL {
            let pattern = symbology.encoder().encode("12345678").unwrap();
            assert!(pattern.modules()[0], "{symbology}");
            assert!(*pattern.modules().last().unwrap(), "{symbology}");
        }
    }

    #[test]
    fn mapping_table_matches_variants() {
        assert_eq!(Symbology::Code128.encoder().name(), "Code 128");
        assert_eq!(
            Symbology::Interleaved2of5.encoder().name(),
            "Interleaved 2 of 5"
        );
    }
}
