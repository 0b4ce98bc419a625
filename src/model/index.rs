//! Index symbols used to group entries by the first character of their reading

use std::fmt;

/// Label of the catch-all bucket for Latin-script readings
pub const LATIN_LABEL: &str = "A-Z";

/// Kana row symbols in display order
const KANA: [char; 44] = [
    'あ', 'い', 'う', 'え', 'お', //
    'か', 'き', 'く', 'け', 'こ', //
    'さ', 'し', 'す', 'せ', 'そ', //
    'た', 'ち', 'つ', 'て', 'と', //
    'な', 'に', 'ぬ', 'ね', 'の', //
    'は', 'ひ', 'ふ', 'へ', 'ほ', //
    'ま', 'み', 'む', 'め', 'も', //
    'や', 'ゆ', 'よ', //
    'ら', 'り', 'る', 'れ', 'ろ', //
    'わ',
];

/// One button of the index bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexSymbol {
    /// A plain hiragana symbol from the fixed set
    Kana(char),
    /// Readings that start with A-Z or a-z
    Latin,
}

impl IndexSymbol {
    /// All symbols in the order they are shown
    pub fn all() -> Vec<IndexSymbol> {
        KANA.iter()
            .copied()
            .map(IndexSymbol::Kana)
            .chain(std::iter::once(IndexSymbol::Latin))
            .collect()
    }

    /// Parse a label, accepting only members of the fixed set
    pub fn parse(label: &str) -> Option<IndexSymbol> {
        if label == LATIN_LABEL {
            return Some(IndexSymbol::Latin);
        }
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if KANA.contains(&c) => Some(IndexSymbol::Kana(c)),
            _ => None,
        }
    }

    /// Label as stored in `GlossaryEntry::initial`
    pub fn label(&self) -> String {
        match self {
            IndexSymbol::Kana(c) => c.to_string(),
            IndexSymbol::Latin => LATIN_LABEL.to_string(),
        }
    }

    /// Whether an entry's stored initial names this symbol
    pub fn is_label(&self, initial: &str) -> bool {
        match self {
            IndexSymbol::Kana(c) => {
                let mut chars = initial.chars();
                chars.next() == Some(*c) && chars.next().is_none()
            }
            IndexSymbol::Latin => initial == LATIN_LABEL,
        }
    }

    /// Derive the bucket for a reading from its first character
    pub fn for_reading(reading: &str) -> Option<IndexSymbol> {
        let first = reading.trim_start().chars().next()?;
        if first.is_ascii_alphabetic() {
            return Some(IndexSymbol::Latin);
        }
        let folded = fold_kana(first);
        KANA.contains(&folded).then_some(IndexSymbol::Kana(folded))
    }
}

impl fmt::Display for IndexSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSymbol::Kana(c) => write!(f, "{}", c),
            IndexSymbol::Latin => f.write_str(LATIN_LABEL),
        }
    }
}

/// Fold a kana character onto its plain hiragana row symbol
fn fold_kana(c: char) -> char {
    // Katakana ァ..ヶ sit 0x60 above their hiragana counterparts
    let c = match c {
        'ァ'..='ヶ' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
        _ => c,
    };
    match c {
        'ぁ' => 'あ',
        'ぃ' => 'い',
        'ぅ' | 'ゔ' => 'う',
        'ぇ' => 'え',
        'ぉ' => 'お',
        'ゕ' | 'が' => 'か',
        'ぎ' => 'き',
        'ぐ' => 'く',
        'ゖ' | 'げ' => 'け',
        'ご' => 'こ',
        'ざ' => 'さ',
        'じ' => 'し',
        'ず' => 'す',
        'ぜ' => 'せ',
        'ぞ' => 'そ',
        'だ' => 'た',
        'ぢ' => 'ち',
        'っ' | 'づ' => 'つ',
        'で' => 'て',
        'ど' => 'と',
        'ば' | 'ぱ' => 'は',
        'び' | 'ぴ' => 'ひ',
        'ぶ' | 'ぷ' => 'ふ',
        'べ' | 'ぺ' => 'へ',
        'ぼ' | 'ぽ' => 'ほ',
        'ゃ' => 'や',
        'ゅ' => 'ゆ',
        'ょ' => 'よ',
        'ゎ' => 'わ',
        other => other,
    }
}
