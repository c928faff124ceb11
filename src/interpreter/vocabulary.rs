//! Word tables of the language.
//!
//! Every lookup here is a pure function over a single word. The tokenizer
//! applies them in a fixed order: synonyms first, then filler, comment and
//! label words, digits, operators, keywords, structural words and finally
//! expression keywords. Anything left over is a variable name.

use crate::{
    ast::{BinaryOperator, ExpressionKeyword, Keyword, UnaryOperator},
    interpreter::lexer::{Operator, SyntaxWord},
};

/// Word marking a jump label.
pub const LABEL_WORD: &str = "technologic";
/// Word opening a comment span.
pub const COMMENT_START: &str = "pause";
/// Word closing a comment span.
pub const COMMENT_END: &str = "play";

/// Digit words, indexed by their positional value. The last one is the
/// decimal point.
pub const DIGITS: [&str; 11] =
    ["erase", "click", "watch", "view", "work", "surf", "update", "upgrade", "zoom", "fill", "point"];

/// Positional value of the digit word acting as a decimal point.
pub const DECIMAL_POINT: u8 = 10;

/// Maps alternate spellings to their canonical word.
///
/// ```
/// use technologic::interpreter::vocabulary::canonical;
///
/// assert_eq!(canonical("tune"), "fix");
/// assert_eq!(canonical("print"), "print");
/// ```
#[must_use]
pub fn canonical(word: &str) -> &str {
    match word {
        "tune" => "fix",
        "snap" => "jam",
        "rewrite" => "write",
        "rate" => "check",
        other => other,
    }
}

/// Words that carry no meaning and never reach the token stream.
#[must_use]
pub fn is_filler(word: &str) -> bool {
    matches!(word, "it" | "quick" | "mail")
}

#[must_use]
pub fn digit_value(word: &str) -> Option<u8> {
    DIGITS.iter()
          .position(|digit| *digit == word)
          .and_then(|index| u8::try_from(index).ok())
}

#[must_use]
pub fn operator(word: &str) -> Option<Operator> {
    let op = match word {
        "touch" => Operator::Binary(BinaryOperator::Add),
        "trash" => Operator::Binary(BinaryOperator::Sub),
        "cross" => Operator::Binary(BinaryOperator::Mul),
        "cut" => Operator::Binary(BinaryOperator::FloatDiv),
        "crack" => Operator::Binary(BinaryOperator::IntDiv),
        "rip" => Operator::Binary(BinaryOperator::Mod),
        "drag" => Operator::Binary(BinaryOperator::Equal),
        "pay" | "buy" => Operator::Binary(BinaryOperator::Less),
        "charge" => Operator::Binary(BinaryOperator::Greater),
        "turn" => Operator::Unary(UnaryOperator::Negate),
        "switch" => Operator::Unary(UnaryOperator::Not),
        "paste" => Operator::Unary(UnaryOperator::Paste),
        "unlock" => Operator::Unary(UnaryOperator::Return),
        _ => return None,
    };
    Some(op)
}

/// Words that must be followed by a fixed phrase, which the tokenizer checks
/// and then drops.
#[must_use]
pub fn continuation(word: &str) -> Option<&'static [&'static str]> {
    match word {
        "drag" => Some(&["and", "drop"]),
        _ => None,
    }
}

/// Whether the word only ever appears inside a fixed continuation phrase.
#[must_use]
pub fn is_continuation_word(word: &str) -> bool {
    matches!(word, "and" | "drop")
}

#[must_use]
pub fn keyword(word: &str) -> Option<Keyword> {
    let keyword = match word {
        "print" => Keyword::Print,
        "send" => Keyword::Send,
        "scroll" => Keyword::Scroll,
        "save" => Keyword::Save,
        "load" => Keyword::Load,
        "change" => Keyword::Change,
        "write" => Keyword::Write,
        "scan" => Keyword::Scan,
        "press" => Keyword::Press,
        "burn" => Keyword::Burn,
        "check" => Keyword::Check,
        "fix" => Keyword::Fix,
        "jam" => Keyword::Jam,
        "lock" => Keyword::Lock,
        "start" => Keyword::Start,
        "break" => Keyword::Break,
        "leave" => Keyword::Leave,
        "find" => Keyword::Find,
        _ => return None,
    };
    Some(keyword)
}

#[must_use]
pub fn syntax_word(word: &str) -> Option<SyntaxWord> {
    let syntax = match word {
        "name" => SyntaxWord::Name,
        "rename" => SyntaxWord::Rename,
        "zip" => SyntaxWord::Zip,
        "unzip" => SyntaxWord::Unzip,
        "use" => SyntaxWord::Use,
        "code" => SyntaxWord::Code,
        "call" => SyntaxWord::Call,
        "bring" => SyntaxWord::Bring,
        "plug" => SyntaxWord::Plug,
        "format" => SyntaxWord::Format,
        _ => return None,
    };
    Some(syntax)
}

#[must_use]
pub fn expression_keyword(word: &str) -> Option<ExpressionKeyword> {
    match word {
        "fax" => Some(ExpressionKeyword::Pop),
        _ => None,
    }
}

/// Whether the word is free to name a variable or function.
///
/// ```
/// use technologic::interpreter::vocabulary::is_variable_name;
///
/// assert!(is_variable_name("counter"));
/// assert!(!is_variable_name("touch"));
/// assert!(!is_variable_name("rate"));
/// assert!(!is_variable_name("drop"));
/// ```
#[must_use]
pub fn is_variable_name(word: &str) -> bool {
    let word = canonical(word);
    !(is_filler(word)
      || word == LABEL_WORD
      || word == COMMENT_START
      || is_continuation_word(word)
      || digit_value(word).is_some()
      || operator(word).is_some()
      || keyword(word).is_some()
      || syntax_word(word).is_some()
      || expression_keyword(word).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_carry_their_position() {
        assert_eq!(digit_value("erase"), Some(0));
        assert_eq!(digit_value("fill"), Some(9));
        assert_eq!(digit_value("point"), Some(DECIMAL_POINT));
        assert_eq!(digit_value("zero"), None);
    }

    #[test]
    fn both_spellings_of_less_than_agree() {
        assert_eq!(operator("pay"), operator("buy"));
        assert_eq!(operator("pay"), Some(Operator::Binary(BinaryOperator::Less)));
    }

    #[test]
    fn unlock_is_a_unary_return() {
        assert_eq!(operator("unlock"), Some(Operator::Unary(UnaryOperator::Return)));
    }

    #[test]
    fn continuation_words_are_reserved() {
        assert!(!is_variable_name("and"));
        assert!(!is_variable_name("drop"));
        assert!(is_variable_name("andy"));
    }

    #[test]
    fn synonyms_resolve_before_keywords() {
        assert_eq!(keyword(canonical("snap")), Some(Keyword::Jam));
        assert_eq!(keyword(canonical("rewrite")), Some(Keyword::Write));
    }
}
